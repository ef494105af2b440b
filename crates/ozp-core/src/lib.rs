//! # OZP Core
//!
//! Core types, errors, and utilities for the OZP Center API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`validation`]: Field-keyed validation error collection
//! - [`json`]: Helpers for inspecting loosely-typed JSON payloads
//!
//! # Example
//!
//! ```ignore
//! use ozp_core::{AppError, FieldErrors};
//!
//! let mut errors = FieldErrors::new();
//! errors.add("is_new_user", "\"4\" is not a valid boolean.");
//! return Err(AppError::validation(errors));
//! ```

pub mod errors;
pub mod json;
pub mod validation;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};
pub use validation::FieldErrors;
