//! # OZP Auth
//!
//! Bearer token types and JWT utilities for the OZP Center API.
//!
//! Credential verification and login flows live outside this service; the
//! API only checks that a request carries a valid signed token naming an
//! existing account. Roles are never read from the token, they are derived
//! from the account's groups on every request.
//!
//! # Example
//!
//! ```ignore
//! use ozp_auth::{create_access_token, verify_token};
//! use ozp_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token("wsmith", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, "wsmith");
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
