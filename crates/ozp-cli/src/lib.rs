//! # OZP CLI
//!
//! Database seeding utilities for OZP Center testing and development.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use ozp_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new().with_extra_users(100);
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
