//! # OZP Center API
//!
//! Profile and role management for an application marketplace (the "Apps
//! Mall"), built with Rust, Axum and PostgreSQL.
//!
//! ## Overview
//!
//! - **Authentication**: bearer JWTs naming an account; the caller's profile is
//!   loaded on every request
//! - **Roles**: three ordered tiers derived from the account's groups
//! - **Visibility**: which tiers a caller may list, per the configured policy
//! - **Self service**: reading and updating one's own profile
//! - **Administration**: APPS_MALL_STEWARD updates of any profile's
//!   display name and stewarded organizations
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Auth extractor and role checks
//! ├── modules/
//! │   └── profiles/    # Controller, service, router, visibility policy
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Tracing setup and request logging
//! ├── metrics.rs        # Prometheus metrics
//! ├── router.rs         # Main application router
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Request body extraction and validation
//! crates/
//! ├── ozp-core/         # AppError, FieldErrors, JSON helpers
//! ├── ozp-config/       # Environment-driven configuration
//! ├── ozp-auth/         # JWT claims, signing and verification
//! ├── ozp-models/       # Domain types and payload parsing
//! ├── ozp-db/           # Profile stores (PostgreSQL, in-memory)
//! └── ozp-cli/          # Seeding and developer tooling
//! ```
//!
//! ## Role Hierarchy
//!
//! ```text
//! APPS_MALL_STEWARD   sees every profile, edits any profile
//!     ↑
//! ORG_STEWARD         stewards one or more organizations
//!     ↑
//! USER
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! PROFILE_STORE=memory cargo run
//! TOKEN=$(cargo run -p ozp-cli -- issue-token bigbrother)
//! curl -H "Authorization: Bearer $TOKEN" localhost:3000/api/profile/?role=ORG_STEWARD
//! ```
//!
//! API documentation is served at `/swagger-ui` and `/scalar`.

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use ozp_auth;
pub use ozp_config;
pub use ozp_core;
pub use ozp_db;
pub use ozp_models;
