//! Middleware and extractors for request processing.
//!
//! - [`auth`]: Bearer token authentication, resolving the caller's profile
//! - [`role`]: Role tier checks and role-gated extractors
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` verifies the JWT and loads the profile named by its subject
//! 3. Role extractors compare the profile's highest role with the requirement
//! 4. Handler executes if all checks pass
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::role::RequireAppsMallSteward;
//!
//! async fn get_self(auth_user: AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! async fn update_other(
//!     RequireAppsMallSteward(auth_user): RequireAppsMallSteward,
//! ) -> impl IntoResponse {
//!     // Only executes for APPS_MALL_STEWARD callers
//! }
//! ```

pub mod auth;
pub mod role;
