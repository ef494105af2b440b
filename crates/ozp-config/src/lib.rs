//! # OZP Config
//!
//! Configuration types for the OZP Center API, loaded from environment
//! variables (after `dotenvy::dotenv()` in the binaries):
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`jwt`]: Bearer token signing configuration
//! - [`server`]: Bind address and metrics port
//! - [`storage`]: Profile store backend selection
//! - [`visibility`]: Profile listing visibility policy
//!
//! # Example
//!
//! ```ignore
//! use ozp_config::{CorsConfig, JwtConfig, StorageConfig, VisibilityPolicy};
//!
//! let jwt_config = JwtConfig::from_env();
//! let storage = StorageConfig::from_env();
//! let policy = VisibilityPolicy::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;
pub mod storage;
pub mod visibility;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};
pub use visibility::VisibilityPolicy;
