//! # OZP DB
//!
//! Profile storage for the OZP Center API.
//!
//! - [`ProfileRepository`]: data access trait used by the HTTP layer
//! - [`PgProfileRepository`]: PostgreSQL implementation (runtime `sqlx` queries)
//! - [`InMemoryProfileRepository`]: lock-guarded in-memory implementation
//! - [`ProfileStore`]: the backend selected by configuration
//! - [`sample_data`]: the sample organizations and profiles
//!
//! # Example
//!
//! ```ignore
//! use ozp_config::StorageConfig;
//! use ozp_db::{ProfileRepository, ProfileStore};
//!
//! let store = ProfileStore::connect(&StorageConfig::from_env()).await?;
//! let me = store.find_by_username("wsmith").await?;
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod sample_data;
pub mod store;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryProfileRepository;
pub use postgres::PgProfileRepository;
pub use repository::ProfileRepository;
pub use store::ProfileStore;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Initializes a PostgreSQL connection pool.
///
/// Called once at startup; the returned pool is cheaply cloneable.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> StoreResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}
