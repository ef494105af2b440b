//! Profile store backend selection.
//!
//! - `PROFILE_STORE`: `postgres` (default) or `memory`
//! - `DATABASE_URL`: PostgreSQL connection string (required for `postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
//! - `RUN_MIGRATIONS`: apply embedded migrations at startup (default: true)
//!
//! The `memory` backend is seeded with the sample dataset on startup and is
//! meant for local development and tests.

use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres {
        database_url: Option<String>,
        max_connections: u32,
        run_migrations: bool,
    },
    Memory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

impl StorageConfig {
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
        }
    }

    pub fn from_env() -> Self {
        let kind = env::var("PROFILE_STORE").unwrap_or_else(|_| "postgres".to_string());

        let backend = match kind.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => StorageBackend::Memory,
            _ => StorageBackend::Postgres {
                database_url: env::var("DATABASE_URL").ok(),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
                run_migrations: env::var("RUN_MIGRATIONS")
                    .map(|v| v.to_lowercase() != "false" && v != "0")
                    .unwrap_or(true),
            },
        };

        Self { backend }
    }
}
