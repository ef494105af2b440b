//! Backend selection for the profile store.

use tracing::info;

use ozp_config::{StorageBackend, StorageConfig};
use ozp_models::{Profile, ProfileChanges, ProfileId, ProfileQuery};

use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryProfileRepository;
use crate::postgres::PgProfileRepository;
use crate::repository::ProfileRepository;
use crate::{MIGRATOR, init_db_pool};

/// The configured profile store, shared through application state.
#[derive(Clone, Debug)]
pub enum ProfileStore {
    Postgres(PgProfileRepository),
    Memory(InMemoryProfileRepository),
}

impl ProfileStore {
    /// Opens the backend selected by `config`.
    ///
    /// The PostgreSQL backend applies the embedded migrations first when
    /// `run_migrations` is set; the memory backend starts from the sample
    /// dataset.
    pub async fn connect(config: &StorageConfig) -> StoreResult<Self> {
        match &config.backend {
            StorageBackend::Memory => {
                info!("Using in-memory profile store with sample data");
                Ok(Self::Memory(InMemoryProfileRepository::with_sample_data()))
            }
            StorageBackend::Postgres {
                database_url,
                max_connections,
                run_migrations,
            } => {
                let url = database_url
                    .as_deref()
                    .ok_or(StoreError::MissingDatabaseUrl)?;
                let pool = init_db_pool(url, *max_connections).await?;
                if *run_migrations {
                    MIGRATOR.run(&pool).await?;
                    info!("Database migrations applied");
                }
                Ok(Self::Postgres(PgProfileRepository::new(pool)))
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

impl ProfileRepository for ProfileStore {
    async fn find_by_id(&self, id: ProfileId) -> StoreResult<Option<Profile>> {
        match self {
            Self::Postgres(repo) => repo.find_by_id(id).await,
            Self::Memory(repo) => repo.find_by_id(id).await,
        }
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Profile>> {
        match self {
            Self::Postgres(repo) => repo.find_by_username(username).await,
            Self::Memory(repo) => repo.find_by_username(username).await,
        }
    }

    async fn list(&self, query: &ProfileQuery) -> StoreResult<Vec<Profile>> {
        match self {
            Self::Postgres(repo) => repo.list(query).await,
            Self::Memory(repo) => repo.list(query).await,
        }
    }

    async fn update(&self, id: ProfileId, changes: ProfileChanges) -> StoreResult<Option<Profile>> {
        match self {
            Self::Postgres(repo) => repo.update(id, changes).await,
            Self::Memory(repo) => repo.update(id, changes).await,
        }
    }
}
