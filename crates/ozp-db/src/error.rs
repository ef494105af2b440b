use thiserror::Error;

/// Failures raised by a profile store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("DATABASE_URL must be set when PROFILE_STORE=postgres")]
    MissingDatabaseUrl,

    #[error("stored group name {0:?} is not a known role")]
    UnknownGroup(String),

    #[error("invalid organization reference: title or short_name is required")]
    EmptyOrganizationRef,
}

pub type StoreResult<T> = Result<T, StoreError>;
