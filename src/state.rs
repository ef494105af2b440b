use anyhow::Context;
use tracing::info;

use ozp_config::{CorsConfig, JwtConfig, StorageConfig, VisibilityPolicy};
use ozp_db::ProfileStore;

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: ProfileStore,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub visibility: VisibilityPolicy,
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let storage_config = StorageConfig::from_env();
    let store = ProfileStore::connect(&storage_config)
        .await
        .context("Failed to open profile store")?;

    let visibility = VisibilityPolicy::from_env();
    info!(store = store.backend_name(), %visibility, "Application state initialized");

    Ok(AppState {
        store,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        visibility,
    })
}
