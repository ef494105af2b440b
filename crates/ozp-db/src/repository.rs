//! Repository trait for profile data access.
//!
//! Lookups that can legitimately miss return `Option`; a `StoreError` always
//! means the backend itself failed.

use ozp_models::{Profile, ProfileChanges, ProfileId, ProfileQuery};

use crate::error::StoreResult;

pub trait ProfileRepository: Send + Sync {
    fn find_by_id(&self, id: ProfileId)
    -> impl Future<Output = StoreResult<Option<Profile>>> + Send;

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = StoreResult<Option<Profile>>> + Send;

    /// Profiles matching `query`, ordered by id.
    fn list(&self, query: &ProfileQuery) -> impl Future<Output = StoreResult<Vec<Profile>>> + Send;

    /// Applies `changes` atomically and returns the updated profile.
    ///
    /// Organization references that match no existing organization (by title,
    /// then short name) create a new one. Returns `None` if `id` is unknown.
    fn update(
        &self,
        id: ProfileId,
        changes: ProfileChanges,
    ) -> impl Future<Output = StoreResult<Option<Profile>>> + Send;
}
