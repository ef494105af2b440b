use anyhow::Context;
use tracing::{debug, info, instrument};

use ozp_config::VisibilityPolicy;
use ozp_core::AppError;
use ozp_db::{ProfileRepository, ProfileStore};
use ozp_models::{
    Profile, ProfileChanges, ProfileId, ProfileQuery, ProfileSummary, ProfileUpdate, ProfileView,
    Role, SelfProfileUpdate,
};

use crate::metrics::{track_profile_updated, track_profiles_listed};
use crate::modules::profiles::model::ProfileListFilter;
use crate::modules::profiles::visibility::{can_view, visible_roles};

pub struct ProfileService;

impl ProfileService {
    /// Lists the profiles `caller` may see, ordered by id.
    ///
    /// A requested role outside the caller's visible tiers yields an empty
    /// list.
    #[instrument(skip(store, caller), fields(caller = %caller.username()))]
    pub async fn list_profiles(
        store: &ProfileStore,
        caller: &Profile,
        policy: VisibilityPolicy,
        filter: ProfileListFilter,
    ) -> Result<Vec<ProfileSummary>, AppError> {
        let caller_role = caller.highest_role();
        let visible = visible_roles(caller_role, policy);

        let roles = match filter.role {
            Some(role) if visible.contains(&role) => vec![role],
            Some(role) => {
                debug!(%role, %caller_role, "Requested role is not visible to caller");
                Vec::new()
            }
            None => visible,
        };

        if roles.is_empty() {
            track_profiles_listed(caller_role.as_str(), 0);
            return Ok(Vec::new());
        }

        let query = ProfileQuery {
            roles: Some(roles),
            username_starts_with: filter.username_starts_with,
        };
        let profiles = store
            .list(&query)
            .await
            .context("Failed to list profiles")?;

        track_profiles_listed(caller_role.as_str(), profiles.len());
        Ok(profiles.iter().map(ProfileSummary::from).collect())
    }

    /// Fetches one profile; profiles outside the caller's visible tiers are
    /// reported as not found.
    #[instrument(skip(store, caller), fields(caller = %caller.username()))]
    pub async fn get_profile(
        store: &ProfileStore,
        caller: &Profile,
        policy: VisibilityPolicy,
        id: ProfileId,
    ) -> Result<ProfileView, AppError> {
        let profile = store
            .find_by_id(id)
            .await
            .context("Failed to fetch profile")?
            .ok_or_else(AppError::not_found)?;

        if !can_view(caller.highest_role(), profile.highest_role(), policy) {
            debug!(target_id = %id, "Profile hidden from caller");
            return Err(AppError::not_found());
        }

        Ok(ProfileView::from(profile))
    }

    /// Applies a self-service update.
    ///
    /// `stewarded_organizations` is only applied for APPS_MALL_STEWARD
    /// callers; for everyone else it has been validated and is dropped here.
    #[instrument(skip(store, caller, update), fields(caller = %caller.username()))]
    pub async fn update_self(
        store: &ProfileStore,
        caller: Profile,
        update: SelfProfileUpdate,
    ) -> Result<ProfileView, AppError> {
        let may_steward = caller.highest_role() == Role::AppsMallSteward;
        let changes = update.into_changes(may_steward);

        if changes.is_empty() {
            debug!("No applicable changes");
            return Ok(ProfileView::from(caller));
        }

        let profile = Self::apply(store, caller.id, changes, "self").await?;
        info!(profile_id = %profile.id, "Self profile updated");
        Ok(ProfileView::from(profile))
    }

    /// Applies an administrative update to profile `id`.
    #[instrument(skip(store, update))]
    pub async fn update_profile(
        store: &ProfileStore,
        id: ProfileId,
        update: ProfileUpdate,
    ) -> Result<ProfileView, AppError> {
        let changes = ProfileChanges::from(update);
        if changes.is_empty() {
            let profile = store
                .find_by_id(id)
                .await
                .context("Failed to fetch profile")?
                .ok_or_else(AppError::not_found)?;
            return Ok(ProfileView::from(profile));
        }

        let profile = Self::apply(store, id, changes, "admin").await?;
        info!(profile_id = %profile.id, "Profile updated");
        Ok(ProfileView::from(profile))
    }

    async fn apply(
        store: &ProfileStore,
        id: ProfileId,
        changes: ProfileChanges,
        path: &'static str,
    ) -> Result<Profile, AppError> {
        let stewardship_changed = changes.stewarded_organizations.is_some();
        let profile = store
            .update(id, changes)
            .await
            .context("Failed to update profile")?
            .ok_or_else(AppError::not_found)?;

        track_profile_updated(path, stewardship_changed);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use ozp_db::InMemoryProfileRepository;
    use ozp_models::OrganizationRef;

    fn store() -> ProfileStore {
        ProfileStore::Memory(InMemoryProfileRepository::with_sample_data())
    }

    async fn profile(store: &ProfileStore, username: &str) -> Profile {
        store.find_by_username(username).await.unwrap().unwrap()
    }

    fn usernames(summaries: &[ProfileSummary]) -> Vec<&str> {
        summaries.iter().map(|s| s.user.username.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_by_role_open_policy() {
        let store = store();
        let jones = profile(&store, "jones").await;
        let filter = ProfileListFilter {
            role: Some(Role::OrgSteward),
            username_starts_with: None,
        };
        let result =
            ProfileService::list_profiles(&store, &jones, VisibilityPolicy::Open, filter)
                .await
                .unwrap();
        assert_eq!(usernames(&result), vec!["wsmith", "julia", "obrien"]);
    }

    #[tokio::test]
    async fn test_list_hidden_role_is_empty_under_banded_policy() {
        let store = store();
        let jones = profile(&store, "jones").await;
        let filter = ProfileListFilter {
            role: Some(Role::OrgSteward),
            username_starts_with: None,
        };
        let result =
            ProfileService::list_profiles(&store, &jones, VisibilityPolicy::Banded, filter)
                .await
                .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_get_hidden_profile_is_not_found() {
        let store = store();
        let jones = profile(&store, "jones").await;
        let err = ProfileService::get_profile(
            &store,
            &jones,
            VisibilityPolicy::Banded,
            ProfileId::new(1),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_self_update_ignores_stewardship_for_org_steward() {
        let store = store();
        let wsmith = profile(&store, "wsmith").await;
        let update = SelfProfileUpdate {
            is_new_user: Some(false),
            stewarded_organizations: Some(vec![OrganizationRef::by_title("Ministry of Love")]),
        };
        let view = ProfileService::update_self(&store, wsmith, update)
            .await
            .unwrap();
        assert!(!view.profile.is_new_user);
        let titles: Vec<_> = view
            .profile
            .stewarded_organizations
            .iter()
            .map(|o| o.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Ministry of Truth"]);
    }

    #[tokio::test]
    async fn test_self_update_applies_stewardship_for_apps_mall_steward() {
        let store = store();
        let bigbrother = profile(&store, "bigbrother").await;
        let update = SelfProfileUpdate {
            is_new_user: None,
            stewarded_organizations: Some(vec![OrganizationRef::by_title("Ministry of Love")]),
        };
        let view = ProfileService::update_self(&store, bigbrother, update)
            .await
            .unwrap();
        assert_eq!(view.profile.stewarded_organizations.len(), 1);
        assert_eq!(
            view.profile.stewarded_organizations[0].short_name,
            "Miniluv"
        );
    }

    #[tokio::test]
    async fn test_admin_update_unknown_profile() {
        let store = store();
        let update = ProfileUpdate {
            display_name: Some("Nobody".to_string()),
            stewarded_organizations: None,
        };
        let err = ProfileService::update_profile(&store, ProfileId::new(404), update)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
