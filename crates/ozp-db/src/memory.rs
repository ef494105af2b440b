//! In-memory profile store.
//!
//! Holds every record behind a single `RwLock`; an update runs entirely under
//! the write lock, so readers never observe a partially applied change.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use ozp_models::{
    Organization, OrganizationId, OrganizationRef, Profile, ProfileChanges, ProfileId,
    ProfileQuery, organizations,
};

use crate::error::{StoreError, StoreResult};
use crate::repository::ProfileRepository;
use crate::sample_data::{sample_organizations, sample_profiles};

#[derive(Debug, Default)]
struct Inner {
    organizations: Vec<Organization>,
    /// Kept in ascending id order.
    profiles: Vec<Profile>,
}

impl Inner {
    /// Finds the organization named by `org_ref`, creating it if needed.
    fn resolve(&mut self, org_ref: &OrganizationRef) -> StoreResult<Organization> {
        if org_ref.title.is_none() && org_ref.short_name.is_none() {
            return Err(StoreError::EmptyOrganizationRef);
        }

        let existing = org_ref
            .title
            .as_deref()
            .and_then(|title| self.organizations.iter().find(|o| o.title == title))
            .or_else(|| self.organizations.iter().find(|o| org_ref.matches(o)));
        if let Some(found) = existing {
            return Ok(found.clone());
        }

        let (short_name, title) = org_ref.new_organization_names();
        if let Some(found) = self
            .organizations
            .iter()
            .find(|o| o.short_name == short_name || o.title == title)
        {
            return Ok(found.clone());
        }

        let next_id = self
            .organizations
            .iter()
            .map(|o| o.id.get())
            .max()
            .unwrap_or(0)
            + 1;
        let created = Organization {
            id: OrganizationId::new(next_id),
            short_name,
            title,
        };
        debug!(title = %created.title, "Creating organization");
        self.organizations.push(created.clone());
        Ok(created)
    }
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryProfileRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryProfileRepository {
    pub fn new(organizations: Vec<Organization>, mut profiles: Vec<Profile>) -> Self {
        profiles.sort_by_key(|p| p.id);
        Self {
            inner: Arc::new(RwLock::new(Inner {
                organizations,
                profiles,
            })),
        }
    }

    pub fn with_sample_data() -> Self {
        let organizations = sample_organizations();
        let profiles = sample_profiles(&organizations);
        Self::new(organizations, profiles)
    }

    pub async fn organizations(&self) -> Vec<Organization> {
        organizations::normalize(self.inner.read().await.organizations.clone())
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, id: ProfileId) -> StoreResult<Option<Profile>> {
        let inner = self.inner.read().await;
        Ok(inner.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Profile>> {
        let inner = self.inner.read().await;
        Ok(inner
            .profiles
            .iter()
            .find(|p| p.username() == username)
            .cloned())
    }

    async fn list(&self, query: &ProfileQuery) -> StoreResult<Vec<Profile>> {
        let inner = self.inner.read().await;
        Ok(inner
            .profiles
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect())
    }

    async fn update(&self, id: ProfileId, changes: ProfileChanges) -> StoreResult<Option<Profile>> {
        let mut inner = self.inner.write().await;

        let Some(index) = inner.profiles.iter().position(|p| p.id == id) else {
            return Ok(None);
        };

        // Resolve first so a failure leaves the profile untouched.
        let stewarded = match &changes.stewarded_organizations {
            Some(refs) => Some(
                refs.iter()
                    .map(|r| inner.resolve(r))
                    .collect::<StoreResult<Vec<_>>>()?,
            ),
            None => None,
        };

        let profile = &mut inner.profiles[index];
        if let Some(display_name) = changes.display_name {
            profile.display_name = display_name;
        }
        if let Some(is_new_user) = changes.is_new_user {
            profile.is_new_user = is_new_user;
        }
        if let Some(stewarded) = stewarded {
            profile.stewarded_organizations = organizations::normalize(stewarded);
        }

        Ok(Some(profile.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ozp_models::Role;

    fn titles(organizations: &[Organization]) -> Vec<&str> {
        organizations.iter().map(|o| o.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_filtered() {
        let repo = InMemoryProfileRepository::with_sample_data();

        let stewards = repo
            .list(&ProfileQuery {
                roles: Some(vec![Role::OrgSteward]),
                username_starts_with: None,
            })
            .await
            .unwrap();
        let names: Vec<_> = stewards.iter().map(|p| p.username()).collect();
        assert_eq!(names, vec!["wsmith", "julia", "obrien"]);

        let prefixed = repo
            .list(&ProfileQuery {
                roles: None,
                username_starts_with: Some("big".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(prefixed.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let repo = InMemoryProfileRepository::with_sample_data();
        let jones = repo.find_by_username("jones").await.unwrap().unwrap();
        assert_eq!(jones.id, ProfileId::new(7));
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_stewardship() {
        let repo = InMemoryProfileRepository::with_sample_data();
        let changes = ProfileChanges {
            display_name: Some("Winston Smith".to_string()),
            is_new_user: None,
            stewarded_organizations: Some(vec![
                OrganizationRef::by_title("Ministry of Truth"),
                OrganizationRef::by_title("Ministry of Love"),
            ]),
        };
        let updated = repo
            .update(ProfileId::new(1), changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            titles(&updated.stewarded_organizations),
            vec!["Ministry of Love", "Ministry of Truth"]
        );

        let cleared = repo
            .update(
                ProfileId::new(1),
                ProfileChanges {
                    stewarded_organizations: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(cleared.stewarded_organizations.is_empty());
        assert_eq!(titles(&cleared.organizations), vec!["Ministry of Truth"]);
    }

    #[tokio::test]
    async fn test_update_creates_unknown_organization() {
        let repo = InMemoryProfileRepository::with_sample_data();
        let changes = ProfileChanges {
            stewarded_organizations: Some(vec![OrganizationRef::by_title("Ministry of Fear")]),
            ..Default::default()
        };
        let updated = repo
            .update(ProfileId::new(4), changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(titles(&updated.stewarded_organizations), vec!["Ministry of Fear"]);

        let all = repo.organizations().await;
        assert_eq!(all.len(), 5);
        let fear = all.iter().find(|o| o.title == "Ministry of Fear").unwrap();
        assert_eq!(fear.short_name, "Ministry of Fear");
        assert_eq!(fear.id, OrganizationId::new(5));
    }

    #[tokio::test]
    async fn test_update_matches_by_short_name() {
        let repo = InMemoryProfileRepository::with_sample_data();
        let changes = ProfileChanges {
            stewarded_organizations: Some(vec![OrganizationRef {
                title: None,
                short_name: Some("Miniplen".to_string()),
            }]),
            ..Default::default()
        };
        let updated = repo
            .update(ProfileId::new(2), changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(titles(&updated.stewarded_organizations), vec!["Ministry of Plenty"]);
        assert_eq!(repo.organizations().await.len(), 4);
    }

    #[tokio::test]
    async fn test_update_unknown_profile() {
        let repo = InMemoryProfileRepository::with_sample_data();
        let result = repo
            .update(ProfileId::new(999), ProfileChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_is_new_user_update_is_idempotent() {
        let repo = InMemoryProfileRepository::with_sample_data();
        let changes = ProfileChanges {
            is_new_user: Some(false),
            ..Default::default()
        };
        let first = repo
            .update(ProfileId::new(7), changes.clone())
            .await
            .unwrap()
            .unwrap();
        let second = repo
            .update(ProfileId::new(7), changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first, second);
        assert!(!second.is_new_user);
    }
}
