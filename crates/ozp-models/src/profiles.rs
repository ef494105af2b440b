//! Profile domain models and response views.
//!
//! A [`Profile`] is the application-level record of one account. Its highest
//! role is never stored; it is derived from the account's groups whenever a
//! view is rendered or a visibility decision is made.

use serde::Serialize;
use utoipa::ToSchema;

use crate::ids::ProfileId;
use crate::organizations::{Organization, OrganizationRef};
use crate::roles::Role;

/// A role group membership of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Group {
    pub name: Role,
}

/// The authenticatable account behind a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Account {
    pub username: String,
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Profile {
    pub id: ProfileId,
    pub display_name: String,
    pub is_new_user: bool,
    pub user: Account,
    pub organizations: Vec<Organization>,
    pub stewarded_organizations: Vec<Organization>,
}

impl Profile {
    pub fn highest_role(&self) -> Role {
        Role::highest(self.user.groups.iter().map(|g| g.name))
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }
}

/// Full profile as returned by the detail and self endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub highest_role: Role,
}

impl From<Profile> for ProfileView {
    fn from(profile: Profile) -> Self {
        let highest_role = profile.highest_role();
        Self {
            profile,
            highest_role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AccountSummary {
    pub username: String,
}

/// Listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProfileSummary {
    pub id: ProfileId,
    pub display_name: String,
    pub user: AccountSummary,
    pub highest_role: Role,
}

impl From<&Profile> for ProfileSummary {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            display_name: profile.display_name.clone(),
            user: AccountSummary {
                username: profile.user.username.clone(),
            },
            highest_role: profile.highest_role(),
        }
    }
}

/// Store-level listing filter.
///
/// `roles` is the set of highest roles a result may have; `None` means any.
/// An empty set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileQuery {
    pub roles: Option<Vec<Role>>,
    pub username_starts_with: Option<String>,
}

impl ProfileQuery {
    pub fn matches(&self, profile: &Profile) -> bool {
        let role_ok = self
            .roles
            .as_ref()
            .is_none_or(|roles| roles.contains(&profile.highest_role()));

        let prefix_ok = self
            .username_starts_with
            .as_deref()
            .is_none_or(|prefix| profile.username().starts_with(prefix));

        role_ok && prefix_ok
    }
}

/// Changes applied to a stored profile in one atomic update.
///
/// `stewarded_organizations`, when present, replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub display_name: Option<String>,
    pub is_new_user: Option<bool>,
    pub stewarded_organizations: Option<Vec<OrganizationRef>>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.is_new_user.is_none()
            && self.stewarded_organizations.is_none()
    }
}
