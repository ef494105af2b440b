//! Organizations.
//!
//! A profile may belong to organizations (membership) and steward
//! organizations (administrative authority). Neither implies the other.

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::OrganizationId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Organization {
    #[serde(skip)]
    pub id: OrganizationId,
    pub short_name: String,
    pub title: String,
}

/// An organization named in an update payload.
///
/// Matched against existing organizations by title first, then short name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate, ToSchema)]
pub struct OrganizationRef {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Ensure this field has between 1 and 255 characters."
    ))]
    pub title: Option<String>,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Ensure this field has between 1 and 255 characters."
    ))]
    pub short_name: Option<String>,
}

impl OrganizationRef {
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            short_name: None,
        }
    }

    pub fn matches(&self, organization: &Organization) -> bool {
        match (&self.title, &self.short_name) {
            (Some(title), _) if *title == organization.title => true,
            (_, Some(short_name)) => *short_name == organization.short_name,
            _ => false,
        }
    }

    /// Title and short name for an organization created from this reference.
    pub fn new_organization_names(&self) -> (String, String) {
        let title = self
            .title
            .clone()
            .or_else(|| self.short_name.clone())
            .unwrap_or_default();
        let short_name = self.short_name.clone().unwrap_or_else(|| title.clone());
        (short_name, title)
    }
}

/// Orders organizations by title and drops duplicates.
pub fn normalize(mut organizations: Vec<Organization>) -> Vec<Organization> {
    organizations.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
    organizations.dedup_by_key(|o| o.id);
    organizations
}
