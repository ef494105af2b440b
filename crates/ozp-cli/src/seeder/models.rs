//! Data models for database seeding configuration.

use ozp_db::sample_data::SampleProfile;
use ozp_models::Role;

/// Seed data for one account and its profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSeed {
    pub username: String,
    pub display_name: String,
    pub role: Role,
    /// Short names of member organizations.
    pub organizations: Vec<String>,
    /// Short names of stewarded organizations.
    pub stewarded_organizations: Vec<String>,
}

impl From<&SampleProfile> for ProfileSeed {
    fn from(sample: &SampleProfile) -> Self {
        Self {
            username: sample.username.to_string(),
            display_name: sample.display_name.to_string(),
            role: sample.role,
            organizations: sample.organizations.iter().map(|s| s.to_string()).collect(),
            stewarded_organizations: sample
                .stewarded_organizations
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Complete configuration for database seeding.
#[derive(Clone, Debug, Default)]
pub struct SeedConfig {
    /// Generated USER profiles added after the sample dataset.
    pub extra_users: usize,
}

impl SeedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra_users(mut self, extra_users: usize) -> Self {
        self.extra_users = extra_users;
        self
    }
}
