//! The sample dataset.
//!
//! Seeded into the in-memory store at startup and written to PostgreSQL by
//! `ozp-cli seed`. Profile ids follow the order of [`SAMPLE_PROFILES`],
//! starting at 1; organization ids follow [`SAMPLE_ORGANIZATIONS`].

use ozp_models::{
    Account, Group, Organization, OrganizationId, Profile, ProfileId, Role, organizations,
};

/// `(short_name, title)` pairs.
pub const SAMPLE_ORGANIZATIONS: [(&str, &str); 4] = [
    ("Minitrue", "Ministry of Truth"),
    ("Minipax", "Ministry of Peace"),
    ("Miniluv", "Ministry of Love"),
    ("Miniplen", "Ministry of Plenty"),
];

#[derive(Debug, Clone, Copy)]
pub struct SampleProfile {
    pub username: &'static str,
    pub display_name: &'static str,
    pub role: Role,
    /// Short names of member organizations.
    pub organizations: &'static [&'static str],
    /// Short names of stewarded organizations.
    pub stewarded_organizations: &'static [&'static str],
}

pub const SAMPLE_PROFILES: [SampleProfile; 11] = [
    SampleProfile {
        username: "wsmith",
        display_name: "Winston Smith",
        role: Role::OrgSteward,
        organizations: &["Minitrue"],
        stewarded_organizations: &["Minitrue"],
    },
    SampleProfile {
        username: "julia",
        display_name: "Julia Dixon",
        role: Role::OrgSteward,
        organizations: &["Minitrue"],
        stewarded_organizations: &["Minitrue"],
    },
    SampleProfile {
        username: "obrien",
        display_name: "O'brien",
        role: Role::OrgSteward,
        organizations: &["Miniluv"],
        stewarded_organizations: &["Miniluv", "Minipax"],
    },
    SampleProfile {
        username: "bigbrother",
        display_name: "Big Brother",
        role: Role::AppsMallSteward,
        organizations: &["Minipax"],
        stewarded_organizations: &[],
    },
    SampleProfile {
        username: "bigbrother2",
        display_name: "Big Brother2",
        role: Role::AppsMallSteward,
        organizations: &["Minitrue"],
        stewarded_organizations: &[],
    },
    SampleProfile {
        username: "aaronson",
        display_name: "Aaronson",
        role: Role::User,
        organizations: &["Miniplen"],
        stewarded_organizations: &[],
    },
    SampleProfile {
        username: "jones",
        display_name: "Jones",
        role: Role::User,
        organizations: &["Minitrue"],
        stewarded_organizations: &[],
    },
    SampleProfile {
        username: "rutherford",
        display_name: "Rutherford",
        role: Role::User,
        organizations: &["Miniplen"],
        stewarded_organizations: &[],
    },
    SampleProfile {
        username: "syme",
        display_name: "Syme",
        role: Role::User,
        organizations: &["Minipax"],
        stewarded_organizations: &[],
    },
    SampleProfile {
        username: "tparsons",
        display_name: "Tom Parsons",
        role: Role::User,
        organizations: &["Minipax", "Minitrue"],
        stewarded_organizations: &[],
    },
    SampleProfile {
        username: "charrington",
        display_name: "Charrington",
        role: Role::User,
        organizations: &["Minipax", "Minitrue", "Miniplen"],
        stewarded_organizations: &[],
    },
];

pub fn sample_organizations() -> Vec<Organization> {
    SAMPLE_ORGANIZATIONS
        .iter()
        .zip(1..)
        .map(|(&(short_name, title), id)| Organization {
            id: OrganizationId::new(id),
            short_name: short_name.to_string(),
            title: title.to_string(),
        })
        .collect()
}

/// The sample profiles with ids assigned, resolved against `organizations`.
pub fn sample_profiles(organizations: &[Organization]) -> Vec<Profile> {
    let resolve = |short_names: &[&str]| {
        organizations::normalize(
            organizations
                .iter()
                .filter(|o| short_names.contains(&o.short_name.as_str()))
                .cloned()
                .collect(),
        )
    };

    SAMPLE_PROFILES
        .iter()
        .zip(1..)
        .map(|(sample, id)| Profile {
            id: ProfileId::new(id),
            display_name: sample.display_name.to_string(),
            is_new_user: true,
            user: Account {
                username: sample.username.to_string(),
                groups: vec![Group { name: sample.role }],
            },
            organizations: resolve(sample.organizations),
            stewarded_organizations: resolve(sample.stewarded_organizations),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_profiles_resolve_organizations() {
        let profiles = sample_profiles(&sample_organizations());
        assert_eq!(profiles.len(), 11);

        let obrien = &profiles[2];
        assert_eq!(obrien.id, ProfileId::new(3));
        assert_eq!(obrien.username(), "obrien");
        let stewarded: Vec<_> = obrien
            .stewarded_organizations
            .iter()
            .map(|o| o.title.as_str())
            .collect();
        assert_eq!(stewarded, vec!["Ministry of Love", "Ministry of Peace"]);
    }

    #[test]
    fn test_sample_usernames_are_unique() {
        let mut names: Vec<_> = SAMPLE_PROFILES.iter().map(|p| p.username).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SAMPLE_PROFILES.len());
    }
}
