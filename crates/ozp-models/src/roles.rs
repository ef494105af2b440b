//! Role tiers.
//!
//! Roles are ordered by increasing authority:
//!
//! ```text
//! USER < ORG_STEWARD < APPS_MALL_STEWARD
//! ```
//!
//! An account may belong to several role groups; its *highest role* is the
//! maximum over them. The derived `Ord` follows declaration order, so
//! variants must stay listed from least to most authority.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    OrgSteward,
    AppsMallSteward,
}

impl Role {
    /// Every role, least authority first.
    pub const ALL: [Role; 3] = [Role::User, Role::OrgSteward, Role::AppsMallSteward];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::OrgSteward => "ORG_STEWARD",
            Role::AppsMallSteward => "APPS_MALL_STEWARD",
        }
    }

    /// Numeric authority level (higher number = more authority).
    pub fn level(&self) -> u8 {
        match self {
            Role::User => 1,
            Role::OrgSteward => 2,
            Role::AppsMallSteward => 3,
        }
    }

    pub fn from_level(level: i32) -> Option<Role> {
        Role::ALL.into_iter().find(|r| i32::from(r.level()) == level)
    }

    /// Highest role among `roles`; an account without groups is a plain user.
    pub fn highest(roles: impl IntoIterator<Item = Role>) -> Role {
        roles.into_iter().max().unwrap_or(Role::User)
    }

    pub fn at_least(&self, minimum: Role) -> bool {
        *self >= minimum
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" is not a valid choice.", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ORG_STEWARD" => Ok(Role::OrgSteward),
            "APPS_MALL_STEWARD" => Ok(Role::AppsMallSteward),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
