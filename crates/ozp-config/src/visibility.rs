//! Profile listing visibility policy.
//!
//! `PROFILE_VISIBILITY` selects how role tiers are exposed when listing
//! profiles:
//!
//! - `open` (default): every authenticated caller may list every role tier.
//! - `banded`: callers may list APPS_MALL_STEWARD profiles and profiles at or
//!   below their own authority, nothing else.
//!
//! APPS_MALL_STEWARD callers see every profile under both policies.

use std::{env, fmt, str::FromStr};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisibilityPolicy {
    #[default]
    Open,
    Banded,
}

impl VisibilityPolicy {
    pub fn from_env() -> Self {
        env::var("PROFILE_VISIBILITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for VisibilityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "banded" => Ok(Self::Banded),
            other => Err(format!("unknown visibility policy: {other}")),
        }
    }
}

impl fmt::Display for VisibilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Banded => f.write_str("banded"),
        }
    }
}
