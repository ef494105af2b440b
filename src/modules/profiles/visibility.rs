//! Which role tiers a caller may see.

use ozp_config::VisibilityPolicy;
use ozp_models::Role;

/// Role tiers visible to a caller whose highest role is `caller`.
///
/// Under [`VisibilityPolicy::Banded`] a caller sees its own tier, every tier
/// below it, and APPS_MALL_STEWARD. Under [`VisibilityPolicy::Open`] every
/// tier is visible.
pub fn visible_roles(caller: Role, policy: VisibilityPolicy) -> Vec<Role> {
    match policy {
        VisibilityPolicy::Open => Role::ALL.to_vec(),
        VisibilityPolicy::Banded => Role::ALL
            .into_iter()
            .filter(|&role| role == Role::AppsMallSteward || role <= caller)
            .collect(),
    }
}

pub fn can_view(caller: Role, target: Role, policy: VisibilityPolicy) -> bool {
    visible_roles(caller, policy).contains(&target)
}
