//! # OZP Models
//!
//! Domain models and request payloads for the OZP Center API.
//!
//! - [`ids`]: Strongly-typed integer ID newtypes
//! - [`roles`]: The ordered role tiers
//! - [`organizations`]: Organizations and organization references
//! - [`profiles`]: Profiles, accounts, and their response views
//! - [`payloads`]: Parsing of loosely-typed update bodies into DTOs

pub mod ids;
pub mod organizations;
pub mod payloads;
pub mod profiles;
pub mod roles;

// Re-export commonly used types at crate root
pub use ids::{OrganizationId, ProfileId};
pub use organizations::{Organization, OrganizationRef};
pub use payloads::{FromPayload, ProfileUpdate, SelfProfileUpdate};
pub use profiles::{
    Account, AccountSummary, Group, Profile, ProfileChanges, ProfileQuery, ProfileSummary,
    ProfileView,
};
pub use roles::Role;
