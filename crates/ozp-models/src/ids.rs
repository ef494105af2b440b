//! Strongly-typed ID newtypes for domain entities.
//!
//! Profiles and organizations use database-assigned integer keys. Wrapping
//! them keeps a `ProfileId` from being passed where an `OrganizationId` is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
            Serialize, Deserialize, sqlx::Type, ToSchema,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        #[schema(value_type = i64)]
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a profile, stable from creation.
    ProfileId
);

define_id!(
    /// Identifier of an organization.
    OrganizationId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_plain_integer() {
        assert_eq!(serde_json::to_string(&ProfileId::new(4)).unwrap(), "4");
        let id: OrganizationId = serde_json::from_str("12").unwrap();
        assert_eq!(id.get(), 12);
    }

    #[test]
    fn test_ids_order_numerically() {
        assert!(ProfileId::new(2) < ProfileId::new(10));
        assert_eq!(ProfileId::from(7).to_string(), "7");
    }
}
