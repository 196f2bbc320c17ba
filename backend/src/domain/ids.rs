//! Strongly typed record identifiers.
//!
//! Every collection keys its records by a UUID v4; wrapping each in its own
//! type keeps a product id from being handed to a category lookup.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Allocate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of a registered customer or administrator.
    UserId
);
define_id!(
    /// Identifier of a top-level catalogue category.
    CategoryId
);
define_id!(
    /// Identifier of a subcategory nested under one category.
    SubcategoryId
);
define_id!(ProductId);
define_id!(OrderId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_displays_canonical_form() {
        let id: ProductId = " 0b0e6a3c-22f4-4b8e-9f5d-2d1b9d6c7a10 "
            .parse()
            .expect("valid uuid");
        assert_eq!(id.to_string(), "0b0e6a3c-22f4-4b8e-9f5d-2d1b9d6c7a10");
    }

    #[test]
    fn serialises_as_bare_string() {
        let id = CategoryId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).expect("serialise");
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }

    #[test]
    fn random_ids_differ() {
        assert_ne!(OrderId::random(), OrderId::random());
    }
}
