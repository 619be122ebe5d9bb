//! Typed ID wrappers for compile-time type safety.
//!
//! These types wrap UUIDs to prevent accidental mixing of different entity IDs.
//! Ownership checks compare ids structurally, never by string formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate typed ID wrappers with common trait implementations.
macro_rules! typed_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
        )]
        #[sqlx(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.to_string()
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(BlogId, "Unique identifier for a blog post.");
typed_id!(SessionId, "Opaque identifier for a server-side session.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_compare_structurally() {
        let uuid = Uuid::new_v4();
        let a = UserId::from_uuid(uuid);
        let b = UserId::from_uuid(uuid);
        assert_eq!(a, b);
        assert_ne!(a, UserId::new());
    }

    #[test]
    fn id_roundtrips_through_string() {
        let id = BlogId::new();
        let parsed: BlogId = id.to_string().parse().expect("parse id");
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_serializes_as_uuid_string() {
        let id = SessionId::new();
        let json = serde_json::to_value(id).expect("serialize id");
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }
}
