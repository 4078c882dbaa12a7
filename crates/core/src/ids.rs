//! Opaque, prefixed identifiers.
//!
//! The source system represents ids as 8-character UUID-derived suffixes
//! behind a short domain prefix (`bds_`, `ki_`, `inc_`, ...). Rather than
//! carry that around as a bare `String`, each domain gets its own newtype
//! wrapping a `Uuid`, generated by [`define_domain_id!`]. Two ids of
//! different newtypes don't unify even though both wrap a `Uuid` — the
//! "typed record structs" and "newtype per domain" redesign called for
//! in the governance spec's design notes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a newtype id wrapping a `Uuid`, displayed as `<prefix>_<8 hex chars>`.
#[macro_export]
macro_rules! define_domain_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub uuid::Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            pub const PREFIX: &'static str = $prefix;
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let simple = self.0.simple().to_string();
                write!(f, "{}_{}", $prefix, &simple[..8])
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(id: uuid::Uuid) -> Self {
                Self(id)
            }
        }
    };
}

/// A bare `Uuid`-backed token shared by types that don't own a record
/// store of their own (e.g. cross-references into another evaluator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpaqueId(pub Uuid);

impl OpaqueId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OpaqueId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OpaqueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    define_domain_id!(TestId, "tst");

    #[test]
    fn display_uses_prefix_and_eight_hex_chars() {
        let id = TestId::new();
        let rendered = id.to_string();
        assert!(rendered.starts_with("tst_"));
        assert_eq!(rendered.len(), "tst_".len() + 8);
    }

    #[test]
    fn distinct_ids_are_distinct() {
        assert_ne!(TestId::new(), TestId::new());
    }
}
