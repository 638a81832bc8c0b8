//! Domain identifier types with proper encapsulation.
//!
//! Identifiers are opaque strings (usually base58 account addresses). The
//! engine never derives or decodes them; it only compares and reports them.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id!(
    /// Asset (token mint) identifier.
    AssetId
);

string_id!(
    /// Vault identifier.
    VaultId
);

string_id!(
    /// Yield source identifier.
    SourceId
);

string_id!(
    /// On-chain account address, used for oracle feeds and position owners.
    Address
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_compare_by_value() {
        assert_eq!(AssetId::from("SOL"), AssetId::new(String::from("SOL")));
        assert_ne!(VaultId::from("a"), VaultId::from("b"));
        assert_eq!(SourceId::from("kamino").as_str(), "kamino");
        assert_eq!(Address::from("H6AR").to_string(), "H6AR");
    }
}
