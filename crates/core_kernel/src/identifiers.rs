//! Strongly-typed codes for domain entities
//!
//! Fund and stock codes are both plain strings in storage. Wrapping them keeps
//! a fund code from being passed where a stock code is expected.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! define_code {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a code from any string-like value
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// Returns the code as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the code, returning the inner string
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self(code)
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self(code.to_string())
            }
        }

        impl From<$name> for String {
            fn from(code: $name) -> String {
                code.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Fund (summary) identifier
define_code!(EtfCode);

// Constituent identifier
define_code!(StockCode);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_display_is_raw_code() {
        assert_eq!(EtfCode::new("2800").to_string(), "2800");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&StockCode::new("0700")).unwrap();
        assert_eq!(json, "\"0700\"");
    }

    #[test]
    fn test_lookup_by_str() {
        let mut codes = HashSet::new();
        codes.insert(EtfCode::new("3033"));
        assert!(codes.contains("3033"));
    }
}
