//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing an OrderId where a ProductId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);

impl OrderId {
    /// Generate an order number of the form `ORD-<unix seconds>-<seq>`.
    ///
    /// The sequence part keeps numbers unique within a process even when
    /// several orders are placed in the same second.
    pub fn generate() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::time::{SystemTime, UNIX_EPOCH};

        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let seq = COUNTER.fetch_add(1, Ordering::SeqCst);

        Self(format!("ORD-{}-{:04}", ts, seq % 10_000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("p1");
        assert_eq!(id.as_str(), "p1");
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "p2".into();
        assert_eq!(id.as_str(), "p2");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::new("p3")).unwrap();
        assert_eq!(json, "\"p3\"");
    }

    #[test]
    fn test_order_id_generation() {
        let a = OrderId::generate();
        let b = OrderId::generate();
        assert!(a.as_str().starts_with("ORD-"));
        assert_ne!(a, b);
    }
}
