//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a TenantId where a ProductId is expected.

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

            /// Generate a new unique ID.
            pub fn generate() -> Self {
                Self(generate_id())
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
define_id!(TenantId);
define_id!(CartItemId);
define_id!(ServiceId);
define_id!(BookingId);

impl CartItemId {
    /// Build the synthetic line id for a product and option selection.
    ///
    /// Distinct colour/size selections of one product become distinct lines;
    /// an unset option contributes an empty segment. `-` and `%` inside a
    /// segment are percent-escaped, so no two selections share an id.
    pub fn for_selection(product_id: &ProductId, size: Option<&str>, color: Option<&str>) -> Self {
        Self(format!(
            "{}-{}-{}",
            escape_segment(product_id.as_str()),
            escape_segment(size.unwrap_or_default()),
            escape_segment(color.unwrap_or_default())
        ))
    }
}

fn escape_segment(segment: &str) -> String {
    segment.replace('%', "%25").replace('-', "%2D")
}

/// Generate a unique ID from the clock and a process-wide counter.
fn generate_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("{:x}{:04x}", nanos, counter & 0xffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_generation_unique() {
        let id1 = BookingId::generate();
        let id2 = BookingId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = TenantId::new("acme");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"acme\"");
    }

    #[test]
    fn test_cart_item_id_for_selection() {
        let product = ProductId::new("p1");
        assert_eq!(
            CartItemId::for_selection(&product, Some("M"), Some("Red")).as_str(),
            "p1-M-Red"
        );
        assert_eq!(CartItemId::for_selection(&product, None, None).as_str(), "p1--");
        assert_ne!(
            CartItemId::for_selection(&product, Some("M"), Some("Red")),
            CartItemId::for_selection(&product, Some("L"), Some("Red"))
        );
    }

    #[test]
    fn test_cart_item_id_escapes_hyphens() {
        let sized = CartItemId::for_selection(&ProductId::new("p"), Some("1-X"), None);
        let other = CartItemId::for_selection(&ProductId::new("p-1"), Some("X"), None);
        assert_ne!(sized, other);
        assert_eq!(sized.as_str(), "p-1%2DX-");
        assert_eq!(other.as_str(), "p%2D1-X-");

        let percent = CartItemId::for_selection(&ProductId::new("p"), Some("%2D"), None);
        let hyphen = CartItemId::for_selection(&ProductId::new("p"), Some("-"), None);
        assert_ne!(percent, hyphen);
    }
}
