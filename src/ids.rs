//! Newtype IDs and opaque reference tokens.
//!
//! Newtypes keep the different ID kinds from being mixed up, e.g. passing an
//! `OrderId` where a `PaymentId` is expected. Externally visible references
//! (order numbers, payment/refund tokens) are generated separately with a
//! human-distinguishing prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new unique ID.
            pub fn generate() -> Self {
                Self(generate_raw())
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

define_id!(UserId);
define_id!(ProductId);
define_id!(ReviewId);
define_id!(AddressId);
define_id!(OrderId);
define_id!(PaymentId);
define_id!(RefundId);

// Monotonic within the process, so tokens stay unique even when many are
// generated in the same second.
static COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_suffix() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{:X}{:04X}", timestamp, counter)
}

fn generate_raw() -> String {
    next_suffix().to_lowercase()
}

/// Generate an externally visible reference token, e.g. `ORD-17A2B3C40001`.
pub fn generate_reference(prefix: &str) -> String {
    format!("{}-{}", prefix, next_suffix())
}

/// Generate a human-readable order number.
pub fn generate_order_number() -> String {
    generate_reference("ORD")
}

/// Generate a payment reference token.
pub fn generate_payment_reference() -> String {
    generate_reference("PAY")
}

/// Generate a refund reference token.
pub fn generate_refund_reference() -> String {
    generate_reference("REF")
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
        let id1 = OrderId::generate();
        let id2 = OrderId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_id_display() {
        let id = PaymentId::new("pay-789");
        assert_eq!(format!("{}", id), "pay-789");
    }

    #[test]
    fn test_reference_prefixes() {
        assert!(generate_order_number().starts_with("ORD-"));
        assert!(generate_payment_reference().starts_with("PAY-"));
        assert!(generate_refund_reference().starts_with("REF-"));
    }

    #[test]
    fn test_references_unique() {
        let a = generate_order_number();
        let b = generate_order_number();
        assert_ne!(a, b);
    }
}
