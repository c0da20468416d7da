//! Payment types.

use crate::ids::{generate_payment_reference, OrderId, PaymentId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Supported payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cod,
    /// Credit/debit card.
    #[default]
    Card,
    /// Bank transfer.
    BankTransfer,
    /// Digital wallet.
    Wallet,
    /// Demo payment, always settles.
    Demo,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Card => "card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Wallet => "wallet",
            PaymentMethod::Demo => "demo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cod" => Some(PaymentMethod::Cod),
            "card" => Some(PaymentMethod::Card),
            "bank_transfer" => Some(PaymentMethod::BankTransfer),
            "wallet" => Some(PaymentMethod::Wallet),
            "demo" => Some(PaymentMethod::Demo),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "Cash on Delivery",
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Wallet => "Digital Wallet",
            PaymentMethod::Demo => "Demo Payment",
        }
    }
}

/// Payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// A payment for an order. Exactly one per order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    /// Unique payment identifier.
    pub id: PaymentId,
    /// Externally visible reference token (`PAY-...`).
    pub reference: String,
    /// Order being paid.
    pub order_id: OrderId,
    /// Paying user.
    pub user_id: UserId,
    /// Payment method.
    pub method: PaymentMethod,
    /// Payment status.
    pub status: PaymentStatus,
    /// Amount charged. Defaults to the order total.
    pub amount: Money,
    /// Gateway transaction id, set once submitted.
    pub transaction_id: Option<String>,
    /// Arbitrary method details (last four digits, bank name, ...).
    pub details: serde_json::Value,
    /// Why the payment failed, if it did.
    pub failure_reason: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
    /// Unix timestamp of completion, if completed.
    pub completed_at: Option<i64>,
}

impl Payment {
    /// Create a new pending payment.
    pub fn new(
        order_id: OrderId,
        user_id: UserId,
        method: PaymentMethod,
        amount: Money,
        details: serde_json::Value,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: PaymentId::generate(),
            reference: generate_payment_reference(),
            order_id,
            user_id,
            method,
            status: PaymentStatus::Pending,
            amount,
            transaction_id: None,
            details,
            failure_reason: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Check if the payment settled.
    pub fn is_successful(&self) -> bool {
        self.status == PaymentStatus::Completed
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }

    pub(crate) fn mark_completed_now(&mut self) {
        self.status = PaymentStatus::Completed;
        self.completed_at = Some(current_timestamp());
        self.touch();
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            PaymentMethod::from_str("bank_transfer"),
            Some(PaymentMethod::BankTransfer)
        );
        assert_eq!(PaymentMethod::from_str("cheque"), None);
        assert_eq!(PaymentMethod::Cod.display_name(), "Cash on Delivery");
    }

    #[test]
    fn test_new_payment_is_pending() {
        let payment = Payment::new(
            OrderId::new("o1"),
            UserId::new("u1"),
            PaymentMethod::Demo,
            Money::new(5_000, Currency::USD),
            serde_json::json!({}),
        );
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.reference.starts_with("PAY-"));
        assert!(!payment.is_successful());
        assert!(payment.completed_at.is_none());
    }
}
