//! Refund types.

use crate::ids::{generate_refund_reference, PaymentId, RefundId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Refund status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RefundStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl RefundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundStatus::Pending => "pending",
            RefundStatus::Processing => "processing",
            RefundStatus::Completed => "completed",
            RefundStatus::Failed => "failed",
            RefundStatus::Cancelled => "cancelled",
        }
    }
}

/// A refund against a payment. Exactly one per payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Refund {
    /// Unique refund identifier.
    pub id: RefundId,
    /// Externally visible reference token (`REF-...`).
    pub reference: String,
    /// Payment being refunded.
    pub payment_id: PaymentId,
    /// Amount refunded, never more than the payment amount.
    pub amount: Money,
    /// Refund status.
    pub status: RefundStatus,
    /// Why the refund was requested.
    pub reason: String,
    /// Gateway transaction id, set once processed.
    pub transaction_id: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
    /// Unix timestamp of completion, if completed.
    pub completed_at: Option<i64>,
}

impl Refund {
    /// Create a new pending refund.
    pub fn new(payment_id: PaymentId, amount: Money, reason: impl Into<String>) -> Self {
        let now = current_timestamp();
        Self {
            id: RefundId::generate(),
            reference: generate_refund_reference(),
            payment_id,
            amount,
            status: RefundStatus::Pending,
            reason: reason.into(),
            transaction_id: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }

    pub(crate) fn mark_completed_now(&mut self) {
        self.status = RefundStatus::Completed;
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
    fn test_new_refund_is_pending() {
        let refund = Refund::new(
            PaymentId::new("pay-1"),
            Money::new(2_500, Currency::USD),
            "damaged item",
        );
        assert_eq!(refund.status, RefundStatus::Pending);
        assert!(refund.reference.starts_with("REF-"));
        assert!(refund.transaction_id.is_none());
    }
}
