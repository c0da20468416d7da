//! Payment gateway abstraction.
//!
//! The services only ever talk to [`PaymentGateway`], so swapping the bundled
//! mock for a real (asynchronous, webhook-driven) integration touches nothing
//! in the order or refund logic: a real gateway would return
//! [`ChargeOutcome::Submitted`] from `charge` and completion would arrive
//! later through `mark_payment_completed` / `mark_payment_failed`.

use super::payment::{Payment, PaymentMethod};
use super::refund::Refund;

/// What happened to a submitted charge or refund.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    /// Funds settled synchronously.
    Settled,
    /// Accepted but settlement happens out of band (cash on delivery, or a
    /// real gateway awaiting its webhook).
    Submitted,
    /// Rejected by the gateway.
    Declined { reason: String },
}

/// Result of submitting a charge or refund to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReceipt {
    /// Gateway-side transaction identifier.
    pub transaction_id: String,
    /// Outcome of the submission.
    pub outcome: ChargeOutcome,
}

/// A payment gateway: submit charges and refunds, query transaction state.
pub trait PaymentGateway {
    /// Submit a charge for a payment.
    fn charge(&self, payment: &Payment) -> GatewayReceipt;

    /// Submit a refund.
    fn refund(&self, refund: &Refund) -> GatewayReceipt;

    /// Query the state of a previously submitted transaction.
    fn lookup(&self, transaction_id: &str) -> Option<ChargeOutcome>;
}

/// Mock gateway: settles everything synchronously and never declines.
/// Cash-on-delivery charges stay outstanding until delivery.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockGateway;

impl PaymentGateway for MockGateway {
    fn charge(&self, payment: &Payment) -> GatewayReceipt {
        match payment.method {
            PaymentMethod::Cod => GatewayReceipt {
                transaction_id: format!("COD-{}", payment.reference),
                outcome: ChargeOutcome::Submitted,
            },
            PaymentMethod::Demo => GatewayReceipt {
                transaction_id: format!("DEMO-{}", payment.reference),
                outcome: ChargeOutcome::Settled,
            },
            _ => GatewayReceipt {
                transaction_id: format!("TXN-{}", payment.reference),
                outcome: ChargeOutcome::Settled,
            },
        }
    }

    fn refund(&self, refund: &Refund) -> GatewayReceipt {
        GatewayReceipt {
            transaction_id: format!("REFUND-{}", refund.reference),
            outcome: ChargeOutcome::Settled,
        }
    }

    fn lookup(&self, _transaction_id: &str) -> Option<ChargeOutcome> {
        // The mock has no out-of-band settlement to wait for.
        Some(ChargeOutcome::Settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{OrderId, PaymentId, UserId};
    use crate::money::{Currency, Money};

    fn payment(method: PaymentMethod) -> Payment {
        Payment::new(
            OrderId::new("o1"),
            UserId::new("u1"),
            method,
            Money::new(1_000, Currency::USD),
            serde_json::json!({}),
        )
    }

    #[test]
    fn test_demo_charge_settles() {
        let receipt = MockGateway.charge(&payment(PaymentMethod::Demo));
        assert_eq!(receipt.outcome, ChargeOutcome::Settled);
        assert!(receipt.transaction_id.starts_with("DEMO-PAY-"));
    }

    #[test]
    fn test_cod_charge_stays_outstanding() {
        let receipt = MockGateway.charge(&payment(PaymentMethod::Cod));
        assert_eq!(receipt.outcome, ChargeOutcome::Submitted);
        assert!(receipt.transaction_id.starts_with("COD-PAY-"));
    }

    #[test]
    fn test_card_charge_settles_with_txn_prefix() {
        let receipt = MockGateway.charge(&payment(PaymentMethod::Card));
        assert_eq!(receipt.outcome, ChargeOutcome::Settled);
        assert!(receipt.transaction_id.starts_with("TXN-PAY-"));
    }

    #[test]
    fn test_refund_receipt() {
        let refund = Refund::new(
            PaymentId::new("pay-1"),
            Money::new(1_000, Currency::USD),
            "",
        );
        let receipt = MockGateway.refund(&refund);
        assert_eq!(receipt.outcome, ChargeOutcome::Settled);
        assert!(receipt.transaction_id.starts_with("REFUND-REF-"));
    }

    #[test]
    fn test_lookup_always_settled() {
        assert_eq!(MockGateway.lookup("TXN-x"), Some(ChargeOutcome::Settled));
    }
}
