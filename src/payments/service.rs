//! Payment and refund services.
//!
//! Settlement goes through a [`PaymentGateway`]; the bundled mock settles
//! synchronously. Process/cancel/mark operations report `(success, message)`
//! pairs for business outcomes and reserve `Err` for rule violations, so a
//! "payment already completed" retry is not an error the caller has to
//! unwind.

use super::gateway::{ChargeOutcome, PaymentGateway};
use super::payment::{Payment, PaymentMethod, PaymentStatus};
use super::refund::{Refund, RefundStatus};
use crate::cart;
use crate::error::CommerceError;
use crate::ids::{OrderId, PaymentId, ProductId, RefundId, UserId};
use crate::money::Money;
use crate::orders::{OrderPaymentStatus, OrderStatus};
use crate::store::Store;

/// Create a pending payment for an order. The amount is the order total.
pub fn create_payment(
    store: &mut impl Store,
    user_id: &UserId,
    order_id: &OrderId,
    method: PaymentMethod,
    details: serde_json::Value,
) -> Result<Payment, CommerceError> {
    let order = store
        .order(order_id)
        .filter(|o| &o.user_id == user_id)
        .ok_or_else(|| CommerceError::OrderNotFound(order_id.to_string()))?;

    if store.payment_for_order(order_id).is_some() {
        return Err(CommerceError::DuplicatePayment(order.order_number.clone()));
    }

    let payment = Payment::new(
        order_id.clone(),
        user_id.clone(),
        method,
        order.total,
        details,
    );
    store.insert_payment(payment.clone())?;
    tracing::debug!(payment = %payment.reference, order = %order_id, "payment created");
    Ok(payment)
}

/// Submit a payment to the gateway and apply the outcome.
///
/// Every success branch also clears the payer's cart; order creation already
/// empties it, so this is an idempotent cleanup.
pub fn process_payment(
    store: &mut impl Store,
    gateway: &impl PaymentGateway,
    payment_id: &PaymentId,
) -> Result<(bool, String), CommerceError> {
    let payment = store
        .payment(payment_id)
        .ok_or_else(|| CommerceError::PaymentNotFound(payment_id.to_string()))?
        .clone();

    if payment.status == PaymentStatus::Completed {
        return Ok((false, "Payment already completed".to_string()));
    }

    let receipt = gateway.charge(&payment);
    match receipt.outcome {
        ChargeOutcome::Settled => {
            if let Some(p) = store.payment_mut(payment_id) {
                p.transaction_id = Some(receipt.transaction_id);
                p.mark_completed_now();
            }
            set_order_payment_state(
                store,
                &payment.order_id,
                OrderPaymentStatus::Completed,
                Some(OrderStatus::Processing),
            )?;
            cart::clear_cart(store, &payment.user_id);
            tracing::info!(payment = %payment.reference, "payment settled");
            Ok((
                true,
                format!(
                    "Payment completed successfully via {}",
                    payment.method.display_name()
                ),
            ))
        }
        ChargeOutcome::Submitted => {
            // Cash on delivery stays pending until the courier collects; a
            // real gateway parks here until its webhook lands.
            let next = if payment.method == PaymentMethod::Cod {
                PaymentStatus::Pending
            } else {
                PaymentStatus::Processing
            };
            if let Some(p) = store.payment_mut(payment_id) {
                p.transaction_id = Some(receipt.transaction_id);
                p.status = next;
                p.touch();
            }
            set_order_payment_state(
                store,
                &payment.order_id,
                OrderPaymentStatus::Pending,
                Some(OrderStatus::Processing),
            )?;
            cart::clear_cart(store, &payment.user_id);
            let message = if payment.method == PaymentMethod::Cod {
                "Cash on Delivery order confirmed".to_string()
            } else {
                "Payment submitted for processing".to_string()
            };
            Ok((true, message))
        }
        ChargeOutcome::Declined { reason } => {
            if let Some(p) = store.payment_mut(payment_id) {
                p.transaction_id = Some(receipt.transaction_id);
                p.status = PaymentStatus::Failed;
                p.failure_reason = Some(reason.clone());
                p.touch();
            }
            set_order_payment_state(store, &payment.order_id, OrderPaymentStatus::Failed, None)?;
            tracing::info!(payment = %payment.reference, %reason, "payment declined");
            Ok((false, reason))
        }
    }
}

/// Cancel a payment that has not settled. Completed payments must be
/// refunded instead.
pub fn cancel_payment(
    store: &mut impl Store,
    payment_id: &PaymentId,
) -> Result<(bool, String), CommerceError> {
    let payment = store
        .payment(payment_id)
        .ok_or_else(|| CommerceError::PaymentNotFound(payment_id.to_string()))?
        .clone();

    if payment.status == PaymentStatus::Completed {
        return Ok((
            false,
            "Cannot cancel completed payment. Use refund instead.".to_string(),
        ));
    }

    if let Some(p) = store.payment_mut(payment_id) {
        p.status = PaymentStatus::Cancelled;
        p.touch();
    }
    set_order_payment_state(store, &payment.order_id, OrderPaymentStatus::Cancelled, None)?;
    Ok((true, "Payment cancelled successfully".to_string()))
}

/// Directly mark a payment completed (manual completion or gateway webhook).
pub fn mark_payment_completed(
    store: &mut impl Store,
    payment_id: &PaymentId,
    transaction_id: Option<String>,
) -> Result<(bool, String), CommerceError> {
    let payment = store
        .payment(payment_id)
        .ok_or_else(|| CommerceError::PaymentNotFound(payment_id.to_string()))?
        .clone();

    if payment.status == PaymentStatus::Completed {
        return Ok((false, "Payment already completed".to_string()));
    }

    if let Some(p) = store.payment_mut(payment_id) {
        if let Some(txn) = transaction_id {
            p.transaction_id = Some(txn);
        }
        p.mark_completed_now();
    }
    set_order_payment_state(store, &payment.order_id, OrderPaymentStatus::Completed, None)?;
    Ok((true, "Payment marked as completed".to_string()))
}

/// Directly mark a payment failed, recording the reason.
pub fn mark_payment_failed(
    store: &mut impl Store,
    payment_id: &PaymentId,
    reason: Option<String>,
) -> Result<(bool, String), CommerceError> {
    let payment = store
        .payment(payment_id)
        .ok_or_else(|| CommerceError::PaymentNotFound(payment_id.to_string()))?
        .clone();

    if let Some(p) = store.payment_mut(payment_id) {
        p.status = PaymentStatus::Failed;
        p.failure_reason =
            Some(reason.unwrap_or_else(|| "Payment processing failed".to_string()));
        p.touch();
    }
    set_order_payment_state(store, &payment.order_id, OrderPaymentStatus::Failed, None)?;
    Ok((true, "Payment marked as failed".to_string()))
}

/// The payment for an order, scoped to the order's owner.
pub fn payment_for_order<'a>(
    store: &'a impl Store,
    user_id: &UserId,
    order_id: &OrderId,
) -> Option<&'a Payment> {
    store
        .order(order_id)
        .filter(|o| &o.user_id == user_id)
        .and_then(|o| store.payment_for_order(&o.id))
}

/// Create a pending refund against a completed payment. The amount defaults
/// to the full payment amount and can never exceed it.
pub fn create_refund(
    store: &mut impl Store,
    payment_id: &PaymentId,
    amount: Option<Money>,
    reason: impl Into<String>,
) -> Result<Refund, CommerceError> {
    let payment = store
        .payment(payment_id)
        .ok_or_else(|| CommerceError::PaymentNotFound(payment_id.to_string()))?;

    if payment.status != PaymentStatus::Completed {
        return Err(CommerceError::NotRefundable(
            payment.status.as_str().to_string(),
        ));
    }
    if store.refund_for_payment(payment_id).is_some() {
        return Err(CommerceError::DuplicateRefund(payment.reference.clone()));
    }

    let amount = amount.unwrap_or(payment.amount);
    if amount.currency != payment.amount.currency {
        return Err(CommerceError::CurrencyMismatch {
            expected: payment.amount.currency.code().to_string(),
            got: amount.currency.code().to_string(),
        });
    }
    if !amount.is_positive() {
        return Err(CommerceError::Validation(
            "Refund amount must be positive".to_string(),
        ));
    }
    if amount.amount_cents > payment.amount.amount_cents {
        return Err(CommerceError::RefundExceedsPayment {
            requested: amount,
            available: payment.amount,
        });
    }

    let refund = Refund::new(payment_id.clone(), amount, reason);
    store.insert_refund(refund.clone())?;
    tracing::debug!(refund = %refund.reference, payment = %payment_id, "refund created");
    Ok(refund)
}

/// Process a refund through the gateway and cascade the outcome: payment and
/// order become refunded, the order is cancelled, and every ordered unit
/// goes back into stock.
pub fn process_refund(
    store: &mut impl Store,
    gateway: &impl PaymentGateway,
    refund_id: &RefundId,
) -> Result<(bool, String), CommerceError> {
    let refund = store
        .refund(refund_id)
        .ok_or_else(|| CommerceError::RefundNotFound(refund_id.to_string()))?
        .clone();

    if refund.status == RefundStatus::Completed {
        return Ok((false, "Refund already completed".to_string()));
    }

    let payment = store
        .payment(&refund.payment_id)
        .ok_or_else(|| CommerceError::PaymentNotFound(refund.payment_id.to_string()))?
        .clone();

    if let Some(r) = store.refund_mut(refund_id) {
        r.status = RefundStatus::Processing;
        r.touch();
    }

    let receipt = gateway.refund(&refund);
    if let Some(r) = store.refund_mut(refund_id) {
        r.transaction_id = Some(receipt.transaction_id);
        r.mark_completed_now();
    }

    if let Some(p) = store.payment_mut(&refund.payment_id) {
        p.status = PaymentStatus::Refunded;
        p.touch();
    }
    set_order_payment_state(
        store,
        &payment.order_id,
        OrderPaymentStatus::Refunded,
        Some(OrderStatus::Cancelled),
    )?;

    // Put back exactly what the order took out.
    let restock: Vec<(ProductId, i64)> = store
        .order(&payment.order_id)
        .map(|o| {
            o.lines
                .iter()
                .map(|l| (l.product_id.clone(), l.quantity))
                .collect()
        })
        .unwrap_or_default();
    for (product_id, quantity) in &restock {
        if let Some(product) = store.product_mut(product_id) {
            product.stock += quantity;
        }
    }

    tracing::info!(refund = %refund.reference, payment = %payment.reference, "refund processed");
    Ok((true, "Refund processed successfully".to_string()))
}

fn set_order_payment_state(
    store: &mut impl Store,
    order_id: &OrderId,
    payment_status: OrderPaymentStatus,
    status: Option<OrderStatus>,
) -> Result<(), CommerceError> {
    let order = store
        .order_mut(order_id)
        .ok_or_else(|| CommerceError::OrderNotFound(order_id.to_string()))?;
    order.payment_status = payment_status;
    if let Some(status) = status {
        order.status = status;
    }
    order.touch();
    Ok(())
}
