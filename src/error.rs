//! Commerce error types.

use crate::money::Money;
use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Owner-scoped lookups report a plain `*NotFound` whether the entity is
/// absent or merely owned by someone else, so callers cannot probe for
/// existence.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Order not found (or not owned by the caller).
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Payment not found.
    #[error("Payment not found: {0}")]
    PaymentNotFound(String),

    /// Refund not found.
    #[error("Refund not found: {0}")]
    RefundNotFound(String),

    /// Shipping address not found (or not owned by the caller).
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Cart is missing or has no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Not enough stock to satisfy an order line.
    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: i64,
        available: i64,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Invalid rating value.
    #[error("Invalid rating: {0} (must be 1-5)")]
    InvalidRating(u8),

    /// Status string outside the fixed enumeration.
    #[error("Invalid status: {given} (must be one of: {valid})")]
    InvalidStatus { given: String, valid: &'static str },

    /// State machine rule violated.
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// A payment already exists for this order.
    #[error("Payment already exists for order {0}")]
    DuplicatePayment(String),

    /// A refund already exists for this payment.
    #[error("Refund already exists for payment {0}")]
    DuplicateRefund(String),

    /// A review already exists for this (product, user) pair.
    #[error("Review already exists for product {0}")]
    DuplicateReview(String),

    /// Only completed payments can be refunded.
    #[error("Can only refund completed payments (payment is {0})")]
    NotRefundable(String),

    /// Refund amount over the payment amount.
    #[error("Refund amount {requested} exceeds payment amount {available}")]
    RefundExceedsPayment { requested: Money, available: Money },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),
}
