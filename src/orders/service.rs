//! Order services: cart-to-order conversion, cancellation, status updates,
//! owner-scoped reads.

use super::order::{Order, OrderLine, OrderPaymentStatus, OrderStatus, ShippingDetails};
use crate::cart::CartLine;
use crate::config::CheckoutConfig;
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId, UserId};
use crate::money::Money;
use crate::store::Store;
use std::cmp::Reverse;

const VALID_ORDER_STATUSES: &str = "pending, processing, shipped, delivered, cancelled";
const VALID_PAYMENT_STATUSES: &str = "pending, completed, failed, refunded";

/// Convert the user's cart into a pending order.
///
/// Validates everything (cart non-empty, stock per line) before the first
/// write, so a failure leaves the cart, stock, and order book untouched.
/// On success the order lines snapshot live product prices, each product's
/// stock drops by the ordered quantity, and the cart is emptied.
pub fn create_order_from_cart(
    store: &mut impl Store,
    cfg: &CheckoutConfig,
    user_id: &UserId,
    shipping: ShippingDetails,
    notes: impl Into<String>,
) -> Result<Order, CommerceError> {
    let cart_lines: Vec<CartLine> = match store.cart(user_id) {
        Some(cart) if !cart.is_empty() => cart.lines.clone(),
        _ => return Err(CommerceError::EmptyCart),
    };

    // Check stock line by line; the first failing line is the one reported.
    let mut order_lines = Vec::with_capacity(cart_lines.len());
    for line in &cart_lines {
        let product = store
            .product(&line.product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(line.product_id.to_string()))?;
        if !product.can_fulfill(line.quantity) {
            return Err(CommerceError::InsufficientStock {
                product: product.name.clone(),
                requested: line.quantity,
                available: product.stock,
            });
        }
        order_lines.push(OrderLine {
            product_id: line.product_id.clone(),
            product_name: product.name.clone(),
            quantity: line.quantity,
            unit_price: product.price,
        });
    }

    let mut subtotal = Money::zero(cfg.currency);
    for line in &order_lines {
        let line_total = line.line_total().ok_or(CommerceError::Overflow)?;
        subtotal = subtotal
            .try_add(&line_total)
            .ok_or(CommerceError::Overflow)?;
    }
    let tax = subtotal
        .percent_bps(cfg.tax_rate_bps)
        .ok_or(CommerceError::Overflow)?;
    let shipping_cost = if subtotal.amount_cents >= cfg.free_shipping_threshold.amount_cents {
        Money::zero(cfg.currency)
    } else {
        cfg.flat_shipping_fee
    };
    let total = tax
        .try_add(&subtotal)
        .and_then(|t| t.try_add(&shipping_cost))
        .ok_or(CommerceError::Overflow)?;

    // All checks passed; now write.
    for line in &order_lines {
        if let Some(product) = store.product_mut(&line.product_id) {
            product.stock -= line.quantity;
        }
    }
    if let Some(cart) = store.cart_mut(user_id) {
        cart.clear();
    }

    let order = Order::new(
        user_id.clone(),
        shipping,
        order_lines,
        subtotal,
        tax,
        shipping_cost,
        total,
        notes.into(),
    );
    store.insert_order(order.clone());
    tracing::info!(order = %order.order_number, total = %order.total, "order created");
    Ok(order)
}

/// Cancel an order that has not shipped yet, restoring stock.
///
/// Sets status to `cancelled` and payment status to `refunded`.
pub fn cancel_order(
    store: &mut impl Store,
    user_id: &UserId,
    order_id: &OrderId,
) -> Result<Order, CommerceError> {
    let order = store
        .order(order_id)
        .filter(|o| &o.user_id == user_id)
        .ok_or_else(|| CommerceError::OrderNotFound(order_id.to_string()))?;

    if !order.status.can_cancel() {
        return Err(CommerceError::InvalidTransition {
            from: order.status.as_str().to_string(),
            to: "cancelled".to_string(),
        });
    }

    let restock: Vec<(ProductId, i64)> = order
        .lines
        .iter()
        .map(|l| (l.product_id.clone(), l.quantity))
        .collect();
    for (product_id, quantity) in &restock {
        if let Some(product) = store.product_mut(product_id) {
            product.stock += quantity;
        }
    }

    let order = store
        .order_mut(order_id)
        .ok_or_else(|| CommerceError::OrderNotFound(order_id.to_string()))?;
    order.status = OrderStatus::Cancelled;
    order.payment_status = OrderPaymentStatus::Refunded;
    order.touch();
    let order = order.clone();
    tracing::info!(order = %order.order_number, "order cancelled");
    Ok(order)
}

/// Administrative status override. No business rule beyond membership in the
/// fixed enumeration.
pub fn update_order_status(
    store: &mut impl Store,
    order_id: &OrderId,
    status: &str,
) -> Result<Order, CommerceError> {
    let parsed = OrderStatus::from_str(status).ok_or(CommerceError::InvalidStatus {
        given: status.to_string(),
        valid: VALID_ORDER_STATUSES,
    })?;
    let order = store
        .order_mut(order_id)
        .ok_or_else(|| CommerceError::OrderNotFound(order_id.to_string()))?;
    order.status = parsed;
    order.touch();
    Ok(order.clone())
}

/// Administrative payment-status override.
///
/// `cancelled` is not in the accepted set; that value is only written by
/// payment cancellation itself.
pub fn update_payment_status(
    store: &mut impl Store,
    order_id: &OrderId,
    payment_status: &str,
) -> Result<Order, CommerceError> {
    let parsed = OrderPaymentStatus::from_str(payment_status)
        .filter(|p| *p != OrderPaymentStatus::Cancelled)
        .ok_or(CommerceError::InvalidStatus {
            given: payment_status.to_string(),
            valid: VALID_PAYMENT_STATUSES,
        })?;
    let order = store
        .order_mut(order_id)
        .ok_or_else(|| CommerceError::OrderNotFound(order_id.to_string()))?;
    order.payment_status = parsed;
    order.touch();
    Ok(order.clone())
}

/// Look up an order by id, scoped to its owner.
pub fn order_by_id<'a>(
    store: &'a impl Store,
    user_id: &UserId,
    order_id: &OrderId,
) -> Result<&'a Order, CommerceError> {
    store
        .order(order_id)
        .filter(|o| &o.user_id == user_id)
        .ok_or_else(|| CommerceError::OrderNotFound(order_id.to_string()))
}

/// Look up an order by order number, scoped to its owner.
pub fn order_by_number<'a>(
    store: &'a impl Store,
    user_id: &UserId,
    order_number: &str,
) -> Result<&'a Order, CommerceError> {
    store
        .order_by_number(order_number)
        .filter(|o| &o.user_id == user_id)
        .ok_or_else(|| CommerceError::OrderNotFound(order_number.to_string()))
}

/// Every order a user has placed, newest first.
pub fn user_orders<'a>(store: &'a impl Store, user_id: &UserId) -> Vec<&'a Order> {
    let mut orders = store.orders_for(user_id);
    orders.sort_by_key(|o| Reverse(o.created_at));
    orders
}
