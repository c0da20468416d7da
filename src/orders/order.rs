//! Order types.

use crate::ids::{generate_order_number, OrderId, ProductId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Order fulfillment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order placed, awaiting payment/processing.
    #[default]
    Pending,
    /// Order confirmed and being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Check if the order can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

/// Payment status tracked on the order, independent of fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderPaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Cancelled,
    Refunded,
}

impl OrderPaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderPaymentStatus::Pending => "pending",
            OrderPaymentStatus::Completed => "completed",
            OrderPaymentStatus::Failed => "failed",
            OrderPaymentStatus::Cancelled => "cancelled",
            OrderPaymentStatus::Refunded => "refunded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(OrderPaymentStatus::Pending),
            "completed" => Some(OrderPaymentStatus::Completed),
            "failed" => Some(OrderPaymentStatus::Failed),
            "cancelled" => Some(OrderPaymentStatus::Cancelled),
            "refunded" => Some(OrderPaymentStatus::Refunded),
            _ => None,
        }
    }
}

/// Shipping destination captured at order time.
///
/// A denormalized snapshot, not a reference into the address book; later
/// address edits never touch an existing order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingDetails {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub phone_number: String,
}

/// A placed order with immutable line items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number (`ORD-...`).
    pub order_number: String,
    /// Owning user.
    pub user_id: UserId,
    /// Fulfillment status.
    pub status: OrderStatus,
    /// Payment status.
    pub payment_status: OrderPaymentStatus,
    /// Shipping snapshot.
    pub shipping: ShippingDetails,
    /// Items in the order. Never modified after creation.
    pub lines: Vec<OrderLine>,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Shipping cost.
    pub shipping_cost: Money,
    /// subtotal + tax + shipping_cost.
    pub total: Money,
    /// Customer note.
    pub notes: String,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Order {
    /// Build a new pending order. Totals are computed by the order service.
    pub fn new(
        user_id: UserId,
        shipping: ShippingDetails,
        lines: Vec<OrderLine>,
        subtotal: Money,
        tax: Money,
        shipping_cost: Money,
        total: Money,
        notes: String,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: OrderId::generate(),
            order_number: generate_order_number(),
            user_id,
            status: OrderStatus::Pending,
            payment_status: OrderPaymentStatus::Pending,
            shipping,
            lines,
            subtotal,
            tax,
            shipping_cost,
            total,
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Total item count.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

/// A line in an order. Price is a snapshot taken at order time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Product ordered.
    pub product_id: ProductId,
    /// Product name at order time.
    pub product_name: String,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit price at order time, independent of later price changes.
    pub unit_price: Money,
}

impl OrderLine {
    /// Line total (unit price x quantity). `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.try_mul(self.quantity)
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
    fn test_status_can_cancel() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Processing.can_cancel());
        assert!(!OrderStatus::Shipped.can_cancel());
        assert!(!OrderStatus::Delivered.can_cancel());
        assert!(!OrderStatus::Cancelled.can_cancel());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(OrderStatus::from_str("Shipped"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::from_str("unknown"), None);
        assert_eq!(
            OrderPaymentStatus::from_str("refunded"),
            Some(OrderPaymentStatus::Refunded)
        );
    }

    #[test]
    fn test_line_total() {
        let line = OrderLine {
            product_id: ProductId::new("p1"),
            product_name: "Boots".to_string(),
            quantity: 3,
            unit_price: Money::new(2_000, Currency::USD),
        };
        assert_eq!(line.line_total().unwrap().amount_cents, 6_000);
    }
}
