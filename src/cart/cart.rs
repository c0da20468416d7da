//! Cart and cart line types.

use crate::ids::{ProductId, UserId};
use serde::{Deserialize, Serialize};

/// A shopping cart. Each user has at most one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Owning user.
    pub user_id: UserId,
    /// Lines in the cart, one per product.
    pub lines: Vec<CartLine>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart for a user.
    pub fn new(user_id: UserId) -> Self {
        let now = current_timestamp();
        Self {
            user_id,
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Get the line for a product, if present.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Get a mutable line for a product, if present.
    pub fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| &l.product_id == product_id)
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove_line(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        let removed = self.lines.len() < len_before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Delete every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.touch();
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

/// A line in the cart. Unique per (cart, product).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity, always >= 1 while the line exists.
    pub quantity: i64,
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

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new(UserId::new("u1"));
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_line_lookup_and_removal() {
        let mut cart = Cart::new(UserId::new("u1"));
        let product = ProductId::new("p1");
        cart.lines.push(CartLine {
            product_id: product.clone(),
            quantity: 3,
        });

        assert_eq!(cart.line(&product).map(|l| l.quantity), Some(3));
        assert_eq!(cart.item_count(), 3);
        assert!(cart.remove_line(&product));
        assert!(!cart.remove_line(&product));
        assert!(cart.is_empty());
    }
}
