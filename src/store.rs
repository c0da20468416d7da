//! Storage access.
//!
//! Business rules never touch a database directly; they go through [`Store`].
//! [`MemoryStore`] is the bundled implementation, good for tests and demos. A
//! SQL-backed implementation would satisfy the same trait and run each
//! service call inside one transaction; the services are written so every
//! fallible check happens before the first write, keeping each operation
//! all-or-nothing on any backend.

use crate::address::ShippingAddress;
use crate::cart::Cart;
use crate::catalog::{Product, Review};
use crate::error::CommerceError;
use crate::ids::{AddressId, OrderId, PaymentId, ProductId, RefundId, UserId};
use crate::orders::Order;
use crate::payments::{Payment, Refund};
use std::collections::HashMap;

/// The reads and writes the storefront services need.
///
/// Uniqueness rules the persistent store must enforce: one cart per user, one
/// payment per order, one refund per payment, one review per (product, user).
pub trait Store {
    // Catalog
    fn products(&self) -> Vec<&Product>;
    fn product(&self, id: &ProductId) -> Option<&Product>;
    fn product_mut(&mut self, id: &ProductId) -> Option<&mut Product>;
    fn insert_product(&mut self, product: Product);
    fn reviews_for(&self, product_id: &ProductId) -> Vec<&Review>;
    fn insert_review(&mut self, review: Review) -> Result<(), CommerceError>;

    // Carts
    fn cart(&self, user_id: &UserId) -> Option<&Cart>;
    fn cart_mut(&mut self, user_id: &UserId) -> Option<&mut Cart>;
    fn ensure_cart(&mut self, user_id: &UserId) -> &mut Cart;

    // Addresses
    fn addresses_for(&self, user_id: &UserId) -> Vec<&ShippingAddress>;
    fn addresses_for_mut(&mut self, user_id: &UserId) -> Vec<&mut ShippingAddress>;
    fn address(&self, user_id: &UserId, id: &AddressId) -> Option<&ShippingAddress>;
    fn address_mut(&mut self, user_id: &UserId, id: &AddressId) -> Option<&mut ShippingAddress>;
    fn insert_address(&mut self, address: ShippingAddress);
    fn remove_address(&mut self, user_id: &UserId, id: &AddressId) -> bool;

    // Orders
    fn order(&self, id: &OrderId) -> Option<&Order>;
    fn order_mut(&mut self, id: &OrderId) -> Option<&mut Order>;
    fn order_by_number(&self, number: &str) -> Option<&Order>;
    fn orders_for(&self, user_id: &UserId) -> Vec<&Order>;
    fn insert_order(&mut self, order: Order);

    // Payments
    fn payment(&self, id: &PaymentId) -> Option<&Payment>;
    fn payment_mut(&mut self, id: &PaymentId) -> Option<&mut Payment>;
    fn payment_for_order(&self, order_id: &OrderId) -> Option<&Payment>;
    fn insert_payment(&mut self, payment: Payment) -> Result<(), CommerceError>;

    // Refunds
    fn refund(&self, id: &RefundId) -> Option<&Refund>;
    fn refund_mut(&mut self, id: &RefundId) -> Option<&mut Refund>;
    fn refund_for_payment(&self, payment_id: &PaymentId) -> Option<&Refund>;
    fn insert_refund(&mut self, refund: Refund) -> Result<(), CommerceError>;
}

/// In-memory [`Store`] implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    products: Vec<Product>,
    reviews: Vec<Review>,
    carts: HashMap<UserId, Cart>,
    addresses: Vec<ShippingAddress>,
    orders: Vec<Order>,
    payments: Vec<Payment>,
    refunds: Vec<Refund>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn products(&self) -> Vec<&Product> {
        self.products.iter().collect()
    }

    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    fn product_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| &p.id == id)
    }

    fn insert_product(&mut self, product: Product) {
        self.products.push(product);
    }

    fn reviews_for(&self, product_id: &ProductId) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|r| &r.product_id == product_id)
            .collect()
    }

    fn insert_review(&mut self, review: Review) -> Result<(), CommerceError> {
        if let Some(user_id) = &review.user_id {
            let duplicate = self.reviews.iter().any(|r| {
                r.product_id == review.product_id && r.user_id.as_ref() == Some(user_id)
            });
            if duplicate {
                return Err(CommerceError::DuplicateReview(
                    review.product_id.to_string(),
                ));
            }
        }
        self.reviews.push(review);
        Ok(())
    }

    fn cart(&self, user_id: &UserId) -> Option<&Cart> {
        self.carts.get(user_id)
    }

    fn cart_mut(&mut self, user_id: &UserId) -> Option<&mut Cart> {
        self.carts.get_mut(user_id)
    }

    fn ensure_cart(&mut self, user_id: &UserId) -> &mut Cart {
        self.carts
            .entry(user_id.clone())
            .or_insert_with(|| Cart::new(user_id.clone()))
    }

    fn addresses_for(&self, user_id: &UserId) -> Vec<&ShippingAddress> {
        self.addresses
            .iter()
            .filter(|a| &a.user_id == user_id)
            .collect()
    }

    fn addresses_for_mut(&mut self, user_id: &UserId) -> Vec<&mut ShippingAddress> {
        self.addresses
            .iter_mut()
            .filter(|a| &a.user_id == user_id)
            .collect()
    }

    fn address(&self, user_id: &UserId, id: &AddressId) -> Option<&ShippingAddress> {
        self.addresses
            .iter()
            .find(|a| &a.id == id && &a.user_id == user_id)
    }

    fn address_mut(&mut self, user_id: &UserId, id: &AddressId) -> Option<&mut ShippingAddress> {
        self.addresses
            .iter_mut()
            .find(|a| &a.id == id && &a.user_id == user_id)
    }

    fn insert_address(&mut self, address: ShippingAddress) {
        self.addresses.push(address);
    }

    fn remove_address(&mut self, user_id: &UserId, id: &AddressId) -> bool {
        let len_before = self.addresses.len();
        self.addresses
            .retain(|a| !(&a.id == id && &a.user_id == user_id));
        self.addresses.len() < len_before
    }

    fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    fn order_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| &o.id == id)
    }

    fn order_by_number(&self, number: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.order_number == number)
    }

    fn orders_for(&self, user_id: &UserId) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| &o.user_id == user_id)
            .collect()
    }

    fn insert_order(&mut self, order: Order) {
        self.orders.push(order);
    }

    fn payment(&self, id: &PaymentId) -> Option<&Payment> {
        self.payments.iter().find(|p| &p.id == id)
    }

    fn payment_mut(&mut self, id: &PaymentId) -> Option<&mut Payment> {
        self.payments.iter_mut().find(|p| &p.id == id)
    }

    fn payment_for_order(&self, order_id: &OrderId) -> Option<&Payment> {
        self.payments.iter().find(|p| &p.order_id == order_id)
    }

    fn insert_payment(&mut self, payment: Payment) -> Result<(), CommerceError> {
        if self.payment_for_order(&payment.order_id).is_some() {
            return Err(CommerceError::DuplicatePayment(
                payment.order_id.to_string(),
            ));
        }
        self.payments.push(payment);
        Ok(())
    }

    fn refund(&self, id: &RefundId) -> Option<&Refund> {
        self.refunds.iter().find(|r| &r.id == id)
    }

    fn refund_mut(&mut self, id: &RefundId) -> Option<&mut Refund> {
        self.refunds.iter_mut().find(|r| &r.id == id)
    }

    fn refund_for_payment(&self, payment_id: &PaymentId) -> Option<&Refund> {
        self.refunds.iter().find(|r| &r.payment_id == payment_id)
    }

    fn insert_refund(&mut self, refund: Refund) -> Result<(), CommerceError> {
        if self.refund_for_payment(&refund.payment_id).is_some() {
            return Err(CommerceError::DuplicateRefund(
                refund.payment_id.to_string(),
            ));
        }
        self.refunds.push(refund);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::money::{Currency, Money};
    use crate::payments::PaymentMethod;

    #[test]
    fn test_product_round_trip() {
        let mut store = MemoryStore::new();
        let product = Product::new(
            "Cap",
            Money::new(1_500, Currency::USD),
            Category::Accessories,
            4,
        );
        let id = product.id.clone();
        store.insert_product(product);

        assert_eq!(store.products().len(), 1);
        assert_eq!(store.product(&id).map(|p| p.stock), Some(4));
        if let Some(p) = store.product_mut(&id) {
            p.stock = 2;
        }
        assert_eq!(store.product(&id).map(|p| p.stock), Some(2));
    }

    #[test]
    fn test_ensure_cart_is_idempotent() {
        let mut store = MemoryStore::new();
        let user = UserId::new("u1");
        store.ensure_cart(&user);
        store.ensure_cart(&user);
        assert!(store.cart(&user).is_some());
    }

    #[test]
    fn test_one_payment_per_order() {
        let mut store = MemoryStore::new();
        let order_id = OrderId::new("o1");
        let make = || {
            Payment::new(
                OrderId::new("o1"),
                UserId::new("u1"),
                PaymentMethod::Card,
                Money::new(100, Currency::USD),
                serde_json::json!({}),
            )
        };
        assert!(store.insert_payment(make()).is_ok());
        assert!(matches!(
            store.insert_payment(make()),
            Err(CommerceError::DuplicatePayment(_))
        ));
        assert!(store.payment_for_order(&order_id).is_some());
    }

    #[test]
    fn test_one_refund_per_payment() {
        let mut store = MemoryStore::new();
        let make = || {
            Refund::new(
                PaymentId::new("pay-1"),
                Money::new(100, Currency::USD),
                "test",
            )
        };
        assert!(store.insert_refund(make()).is_ok());
        assert!(matches!(
            store.insert_refund(make()),
            Err(CommerceError::DuplicateRefund(_))
        ));
    }

    #[test]
    fn test_one_review_per_user_per_product() {
        let mut store = MemoryStore::new();
        let make = || {
            Review::new(
                ProductId::new("p1"),
                Some(UserId::new("u1")),
                4,
                None,
            )
            .unwrap()
        };
        assert!(store.insert_review(make()).is_ok());
        assert!(matches!(
            store.insert_review(make()),
            Err(CommerceError::DuplicateReview(_))
        ));

        // anonymous reviews are not deduplicated
        let anon = Review::new(ProductId::new("p1"), None, 3, None).unwrap();
        assert!(store.insert_review(anon).is_ok());
        assert_eq!(store.reviews_for(&ProductId::new("p1")).len(), 2);
    }
}
