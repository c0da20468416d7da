//! E-commerce domain types and services for a storefront backend.
//!
//! This crate provides the business core of an online shop:
//!
//! - **Catalog**: products, reviews, filtered reads, derived ratings
//! - **Cart**: per-user cart with live-priced totals
//! - **Address book**: saved shipping addresses with a single default
//! - **Orders**: cart-to-order conversion, stock adjustment, cancellation
//! - **Payments**: mock gateway settlement, refunds with full cascade
//!
//! HTTP routing, request/response shaping, and real persistence live outside
//! this crate. Storage is reached through the [`store::Store`] trait; the
//! bundled [`store::MemoryStore`] is enough for tests and demos.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront::prelude::*;
//!
//! let mut store = MemoryStore::new();
//! let cfg = CheckoutConfig::default();
//! let user = UserId::new("user-1");
//!
//! cart::add_to_cart(&mut store, &user, &product_id, 2)?;
//! let order = orders::create_order_from_cart(&mut store, &cfg, &user, shipping, "")?;
//! let payment = payments::create_payment(
//!     &mut store, &user, &order.id, PaymentMethod::Demo, serde_json::json!({}),
//! )?;
//! payments::process_payment(&mut store, &MockGateway, &payment.id)?;
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod config;
pub mod store;

pub mod address;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod payments;

pub use config::CheckoutConfig;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::CheckoutConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::store::{MemoryStore, Store};

    // Catalog
    pub use crate::catalog::{Category, Product, Review};

    // Cart
    pub use crate::cart::{Cart, CartLine};

    // Addresses
    pub use crate::address::{NewAddress, ShippingAddress};

    // Orders
    pub use crate::orders::{
        Order, OrderLine, OrderPaymentStatus, OrderStatus, ShippingDetails,
    };

    // Payments
    pub use crate::payments::{
        ChargeOutcome, GatewayReceipt, MockGateway, Payment, PaymentGateway, PaymentMethod,
        PaymentStatus, Refund, RefundStatus,
    };
}
