//! Order lifecycle: cart-to-order conversion, status tracking, cancellation.

mod order;
mod service;

pub use order::{Order, OrderLine, OrderPaymentStatus, OrderStatus, ShippingDetails};
pub use service::{
    cancel_order, create_order_from_cart, order_by_id, order_by_number, update_order_status,
    update_payment_status, user_orders,
};
