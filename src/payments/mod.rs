//! Payment lifecycle: mock gateway settlement, cancellation, refunds.

mod gateway;
mod payment;
mod refund;
mod service;

pub use gateway::{ChargeOutcome, GatewayReceipt, MockGateway, PaymentGateway};
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use refund::{Refund, RefundStatus};
pub use service::{
    cancel_payment, create_payment, create_refund, mark_payment_completed, mark_payment_failed,
    payment_for_order, process_payment, process_refund,
};
