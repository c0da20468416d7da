//! Checkout configuration.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Pricing knobs for order creation and catalog reads.
///
/// Tax rate and shipping fees are configuration, not literals in the order
/// logic, so different deployments can price differently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Tax rate in basis points (1_000 = 10%).
    pub tax_rate_bps: u32,
    /// Orders with a subtotal at or above this ship free.
    pub free_shipping_threshold: Money,
    /// Flat shipping fee below the threshold.
    pub flat_shipping_fee: Money,
    /// How many products the featured listing returns.
    pub featured_limit: usize,
    /// Currency all orders are priced in.
    pub currency: Currency,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            tax_rate_bps: 1_000,
            free_shipping_threshold: Money::new(10_000, Currency::USD),
            flat_shipping_fee: Money::new(1_000, Currency::USD),
            featured_limit: 8,
            currency: Currency::USD,
        }
    }
}
