//! Cart services.
//!
//! Adding to the cart deliberately skips stock checks; availability is only
//! enforced when the cart becomes an order, so a cart can briefly hold more
//! than the shop can ship.

use super::cart::{Cart, CartLine};
use crate::error::CommerceError;
use crate::ids::{ProductId, UserId};
use crate::money::Money;
use crate::store::Store;

/// Get the user's cart, creating an empty one if missing.
pub fn get_or_create_cart<'a>(store: &'a mut impl Store, user_id: &UserId) -> &'a Cart {
    store.ensure_cart(user_id)
}

/// Add a product to the cart, or bump the quantity of an existing line.
pub fn add_to_cart(
    store: &mut impl Store,
    user_id: &UserId,
    product_id: &ProductId,
    quantity: i64,
) -> Result<CartLine, CommerceError> {
    if quantity < 1 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    if store.product(product_id).is_none() {
        return Err(CommerceError::ProductNotFound(product_id.to_string()));
    }

    let cart = store.ensure_cart(user_id);
    let line = match cart.line_mut(product_id) {
        Some(line) => {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            line.clone()
        }
        None => {
            let line = CartLine {
                product_id: product_id.clone(),
                quantity,
            };
            cart.lines.push(line.clone());
            line
        }
    };
    cart.touch();
    tracing::debug!(user = %user_id, product = %product_id, quantity, "added to cart");
    Ok(line)
}

/// Set the quantity of a cart line. Zero deletes the line; negative values
/// are invalid input.
pub fn set_line_quantity(
    store: &mut impl Store,
    user_id: &UserId,
    product_id: &ProductId,
    quantity: i64,
) -> Result<Option<CartLine>, CommerceError> {
    if quantity < 0 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }

    let cart = store.ensure_cart(user_id);
    if cart.line(product_id).is_none() {
        return Err(CommerceError::ItemNotInCart(product_id.to_string()));
    }

    if quantity == 0 {
        cart.remove_line(product_id);
        return Ok(None);
    }

    let line = cart
        .line_mut(product_id)
        .ok_or_else(|| CommerceError::ItemNotInCart(product_id.to_string()))?;
    line.quantity = quantity;
    let line = line.clone();
    cart.touch();
    Ok(Some(line))
}

/// Remove a product from the cart.
pub fn remove_from_cart(
    store: &mut impl Store,
    user_id: &UserId,
    product_id: &ProductId,
) -> Result<(), CommerceError> {
    let cart = store.ensure_cart(user_id);
    if cart.remove_line(product_id) {
        Ok(())
    } else {
        Err(CommerceError::ItemNotInCart(product_id.to_string()))
    }
}

/// Delete every line in the user's cart.
pub fn clear_cart(store: &mut impl Store, user_id: &UserId) {
    if let Some(cart) = store.cart_mut(user_id) {
        cart.clear();
    }
}

/// Lines currently in the user's cart.
pub fn cart_lines(store: &impl Store, user_id: &UserId) -> Vec<CartLine> {
    store
        .cart(user_id)
        .map(|c| c.lines.clone())
        .unwrap_or_default()
}

/// Total cart price at live catalog prices.
pub fn cart_total_price(
    store: &impl Store,
    user_id: &UserId,
    currency: crate::money::Currency,
) -> Result<Money, CommerceError> {
    let Some(cart) = store.cart(user_id) else {
        return Ok(Money::zero(currency));
    };

    let mut total = Money::zero(currency);
    for line in &cart.lines {
        let product = store
            .product(&line.product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(line.product_id.to_string()))?;
        let line_total = product
            .price
            .try_mul(line.quantity)
            .ok_or(CommerceError::Overflow)?;
        total = total.try_add(&line_total).ok_or(CommerceError::Overflow)?;
    }
    Ok(total)
}

/// Total item count in the user's cart.
pub fn cart_item_count(store: &impl Store, user_id: &UserId) -> i64 {
    store.cart(user_id).map(|c| c.item_count()).unwrap_or(0)
}
