//! Shopping cart: one mutable cart per user.

mod cart;
mod service;

pub use cart::{Cart, CartLine};
pub use service::{
    add_to_cart, cart_item_count, cart_lines, cart_total_price, clear_cart, get_or_create_cart,
    remove_from_cart, set_line_quantity,
};
