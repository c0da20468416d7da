//! Product catalog: products, reviews, and filtered reads.

mod product;
mod queries;

pub use product::{Category, Product, Review, MAX_RATING, MIN_RATING};
pub use queries::{
    all_products, average_rating, featured_products, filter_by_category, filter_by_price,
    product_by_id, review_count, reviews_for_product, search_products, submit_review,
};
