//! Catalog read services and review submission.

use super::product::{Product, Review};
use crate::config::CheckoutConfig;
use crate::error::CommerceError;
use crate::ids::{ProductId, UserId};
use crate::money::Money;
use crate::store::Store;
use std::cmp::Reverse;

/// Every product, newest first.
pub fn all_products(store: &impl Store) -> Vec<&Product> {
    let mut products = store.products();
    products.sort_by_key(|p| Reverse(p.created_at));
    products
}

/// Look up a single product.
pub fn product_by_id<'a>(store: &'a impl Store, id: &ProductId) -> Option<&'a Product> {
    store.product(id)
}

/// Case-insensitive substring search over name and description.
pub fn search_products<'a>(store: &'a impl Store, query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    all_products(store)
        .into_iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .collect()
}

/// Products in a category.
pub fn filter_by_category(store: &impl Store, category: super::Category) -> Vec<&Product> {
    all_products(store)
        .into_iter()
        .filter(|p| p.category == category)
        .collect()
}

/// Products priced within an inclusive range.
pub fn filter_by_price(store: &impl Store, min: Money, max: Money) -> Vec<&Product> {
    all_products(store)
        .into_iter()
        .filter(|p| {
            p.price.currency == min.currency
                && p.price.amount_cents >= min.amount_cents
                && p.price.amount_cents <= max.amount_cents
        })
        .collect()
}

/// The first `featured_limit` active products, newest first.
pub fn featured_products<'a>(
    store: &'a impl Store,
    cfg: &CheckoutConfig,
) -> Vec<&'a Product> {
    all_products(store)
        .into_iter()
        .filter(|p| p.is_active)
        .take(cfg.featured_limit)
        .collect()
}

/// Reviews for a product, newest first.
pub fn reviews_for_product<'a>(store: &'a impl Store, id: &ProductId) -> Vec<&'a Review> {
    let mut reviews = store.reviews_for(id);
    reviews.sort_by_key(|r| Reverse(r.created_at));
    reviews
}

/// Number of reviews for a product.
pub fn review_count(store: &impl Store, id: &ProductId) -> usize {
    store.reviews_for(id).len()
}

/// Mean review rating, falling back to the product's stored default rating
/// when no reviews exist. `None` if the product does not exist.
pub fn average_rating(store: &impl Store, id: &ProductId) -> Option<f64> {
    let product = store.product(id)?;
    let reviews = store.reviews_for(id);
    if reviews.is_empty() {
        return Some(product.rating);
    }
    let sum: u32 = reviews.iter().map(|r| r.rating as u32).sum();
    Some(sum as f64 / reviews.len() as f64)
}

/// Submit a review for a product. One review per user per product.
pub fn submit_review(
    store: &mut impl Store,
    product_id: &ProductId,
    user_id: Option<UserId>,
    rating: u8,
    comment: Option<String>,
) -> Result<Review, CommerceError> {
    if store.product(product_id).is_none() {
        return Err(CommerceError::ProductNotFound(product_id.to_string()));
    }
    let review = Review::new(product_id.clone(), user_id, rating, comment)?;
    store.insert_review(review.clone())?;
    Ok(review)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::money::Currency;
    use crate::store::MemoryStore;

    fn seed(store: &mut MemoryStore) -> Vec<ProductId> {
        let mut ids = Vec::new();
        let specs = [
            ("Linen Shirt", 4_500, Category::Clothing, true, Some("breathable summer shirt")),
            ("Trail Runner", 9_900, Category::Shoes, true, Some("grippy trail shoe")),
            ("Leather Belt", 2_500, Category::Accessories, true, None),
            ("Retired Parka", 19_900, Category::Clothing, false, Some("discontinued")),
        ];
        for (name, cents, category, active, description) in specs {
            let mut product = Product::new(name, Money::new(cents, Currency::USD), category, 10);
            product.is_active = active;
            product.description = description.map(String::from);
            ids.push(product.id.clone());
            store.insert_product(product);
        }
        ids
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut store = MemoryStore::new();
        seed(&mut store);

        assert_eq!(search_products(&store, "LINEN").len(), 1);
        assert_eq!(search_products(&store, "shirt").len(), 1);
        // matches description too
        assert_eq!(search_products(&store, "GRIPPY").len(), 1);
        assert_eq!(search_products(&store, "sandals").len(), 0);
    }

    #[test]
    fn test_filter_by_category() {
        let mut store = MemoryStore::new();
        seed(&mut store);
        assert_eq!(filter_by_category(&store, Category::Clothing).len(), 2);
        assert_eq!(filter_by_category(&store, Category::Shoes).len(), 1);
    }

    #[test]
    fn test_filter_by_price_inclusive() {
        let mut store = MemoryStore::new();
        seed(&mut store);
        // bounds hit the belt (2500) and shirt (4500) exactly
        let hits = filter_by_price(
            &store,
            Money::new(2_500, Currency::USD),
            Money::new(4_500, Currency::USD),
        );
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_featured_excludes_inactive_and_caps() {
        let mut store = MemoryStore::new();
        seed(&mut store);

        let cfg = CheckoutConfig::default();
        let featured = featured_products(&store, &cfg);
        assert_eq!(featured.len(), 3);
        assert!(featured.iter().all(|p| p.is_active));

        let cfg = CheckoutConfig {
            featured_limit: 2,
            ..CheckoutConfig::default()
        };
        assert_eq!(featured_products(&store, &cfg).len(), 2);
    }

    #[test]
    fn test_average_rating_fallback_and_mean() {
        let mut store = MemoryStore::new();
        let ids = seed(&mut store);
        if let Some(p) = store.product_mut(&ids[0]) {
            p.rating = 3.5;
        }

        // no reviews yet: stored default
        assert_eq!(average_rating(&store, &ids[0]), Some(3.5));

        submit_review(&mut store, &ids[0], Some(UserId::new("u1")), 5, None).unwrap();
        submit_review(&mut store, &ids[0], Some(UserId::new("u2")), 4, None).unwrap();
        assert_eq!(average_rating(&store, &ids[0]), Some(4.5));
        assert_eq!(review_count(&store, &ids[0]), 2);
    }

    #[test]
    fn test_submit_review_guards() {
        let mut store = MemoryStore::new();
        let ids = seed(&mut store);

        assert!(matches!(
            submit_review(&mut store, &ProductId::new("ghost"), None, 4, None),
            Err(CommerceError::ProductNotFound(_))
        ));
        assert!(matches!(
            submit_review(&mut store, &ids[0], None, 6, None),
            Err(CommerceError::InvalidRating(6))
        ));

        let user = UserId::new("u1");
        submit_review(&mut store, &ids[0], Some(user.clone()), 4, None).unwrap();
        assert!(matches!(
            submit_review(&mut store, &ids[0], Some(user), 5, None),
            Err(CommerceError::DuplicateReview(_))
        ));
    }
}
