//! Product and review types.

use crate::error::CommerceError;
use crate::ids::{ProductId, ReviewId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Lowest accepted review rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted review rating.
pub const MAX_RATING: u8 = 5;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Clothing,
    Shoes,
    Accessories,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Clothing => "clothing",
            Category::Shoes => "shoes",
            Category::Accessories => "accessories",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "clothing" => Some(Category::Clothing),
            "shoes" => Some(Category::Shoes),
            "accessories" => Some(Category::Accessories),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Clothing => "Clothing",
            Category::Shoes => "Shoes",
            Category::Accessories => "Accessories",
        }
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Money,
    /// Category.
    pub category: Category,
    /// Image URL for listings.
    pub image_url: Option<String>,
    /// Units in stock. Never goes negative through a committed operation.
    pub stock: i64,
    /// Default rating shown until the product has reviews.
    pub rating: f64,
    /// Whether the product is visible to customers.
    pub is_active: bool,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Product {
    /// Create a new active product.
    pub fn new(name: impl Into<String>, price: Money, category: Category, stock: i64) -> Self {
        let now = current_timestamp();
        Self {
            id: ProductId::generate(),
            name: name.into(),
            description: None,
            price,
            category,
            image_url: None,
            stock,
            rating: 0.0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the product has enough stock for a quantity.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Check if the product is out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }
}

/// A customer review. One per user per product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Unique review identifier.
    pub id: ReviewId,
    /// Product being reviewed.
    pub product_id: ProductId,
    /// Reviewer (None for anonymous reviews).
    pub user_id: Option<UserId>,
    /// Rating from 1 to 5.
    pub rating: u8,
    /// Free-text comment.
    pub comment: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Review {
    /// Create a new review, validating the rating range.
    pub fn new(
        product_id: ProductId,
        user_id: Option<UserId>,
        rating: u8,
        comment: Option<String>,
    ) -> Result<Self, CommerceError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(CommerceError::InvalidRating(rating));
        }
        Ok(Self {
            id: ReviewId::generate(),
            product_id,
            user_id,
            rating,
            comment,
            created_at: current_timestamp(),
        })
    }
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
    use crate::money::Currency;

    #[test]
    fn test_product_creation() {
        let p = Product::new(
            "Wool Socks",
            Money::new(899, Currency::USD),
            Category::Clothing,
            10,
        );
        assert!(p.is_active);
        assert!(p.can_fulfill(10));
        assert!(!p.can_fulfill(11));
        assert!(!p.is_out_of_stock());
    }

    #[test]
    fn test_category_round_trip() {
        assert_eq!(Category::from_str("Shoes"), Some(Category::Shoes));
        assert_eq!(Category::Shoes.as_str(), "shoes");
        assert_eq!(Category::from_str("furniture"), None);
    }

    #[test]
    fn test_review_rating_bounds() {
        let product = ProductId::new("p1");
        assert!(Review::new(product.clone(), None, 0, None).is_err());
        assert!(Review::new(product.clone(), None, 6, None).is_err());
        assert!(Review::new(product, None, 5, None).is_ok());
    }
}
