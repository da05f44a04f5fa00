//! Products

use std::fmt;

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::prices::Price;

/// Unique catalog identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Wraps a raw catalog id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw catalog id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Average review score, between 0 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Rating(Decimal);

impl Rating {
    /// Highest possible rating.
    pub const MAX: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

    /// Creates a rating, returning `None` when the score is outside `0..=5`.
    pub fn new(score: Decimal) -> Option<Self> {
        (score >= Decimal::ZERO && score <= Self::MAX).then_some(Self(score.normalize()))
    }

    /// Creates a rating from a floating point score.
    pub fn from_f64(score: f64) -> Option<Self> {
        Decimal::from_f64(score).and_then(Self::new)
    }

    /// The score itself.
    pub fn score(&self) -> Decimal {
        self.0
    }

    /// Number of filled stars when the rating is drawn out of five.
    pub fn filled_stars(&self) -> u8 {
        self.0.floor().to_u8().unwrap_or_default()
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id, unique within a catalog
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Long-form description shown on the product page
    pub description: String,

    /// Catalog category (e.g. "Rings")
    pub category: String,

    /// Product price
    pub price: Price,

    /// Image references, first one is the primary image
    pub images: SmallVec<[String; 3]>,

    /// Whether the product can currently be added to a cart
    pub in_stock: bool,

    /// Average review score
    pub rating: Rating,

    /// Number of reviews behind `rating`
    pub reviews: u32,
}

impl Product {
    /// Primary image reference, if the product has any images.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
