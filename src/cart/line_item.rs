//! Line items

use std::num::NonZeroU32;

use crate::{
    prices::Price,
    pricing::{PricingError, line_total},
    products::{Product, ProductId},
};

/// One product in the cart together with how many of it the shopper wants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineItem<'a> {
    product: &'a Product,
    quantity: NonZeroU32,
}

impl<'a> LineItem<'a> {
    /// Creates a line item for `quantity` units of `product`.
    pub fn new(product: &'a Product, quantity: NonZeroU32) -> Self {
        Self { product, quantity }
    }

    /// Returns the catalog product
    pub fn product(&self) -> &'a Product {
        self.product
    }

    /// Returns the product id
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Returns the quantity, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Returns the unit price
    pub fn unit_price(&self) -> &Price {
        &self.product.price
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit the minor-unit range.
    pub fn line_total(&self) -> Result<Price, PricingError> {
        line_total(&self.product.price, self.quantity())
    }

    pub(super) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}
