//! Cart
//!
//! The [`CartLedger`] holds the products a shopper has picked for one browsing session.
//! Line items reference catalog products rather than copying them, keep the order they
//! were first added in, and never hold a quantity below one.

use std::num::NonZeroU32;

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::Catalog,
    prices::Price,
    pricing::{CheckoutTotals, PricingError, PricingPolicy, total_price},
    products::{Product, ProductId},
};

pub mod line_item;

pub use line_item::LineItem;

/// Errors raised by cart mutations. The ledger is unchanged whenever one is returned.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Items can only be added in positive quantities.
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    /// The product is not available for purchase.
    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),

    /// A product's currency differs from the cart currency (product, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// The resulting quantity does not fit in a `u32`.
    #[error("Quantity of product {0} is too large")]
    QuantityOverflow(ProductId),
}

/// Cart ledger
#[derive(Debug, Clone)]
pub struct CartLedger<'a> {
    lines: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> CartLedger<'a> {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        CartLedger {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create an empty cart in the currency of `catalog`.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.currency())
    }

    /// Add `quantity` units of `product`, returning the line's new quantity.
    ///
    /// If the product is already in the cart its quantity is increased, otherwise a new
    /// line is appended after the existing ones.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero or negative.
    /// - [`CartError::OutOfStock`]: the product is not in stock.
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CartError::QuantityOverflow`]: the new quantity does not fit in a `u32`.
    pub fn add_item(&mut self, product: &'a Product, quantity: i64) -> Result<u32, CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        if !product.in_stock {
            return Err(CartError::OutOfStock(product.id));
        }

        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let added = to_quantity(product.id, quantity)?;

        if let Some(line) = self.line_mut(product.id) {
            let updated = line
                .quantity()
                .checked_add(added.get())
                .and_then(NonZeroU32::new)
                .ok_or(CartError::QuantityOverflow(product.id))?;

            line.set_quantity(updated);

            debug!(product = %product.id, quantity = updated.get(), "increased cart quantity");

            return Ok(updated.get());
        }

        self.lines.push(LineItem::new(product, added));

        debug!(product = %product.id, quantity = added.get(), "added product to cart");

        Ok(added.get())
    }

    /// Add a single unit of `product`.
    ///
    /// # Errors
    ///
    /// See [`CartLedger::add_item`].
    pub fn add_one(&mut self, product: &'a Product) -> Result<u32, CartError> {
        self.add_item(product, 1)
    }

    /// Set the quantity of an existing line to exactly `quantity`.
    ///
    /// A quantity of zero or less removes the line. Products that are not in the cart are
    /// left out of it, whatever the quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if the product is in the cart and `quantity`
    /// does not fit in a `u32`.
    pub fn set_quantity(&mut self, product: ProductId, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove_item(product);

            return Ok(());
        }

        let Some(line) = self.line_mut(product) else {
            debug!(product = %product, "ignored quantity change for product not in cart");

            return Ok(());
        };

        let quantity = to_quantity(product, quantity)?;

        line.set_quantity(quantity);

        debug!(product = %product, quantity = quantity.get(), "set cart quantity");

        Ok(())
    }

    /// Remove the line for `product`, returning it if it was present.
    pub fn remove_item(&mut self, product: ProductId) -> Option<LineItem<'a>> {
        let index = self
            .lines
            .iter()
            .position(|line| line.product_id() == product)?;

        debug!(product = %product, "removed product from cart");

        Some(self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        debug!(lines = self.lines.len(), "cleared cart");

        self.lines.clear();
    }

    /// Total number of units across all lines.
    pub fn total_item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the total overflows the minor-unit range.
    pub fn subtotal(&self) -> Result<Price, PricingError> {
        total_price(
            self.lines
                .iter()
                .map(|line| (line.unit_price(), line.quantity())),
            self.currency,
        )
    }

    /// Subtotal, shipping, tax and grand total under `policy`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a total overflows or the policy uses another currency.
    pub fn totals(&self, policy: &PricingPolicy) -> Result<CheckoutTotals, PricingError> {
        policy.totals(self.subtotal()?)
    }

    /// Get the line for `product`, if it is in the cart.
    pub fn get(&self, product: ProductId) -> Option<&LineItem<'a>> {
        self.lines.iter().find(|line| line.product_id() == product)
    }

    /// Whether `product` is in the cart.
    pub fn contains(&self, product: ProductId) -> bool {
        self.get(product).is_some()
    }

    /// All lines in the order they were added.
    pub fn lines(&self) -> &[LineItem<'a>] {
        &self.lines
    }

    /// Iterate over the lines in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.lines.iter()
    }

    /// Get the number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn line_mut(&mut self, product: ProductId) -> Option<&mut LineItem<'a>> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id() == product)
    }
}

fn to_quantity(product: ProductId, quantity: i64) -> Result<NonZeroU32, CartError> {
    u32::try_from(quantity)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(CartError::QuantityOverflow(product))
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{GBP, USD},
    };
    use testresult::TestResult;

    use crate::test_support::{self, lookup};

    use super::*;

    fn quantities(cart: &CartLedger<'_>) -> Vec<(u32, u32)> {
        cart.iter()
            .map(|line| (line.product_id().get(), line.quantity()))
            .collect()
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = CartLedger::new(USD);

        assert!(cart.is_empty());
        assert_eq!(cart.currency(), USD);
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn adding_twice_merges_into_one_line() -> TestResult {
        let catalog = test_support::catalog()?;
        let ring = lookup(&catalog, 1)?;
        let mut cart = CartLedger::for_catalog(&catalog);

        assert_eq!(cart.add_item(ring, 2)?, 2);
        assert_eq!(cart.add_item(ring, 3)?, 5);

        assert_eq!(quantities(&cart), vec![(1, 5)]);

        Ok(())
    }

    #[test]
    fn new_products_are_appended_in_order() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);

        cart.add_one(lookup(&catalog, 3)?)?;
        cart.add_one(lookup(&catalog, 1)?)?;
        cart.add_one(lookup(&catalog, 3)?)?;
        cart.add_one(lookup(&catalog, 2)?)?;

        assert_eq!(quantities(&cart), vec![(3, 2), (1, 1), (2, 1)]);

        Ok(())
    }

    #[test]
    fn non_positive_add_is_rejected_without_changes() -> TestResult {
        let catalog = test_support::catalog()?;
        let ring = lookup(&catalog, 1)?;
        let mut cart = CartLedger::for_catalog(&catalog);

        cart.add_one(ring)?;

        assert_eq!(cart.add_item(ring, 0), Err(CartError::InvalidQuantity(0)));
        assert_eq!(cart.add_item(ring, -2), Err(CartError::InvalidQuantity(-2)));
        assert_eq!(quantities(&cart), vec![(1, 1)]);

        Ok(())
    }

    #[test]
    fn out_of_stock_products_cannot_be_added() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);

        let result = cart.add_one(lookup(&catalog, 6)?);

        assert_eq!(result, Err(CartError::OutOfStock(ProductId::new(6))));
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn products_in_another_currency_are_rejected() {
        let mut pounds = test_support::product(9, "Silver Locket", "Necklaces", 120);
        pounds.price = Money::from_minor(12000, GBP);

        let mut cart = CartLedger::new(USD);

        assert_eq!(
            cart.add_one(&pounds),
            Err(CartError::CurrencyMismatch(
                ProductId::new(9),
                GBP.iso_alpha_code,
                USD.iso_alpha_code
            ))
        );
    }

    #[test]
    fn quantity_overflow_is_rejected() -> TestResult {
        let catalog = test_support::catalog()?;
        let ring = lookup(&catalog, 1)?;
        let mut cart = CartLedger::for_catalog(&catalog);

        cart.add_item(ring, i64::from(u32::MAX))?;

        assert_eq!(
            cart.add_one(ring),
            Err(CartError::QuantityOverflow(ProductId::new(1)))
        );
        assert_eq!(
            cart.set_quantity(ring.id, i64::MAX),
            Err(CartError::QuantityOverflow(ProductId::new(1)))
        );
        assert_eq!(cart.get(ring.id).map(LineItem::quantity), Some(u32::MAX));

        Ok(())
    }

    #[test]
    fn set_quantity_is_absolute() -> TestResult {
        let catalog = test_support::catalog()?;
        let ring = lookup(&catalog, 1)?;
        let mut cart = CartLedger::for_catalog(&catalog);

        cart.add_item(ring, 4)?;
        cart.set_quantity(ring.id, 2)?;

        assert_eq!(quantities(&cart), vec![(1, 2)]);

        Ok(())
    }

    #[test]
    fn set_quantity_to_zero_or_less_removes_the_line() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);

        cart.add_one(lookup(&catalog, 1)?)?;
        cart.add_one(lookup(&catalog, 2)?)?;

        cart.set_quantity(ProductId::new(1), 0)?;
        cart.set_quantity(ProductId::new(2), -1)?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn set_quantity_for_unknown_product_is_a_no_op() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);

        cart.add_one(lookup(&catalog, 1)?)?;
        cart.set_quantity(ProductId::new(2), 5)?;
        cart.set_quantity(ProductId::new(42), 0)?;

        assert_eq!(quantities(&cart), vec![(1, 1)]);

        Ok(())
    }

    #[test]
    fn oversized_quantity_for_unknown_product_is_a_no_op() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);

        cart.add_item(lookup(&catalog, 1)?, 2)?;

        assert_eq!(
            cart.set_quantity(ProductId::new(42), i64::from(u32::MAX) + 1),
            Ok(())
        );
        assert_eq!(quantities(&cart), vec![(1, 2)]);

        Ok(())
    }

    #[test]
    fn set_quantity_does_not_reinsert_removed_items() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);

        cart.add_one(lookup(&catalog, 1)?)?;
        cart.remove_item(ProductId::new(1));
        cart.set_quantity(ProductId::new(1), 3)?;

        assert!(!cart.contains(ProductId::new(1)));

        Ok(())
    }

    #[test]
    fn remove_item_is_idempotent() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);

        cart.add_one(lookup(&catalog, 1)?)?;
        cart.add_one(lookup(&catalog, 2)?)?;

        let first = cart.remove_item(ProductId::new(1));
        let after_first = quantities(&cart);
        let second = cart.remove_item(ProductId::new(1));

        assert_eq!(first.map(|line| line.product_id()), Some(ProductId::new(1)));
        assert!(second.is_none());
        assert_eq!(quantities(&cart), after_first);

        Ok(())
    }

    #[test]
    fn removal_keeps_remaining_order() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);

        cart.add_one(lookup(&catalog, 1)?)?;
        cart.add_one(lookup(&catalog, 2)?)?;
        cart.add_one(lookup(&catalog, 3)?)?;
        cart.remove_item(ProductId::new(2));

        assert_eq!(quantities(&cart), vec![(1, 1), (3, 1)]);

        Ok(())
    }

    #[test]
    fn subtotal_uses_exact_integer_arithmetic() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);

        cart.add_item(lookup(&catalog, 1)?, 1)?;
        cart.add_item(lookup(&catalog, 2)?, 2)?;

        assert_eq!(cart.subtotal()?, Money::from_minor(429_700, USD));
        assert_eq!(cart.total_item_count(), 3);

        Ok(())
    }

    #[test]
    fn totals_apply_the_policy() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);

        cart.add_item(lookup(&catalog, 1)?, 1)?;
        cart.add_item(lookup(&catalog, 2)?, 2)?;

        let totals = cart.totals(&PricingPolicy::default())?;

        assert_eq!(totals.shipping(), Money::from_minor(0, USD));
        assert_eq!(totals.tax(), Money::from_minor(34400, USD));
        assert_eq!(totals.grand_total(), Money::from_minor(464_100, USD));

        Ok(())
    }

    #[test]
    fn empty_cart_subtotal_is_zero() -> TestResult {
        let cart = CartLedger::new(USD);

        assert_eq!(cart.subtotal()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn clear_empties_everything() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);

        cart.add_item(lookup(&catalog, 1)?, 2)?;
        cart.add_one(lookup(&catalog, 3)?)?;
        cart.set_quantity(ProductId::new(3), 7)?;
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.subtotal()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn no_sequence_of_mutations_leaves_a_non_positive_line() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);

        let ids = [1_u32, 2, 3];
        let amounts = [-3_i64, -1, 0, 1, 2, 5];

        for (step, amount) in amounts.iter().cycle().take(60).enumerate() {
            let id = ids.get(step % ids.len()).copied().unwrap_or(1);
            let product = lookup(&catalog, id)?;

            match step % 3 {
                0 => {
                    _ = cart.add_item(product, *amount);
                }
                1 => cart.set_quantity(product.id, *amount - 1)?,
                _ => {
                    if *amount < 0 {
                        cart.remove_item(product.id);
                    }
                }
            }

            assert!(
                cart.iter().all(|line| line.quantity() > 0),
                "line with non-positive quantity after step {step}"
            );
            assert!(
                cart.len() <= ids.len(),
                "duplicate lines after step {step}"
            );
        }

        Ok(())
    }
}
