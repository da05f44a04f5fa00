//! Catalog
//!
//! The fixed, ordered collection of products offered by the storefront, and the
//! filtered views the product grid is drawn from.

use rustc_hash::FxHashSet;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::products::{Product, ProductId};

pub mod filter;

pub use filter::{ALL_CATEGORIES, CatalogQuery, CategoryFilter};

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Two products share the same id.
    #[error("Product {0} appears more than once in the catalog")]
    DuplicateProduct(ProductId),

    /// A product's currency differs from the catalog currency (product, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// A product has a negative price.
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),

    /// A product has no images.
    #[error("Product {0} has no images")]
    MissingImages(ProductId),
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create a catalog from products in display order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if a product id is repeated, a price is negative or in
    /// another currency, or a product has no images.
    pub fn new(
        products: impl Into<Vec<Product>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let products = products.into();
        let mut seen = FxHashSet::default();

        products.iter().try_for_each(|product| {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }

            let product_currency = product.price.currency();

            if product_currency != currency {
                return Err(CatalogError::CurrencyMismatch(
                    product.id,
                    product_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            if product.price.to_minor_units() < 0 {
                return Err(CatalogError::NegativePrice(product.id));
            }

            if product.images.is_empty() {
                return Err(CatalogError::MissingImages(product.id));
            }

            Ok(())
        })?;

        Ok(Catalog { products, currency })
    }

    /// Products matching `query`, in catalog order.
    pub fn filter(&self, query: &CatalogQuery) -> Vec<&Product> {
        let matcher = query.matcher();

        self.products
            .iter()
            .filter(|product| matcher.matches(product))
            .collect()
    }

    /// Category labels offered for filtering: [`ALL_CATEGORIES`] first, then every
    /// category in the order it first appears.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();

        std::iter::once(ALL_CATEGORIES)
            .chain(self.products.iter().map(|product| product.category.as_str()))
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Iterate over the products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Get the number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get the currency of the catalog.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
