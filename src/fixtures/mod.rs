//! Fixtures
//!
//! YAML fixture sets live under a base directory (default `./fixtures`):
//!
//! - `products/<name>.yml`: the catalog, in display order
//! - `items/<name>.yml`: cart additions
//! - `pricing/<name>.yml`: shipping and tax policy
//! - `checkout/<name>.yml`: a filled-in checkout form

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{CartError, CartLedger},
    catalog::{Catalog, CatalogError},
    checkout::form::CheckoutForm,
    fixtures::{items::ItemFixture, pricing::PricingFixture},
    pricing::{PricingError, PricingPolicy},
    products::{Product, ProductId},
};

pub mod items;
pub mod pricing;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Rating outside 0 to 5
    #[error("Product {0} has invalid rating {1}")]
    InvalidRating(u32, f64),

    /// Item references a product that is not in the catalog
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// No products loaded yet
    #[error("No products loaded yet; catalog unknown")]
    NoCatalog,

    /// Catalog validation error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Cart replay error
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Pricing policy error
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    catalog: Option<Catalog>,

    /// Cart additions, replayed in order by [`Fixture::cart`]
    items: Vec<ItemFixture>,

    policy: Option<PricingPolicy>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            items: Vec::new(),
            policy: None,
        }
    }

    /// Load the catalog from a YAML fixture file, replacing any loaded earlier.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the products
    /// do not form a valid catalog.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: products::ProductsFixture = self.read("products", name)?;

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let currency = match products.first() {
            Some(product) => product.price.currency(),
            None => self.currency().unwrap_or(rusty_money::iso::USD),
        };

        let catalog = Catalog::new(products, currency)?;

        debug!(name, products = catalog.len(), "loaded product fixture");

        self.catalog = Some(catalog);

        Ok(self)
    }

    /// Load cart additions from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an item
    /// references a product missing from the loaded catalog.
    pub fn load_items(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: items::ItemsFixture = self.read("items", name)?;
        let catalog = self.catalog()?;

        if let Some(missing) = fixture
            .items
            .iter()
            .find(|item| catalog.get(item.product).is_none())
        {
            return Err(FixtureError::ProductNotFound(missing.product));
        }

        debug!(name, items = fixture.items.len(), "loaded item fixture");

        self.items.extend(fixture.items);

        Ok(self)
    }

    /// Load the pricing policy from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the policy is invalid.
    pub fn load_pricing(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: PricingFixture = self.read("pricing", name)?;

        self.policy = Some(PricingPolicy::try_from(fixture)?);

        Ok(self)
    }

    /// Load a complete fixture set (products, items, and pricing with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_products(name)?
            .load_items(name)?
            .load_pricing(name)?;

        Ok(fixture)
    }

    /// Get the loaded catalog
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn catalog(&self) -> Result<&Catalog, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCatalog)
    }

    /// Get the cart additions
    pub fn items(&self) -> &[ItemFixture] {
        &self.items
    }

    /// The loaded pricing policy, or the default policy if none was loaded
    pub fn policy(&self) -> PricingPolicy {
        self.policy.unwrap_or_default()
    }

    /// Build a cart by replaying the item fixture through [`CartLedger::add_item`].
    ///
    /// # Errors
    ///
    /// Returns an error if no products are loaded or an addition is rejected by the cart.
    pub fn cart(&self) -> Result<CartLedger<'_>, FixtureError> {
        let catalog = self.catalog()?;
        let mut cart = CartLedger::for_catalog(catalog);

        for item in &self.items {
            let product = catalog
                .get(item.product)
                .ok_or(FixtureError::ProductNotFound(item.product))?;

            cart.add_item(product, item.quantity)?;
        }

        Ok(cart)
    }

    /// Read a checkout form from `checkout/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn checkout_form(&self, name: &str) -> Result<CheckoutForm, FixtureError> {
        self.read("checkout", name)
    }

    /// Get the catalog currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.catalog().map(Catalog::currency)
    }

    fn read<T: serde::de::DeserializeOwned>(
        &self,
        category: &str,
        name: &str,
    ) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
