//! Utils

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    catalog::{CatalogQuery, CategoryFilter},
    fixtures::{
        FixtureError,
        products::{parse_percentage, parse_price},
    },
    pricing::{PricingPolicy, TaxRounding},
};

/// Arguments for the storefront demo
#[derive(Debug, Parser)]
#[command(about = "Browse the Zelie catalog and run a simulated checkout")]
pub struct StorefrontArgs {
    /// Fixture set to load products, cart items and pricing from
    #[arg(short, long, default_value = "jewelry")]
    pub fixture: String,

    /// Directory containing the fixture sets
    #[arg(long, env = "FIXTURES", default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Case-insensitive search over product names and descriptions
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Category to show, or "All"
    #[arg(short, long, default_value = "All")]
    pub category: String,

    /// Submit the cart through the simulated payment gateway
    #[arg(long)]
    pub checkout: bool,

    /// Simulated payment processing delay in milliseconds
    #[arg(long, env = "CHECKOUT_DELAY_MS", default_value_t = 2000)]
    pub delay_ms: u64,

    /// Override the free-shipping threshold (e.g. "1000 USD")
    #[arg(long, env = "FREE_SHIPPING_OVER")]
    pub free_shipping_over: Option<String>,

    /// Override the flat shipping fee (e.g. "50 USD")
    #[arg(long, env = "SHIPPING_FEE")]
    pub shipping_fee: Option<String>,

    /// Override the tax rate (e.g. "8%" or "0.08")
    #[arg(long, env = "TAX_RATE")]
    pub tax_rate: Option<String>,

    /// Round tax to cents instead of whole currency units
    #[arg(long)]
    pub tax_in_cents: bool,

    /// Disable ANSI colours in the receipt
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log filter, e.g. "info" or "zelie=debug"
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl StorefrontArgs {
    /// Catalog query built from `--query` and `--category`.
    pub fn catalog_query(&self) -> CatalogQuery {
        CatalogQuery::new()
            .search(self.query.clone())
            .category(CategoryFilter::from_label(&self.category))
    }

    /// Simulated gateway delay.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Apply any command-line or environment overrides on top of `base`.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if an override cannot be parsed or the resulting
    /// policy is invalid.
    pub fn pricing_policy(&self, base: PricingPolicy) -> Result<PricingPolicy, FixtureError> {
        let free_shipping_over = match &self.free_shipping_over {
            Some(value) => parse_price(value)?,
            None => base.free_shipping_over(),
        };

        let shipping_fee = match &self.shipping_fee {
            Some(value) => parse_price(value)?,
            None => base.shipping_fee(),
        };

        let tax_rate = match &self.tax_rate {
            Some(value) => parse_percentage(value)?,
            None => base.tax_rate(),
        };

        let tax_rounding = if self.tax_in_cents {
            TaxRounding::MinorUnits
        } else {
            base.tax_rounding()
        };

        Ok(PricingPolicy::new(
            free_shipping_over,
            shipping_fee,
            tax_rate,
            tax_rounding,
        )?)
    }
}
