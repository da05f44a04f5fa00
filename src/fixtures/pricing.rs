//! Pricing Fixtures

use serde::Deserialize;

use crate::{
    fixtures::{
        FixtureError,
        products::{parse_percentage, parse_price},
    },
    pricing::{PricingPolicy, TaxRounding},
};

/// Pricing policy as written in YAML
#[derive(Debug, Deserialize)]
pub struct PricingFixture {
    /// Subtotal above which shipping is free (e.g., "1000 USD")
    pub free_shipping_over: String,

    /// Flat shipping fee (e.g., "50 USD")
    pub shipping_fee: String,

    /// Tax rate (e.g., "8%" or "0.08")
    pub tax_rate: String,

    /// Tax rounding granularity, `whole_units` unless set
    #[serde(default)]
    pub tax_rounding: TaxRounding,
}

impl TryFrom<PricingFixture> for PricingPolicy {
    type Error = FixtureError;

    fn try_from(fixture: PricingFixture) -> Result<Self, Self::Error> {
        Ok(PricingPolicy::new(
            parse_price(&fixture.free_shipping_over)?,
            parse_price(&fixture.shipping_fee)?,
            parse_percentage(&fixture.tax_rate)?,
            fixture.tax_rounding,
        )?)
    }
}
