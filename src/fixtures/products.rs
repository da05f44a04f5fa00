//! Product Fixtures

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{AUD, CAD, Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    fixtures::FixtureError,
    prices::{self, Price},
    products::{Product, ProductId, Rating},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in display order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: u32,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Category label
    pub category: String,

    /// Product price (e.g., "2499 USD")
    pub price: String,

    /// Image URLs
    pub images: Vec<String>,

    /// Whether the product can be added to a cart
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,

    /// Average review score, 0 to 5
    #[serde(default)]
    pub rating: f64,

    /// Number of reviews
    #[serde(default)]
    pub reviews: u32,
}

fn in_stock_default() -> bool {
    true
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)?;

        let rating = Rating::from_f64(fixture.rating)
            .ok_or(FixtureError::InvalidRating(fixture.id, fixture.rating))?;

        Ok(Product {
            id: ProductId::new(fixture.id),
            name: fixture.name,
            description: fixture.description,
            category: fixture.category,
            price,
            images: SmallVec::from_vec(fixture.images),
            in_stock: fixture.in_stock,
            rating,
            reviews: fixture.reviews,
        })
    }
}

/// Parse a money string (e.g., "2499 USD" or "2.99 GBP") into a price.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<Price, FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = parse_currency(currency_code)?;

    let minor_units = prices::decimal_to_minor(amount, currency)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Look up a supported ISO currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for any other code.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "USD" => Ok(USD),
        "CAD" => Ok(CAD),
        "GBP" => Ok(GBP),
        "AUD" => Ok(AUD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Parse percentage string (e.g., "8%" or "0.08") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "8%" for 8%
/// - Decimal format: "0.08" for 8%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed as a decimal.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    let fraction = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .ok()
            .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
    } else {
        trimmed.parse::<Decimal>().ok()
    };

    fraction
        .map(Percentage::from)
        .ok_or_else(|| FixtureError::InvalidPercentage(s.to_string()))
}
