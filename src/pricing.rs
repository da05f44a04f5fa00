//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::prices::Price;

pub mod policy;

pub use policy::{CheckoutTotals, PricingPolicy, TaxRounding};

/// Errors that can occur while calculating line totals, subtotals and checkout totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// A total no longer fits in the minor-unit range.
    #[error("amount overflowed the supported range")]
    Overflow,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// A pricing policy setting is out of range (names the setting).
    #[error("invalid pricing policy: {0} must not be negative")]
    InvalidPolicy(&'static str),
}

/// Calculates `unit_price × quantity` exactly, in minor units.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the product does not fit in the minor-unit range.
pub fn line_total(unit_price: &Price, quantity: u32) -> Result<Price, PricingError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Sums `(unit price, quantity)` pairs in `currency`. An empty input totals zero.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line total or the running sum overflowed.
/// - [`PricingError::Money`]: a price is in a different currency.
pub fn total_price<'p>(
    lines: impl IntoIterator<Item = (&'p Price, u32)>,
    currency: &'static Currency,
) -> Result<Price, PricingError> {
    lines
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, (price, quantity)| {
            let line = line_total(price, quantity)?;

            if line.currency() != currency {
                return Err(PricingError::Money(MoneyError::CurrencyMismatch {
                    expected: currency.iso_alpha_code,
                    actual: line.currency().iso_alpha_code,
                }));
            }

            let minor = acc
                .to_minor_units()
                .checked_add(line.to_minor_units())
                .ok_or(PricingError::Overflow)?;

            Ok(Money::from_minor(minor, currency))
        })
}
