//! Prices

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};

/// A monetary amount in one of the ISO currencies.
///
/// Currencies from [`rusty_money::iso`] are `'static`, so prices can be held by
/// owned catalog and order records without borrowing.
pub type Price = Money<'static, Currency>;

/// Number of minor units in one major unit of `currency` (100 for USD).
///
/// Returns `None` if the currency exponent does not fit an `i64`.
pub fn minor_units_per_major(currency: &Currency) -> Option<i64> {
    10_i64.checked_pow(currency.exponent)
}

/// Creates a price from a whole number of major units (e.g. `2499` dollars).
///
/// Returns `None` if the amount overflows when converted to minor units.
pub fn from_major(units: i64, currency: &'static Currency) -> Option<Price> {
    let minor = units.checked_mul(minor_units_per_major(currency)?)?;

    Some(Money::from_minor(minor, currency))
}

/// Converts a decimal amount of major units into minor units, rounding half away from zero.
pub fn decimal_to_minor(amount: Decimal, currency: &Currency) -> Option<i64> {
    amount
        .checked_mul(Decimal::from(minor_units_per_major(currency)?))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// A zero amount in the given currency.
pub fn zero(currency: &'static Currency) -> Price {
    Money::from_minor(0, currency)
}
