//! Pricing policy
//!
//! Shipping and tax rules applied on top of a cart subtotal at checkout.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::Deserialize;

use crate::{
    prices::{self, Price},
    pricing::PricingError,
};

/// Granularity tax amounts are rounded to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRounding {
    /// Round to the nearest whole currency unit (e.g. whole dollars), ties up.
    #[default]
    WholeUnits,

    /// Round to the nearest minor unit (e.g. cents), ties up.
    MinorUnits,
}

/// Free-shipping threshold, flat shipping fee and tax rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingPolicy {
    free_shipping_over: Price,
    shipping_fee: Price,
    tax_rate: Percentage,
    tax_rounding: TaxRounding,
}

impl PricingPolicy {
    /// Create a policy.
    ///
    /// Subtotals strictly greater than `free_shipping_over` ship for free, everything else is
    /// charged `shipping_fee`. Tax is `tax_rate` of the subtotal, rounded per `tax_rounding`.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Money`]: the threshold and fee are in different currencies.
    /// - [`PricingError::InvalidPolicy`]: an amount or the rate is negative.
    pub fn new(
        free_shipping_over: Price,
        shipping_fee: Price,
        tax_rate: Percentage,
        tax_rounding: TaxRounding,
    ) -> Result<Self, PricingError> {
        ensure_currency(free_shipping_over.currency(), &shipping_fee)?;

        if free_shipping_over.to_minor_units() < 0 {
            return Err(PricingError::InvalidPolicy("free shipping threshold"));
        }

        if shipping_fee.to_minor_units() < 0 {
            return Err(PricingError::InvalidPolicy("shipping fee"));
        }

        if tax_rate * Decimal::ONE < Decimal::ZERO {
            return Err(PricingError::InvalidPolicy("tax rate"));
        }

        Ok(Self {
            free_shipping_over,
            shipping_fee,
            tax_rate,
            tax_rounding,
        })
    }

    /// Subtotal above which shipping is free.
    pub fn free_shipping_over(&self) -> Price {
        self.free_shipping_over
    }

    /// Flat shipping fee charged at or below the threshold.
    pub fn shipping_fee(&self) -> Price {
        self.shipping_fee
    }

    /// Tax rate applied to the subtotal.
    pub fn tax_rate(&self) -> Percentage {
        self.tax_rate
    }

    /// Rounding applied to tax amounts.
    pub fn tax_rounding(&self) -> TaxRounding {
        self.tax_rounding
    }

    /// Currency the policy amounts are expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.shipping_fee.currency()
    }

    /// Shipping charged for `subtotal`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Money`] if `subtotal` is in another currency.
    pub fn shipping(&self, subtotal: &Price) -> Result<Price, PricingError> {
        ensure_currency(self.currency(), subtotal)?;

        if subtotal.to_minor_units() > self.free_shipping_over.to_minor_units() {
            Ok(prices::zero(self.currency()))
        } else {
            Ok(self.shipping_fee)
        }
    }

    /// Tax charged on `subtotal`.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Money`]: `subtotal` is in another currency.
    /// - [`PricingError::PercentConversion`]: the tax does not fit the minor-unit range.
    pub fn tax(&self, subtotal: &Price) -> Result<Price, PricingError> {
        ensure_currency(self.currency(), subtotal)?;

        let step = match self.tax_rounding {
            TaxRounding::WholeUnits => {
                prices::minor_units_per_major(self.currency()).ok_or(PricingError::Overflow)?
            }
            TaxRounding::MinorUnits => 1,
        };

        let minor = percent_of_minor(&self.tax_rate, subtotal.to_minor_units(), step)?;

        Ok(Money::from_minor(minor, self.currency()))
    }

    /// Shipping, tax and grand total for `subtotal`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if `subtotal` is in another currency or a total overflows.
    pub fn totals(&self, subtotal: Price) -> Result<CheckoutTotals, PricingError> {
        let shipping = self.shipping(&subtotal)?;
        let tax = self.tax(&subtotal)?;

        let grand_total = subtotal
            .to_minor_units()
            .checked_add(shipping.to_minor_units())
            .and_then(|sum| sum.checked_add(tax.to_minor_units()))
            .ok_or(PricingError::Overflow)?;

        Ok(CheckoutTotals {
            subtotal,
            shipping,
            tax,
            grand_total: Money::from_minor(grand_total, self.currency()),
        })
    }
}

impl Default for PricingPolicy {
    /// Free shipping over $1,000, otherwise $50, and 8% tax rounded to whole dollars.
    fn default() -> Self {
        Self {
            free_shipping_over: Money::from_minor(100_000, rusty_money::iso::USD),
            shipping_fee: Money::from_minor(5000, rusty_money::iso::USD),
            tax_rate: Percentage::from(Decimal::new(8, 2)),
            tax_rounding: TaxRounding::WholeUnits,
        }
    }
}

/// Amounts shown on the checkout summary. Always derived from a subtotal, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutTotals {
    subtotal: Price,
    shipping: Price,
    tax: Price,
    grand_total: Price,
}

impl CheckoutTotals {
    /// Sum of line totals.
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Shipping charge.
    pub fn shipping(&self) -> Price {
        self.shipping
    }

    /// Tax charge.
    pub fn tax(&self) -> Price {
        self.tax
    }

    /// Amount charged at checkout.
    pub fn grand_total(&self) -> Price {
        self.grand_total
    }

    /// Whether the order qualified for free shipping.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.to_minor_units() == 0
    }
}

fn ensure_currency(expected: &'static Currency, amount: &Price) -> Result<(), PricingError> {
    if amount.currency() == expected {
        Ok(())
    } else {
        Err(PricingError::Money(MoneyError::CurrencyMismatch {
            expected: expected.iso_alpha_code,
            actual: amount.currency().iso_alpha_code,
        }))
    }
}

/// `percent` of `minor`, rounded to the nearest multiple of `step` minor units, ties away from zero.
fn percent_of_minor(percent: &Percentage, minor: i64, step: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from(minor);
    let step_dec = Decimal::from(step);

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .and_then(|value| value.checked_div(step_dec))
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .and_then(|steps| steps.checked_mul(step))
        .ok_or(PricingError::PercentConversion)
}
