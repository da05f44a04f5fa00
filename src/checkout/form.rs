//! Checkout form
//!
//! Shopper-supplied contact, shipping and payment details. Validation only checks that
//! every required field is filled in; payment details are checked by the gateway.

use std::fmt;

use serde::Deserialize;
use smallvec::SmallVec;

use crate::checkout::CheckoutError;

/// How the shopper can be reached about the order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactDetails {
    /// E-mail address
    pub email: String,
}

/// Countries the storefront ships to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Country {
    /// United States
    #[serde(rename = "US")]
    UnitedStates,

    /// Canada
    #[serde(rename = "CA")]
    Canada,

    /// United Kingdom
    #[serde(rename = "UK")]
    UnitedKingdom,

    /// Australia
    #[serde(rename = "AU")]
    Australia,
}

impl Country {
    /// Short code used by the shipping form.
    pub fn code(self) -> &'static str {
        match self {
            Self::UnitedStates => "US",
            Self::Canada => "CA",
            Self::UnitedKingdom => "UK",
            Self::Australia => "AU",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::UnitedStates => "United States",
            Self::Canada => "Canada",
            Self::UnitedKingdom => "United Kingdom",
            Self::Australia => "Australia",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the order is shipped to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShippingAddress {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// Postal code
    pub postal_code: String,

    /// Country, `None` until one is selected
    #[serde(default)]
    pub country: Option<Country>,
}

impl ShippingAddress {
    /// First and last name joined with a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

impl fmt::Display for ShippingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.address.trim(),
            self.city.trim(),
            self.postal_code.trim()
        )?;

        if let Some(country) = self.country {
            write!(f, ", {country}")?;
        }

        Ok(())
    }
}

/// Card fields, only collected when paying by card.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CardDetails {
    /// Card number
    pub number: String,

    /// Expiry date as typed, e.g. "04/27"
    pub expiry: String,

    /// Security code
    pub cvv: String,
}

impl CardDetails {
    /// Last four digits of the card number.
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(char::is_ascii_digit).collect();
        let start = digits.len().saturating_sub(4);

        digits.get(start..).unwrap_or_default().iter().collect()
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &format_args!("****{}", self.last_four()))
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .finish()
    }
}

/// Payment method selected on the form, with the fields that method needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentDetails {
    /// Credit card
    Card(CardDetails),

    /// `PayPal`, no extra fields
    #[serde(rename = "paypal")]
    PayPal,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        Self::Card(CardDetails::default())
    }
}

/// Checkout form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckoutForm {
    /// Contact information
    pub contact: ContactDetails,

    /// Shipping address
    pub shipping: ShippingAddress,

    /// Payment method and its fields
    #[serde(default)]
    pub payment: PaymentDetails,
}

impl CheckoutForm {
    /// Names of required fields that are blank, in the order they appear on the form.
    pub fn missing_fields(&self) -> SmallVec<[&'static str; 4]> {
        let mut fields: SmallVec<[(&'static str, bool); 10]> = SmallVec::new();

        fields.extend([
            ("email", is_blank(&self.contact.email)),
            ("first_name", is_blank(&self.shipping.first_name)),
            ("last_name", is_blank(&self.shipping.last_name)),
            ("address", is_blank(&self.shipping.address)),
            ("city", is_blank(&self.shipping.city)),
            ("postal_code", is_blank(&self.shipping.postal_code)),
            ("country", self.shipping.country.is_none()),
        ]);

        if let PaymentDetails::Card(card) = &self.payment {
            fields.extend([
                ("card_number", is_blank(&card.number)),
                ("expiry_date", is_blank(&card.expiry)),
                ("cvv", is_blank(&card.cvv)),
            ]);
        }

        fields
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect()
    }

    /// Check that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        match self.missing_fields().first().copied() {
            Some(field) => Err(CheckoutError::MissingField(field)),
            None => Ok(()),
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
