//! Orders
//!
//! An [`Order`] is an owned snapshot of the cart taken at submission time, so it can be
//! handed to a payment gateway and outlive the cart it came from.

use std::fmt;

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    cart::CartLedger,
    checkout::{
        CheckoutError,
        form::{CheckoutForm, ContactDetails, PaymentDetails, ShippingAddress},
        payment::Authorization,
    },
    prices::Price,
    pricing::{CheckoutTotals, PricingPolicy},
    products::ProductId,
};

/// One purchased product, copied out of the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// Catalog product id
    pub product: ProductId,

    /// Product name at the time of purchase
    pub name: String,

    /// Unit price at the time of purchase
    pub unit_price: Price,

    /// Units purchased
    pub quantity: u32,

    /// `unit_price × quantity`
    pub line_total: Price,
}

/// Payment method recorded on an order, without card secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Credit card, identified by its last four digits
    Card {
        /// Last four digits of the card number
        last_four: String,
    },

    /// `PayPal`
    PayPal,
}

impl From<&PaymentDetails> for PaymentMethod {
    fn from(details: &PaymentDetails) -> Self {
        match details {
            PaymentDetails::Card(card) => Self::Card {
                last_four: card.last_four(),
            },
            PaymentDetails::PayPal => Self::PayPal,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card { last_four } => write!(f, "Credit Card ending {last_four}"),
            Self::PayPal => f.write_str("PayPal"),
        }
    }
}

/// Order
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: Uuid,
    placed_at: Timestamp,
    lines: Vec<OrderLine>,
    totals: CheckoutTotals,
    contact: ContactDetails,
    shipping: ShippingAddress,
    payment: PaymentMethod,
}

impl Order {
    /// Snapshot `cart` and `form` into a new order priced under `policy`.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    /// - [`CheckoutError::Pricing`]: a line total or checkout total could not be calculated.
    pub fn from_cart(
        cart: &CartLedger<'_>,
        form: &CheckoutForm,
        policy: &PricingPolicy,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let lines = cart
            .iter()
            .map(|line| {
                Ok(OrderLine {
                    product: line.product_id(),
                    name: line.product().name.clone(),
                    unit_price: *line.unit_price(),
                    quantity: line.quantity(),
                    line_total: line.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CheckoutError>>()?;

        Ok(Self {
            id: Uuid::now_v7(),
            placed_at: Timestamp::now(),
            lines,
            totals: cart.totals(policy)?,
            contact: form.contact.clone(),
            shipping: form.shipping.clone(),
            payment: PaymentMethod::from(&form.payment),
        })
    }

    /// Order id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the order was submitted
    pub fn placed_at(&self) -> Timestamp {
        self.placed_at
    }

    /// Purchased lines in cart order
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Subtotal, shipping, tax and grand total
    pub fn totals(&self) -> &CheckoutTotals {
        &self.totals
    }

    /// Shopper contact details
    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    /// Shipping address
    pub fn shipping(&self) -> &ShippingAddress {
        &self.shipping
    }

    /// Payment method
    pub fn payment(&self) -> &PaymentMethod {
        &self.payment
    }

    /// Total number of units ordered.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

/// A successfully placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    /// The order that was charged
    pub order: Order,

    /// Gateway authorization for the charge
    pub authorization: Authorization,
}
