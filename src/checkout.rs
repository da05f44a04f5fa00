//! Checkout
//!
//! Turns a filled cart and a completed form into a paid [`Order`]. The cart is borrowed
//! mutably for the whole submission, so the same cart cannot be submitted twice at once.

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::CartLedger,
    pricing::{PricingError, PricingPolicy},
};

pub mod form;
pub mod order;
pub mod payment;

pub use form::{
    CardDetails, CheckoutForm, ContactDetails, Country, PaymentDetails, ShippingAddress,
};
pub use order::{Order, OrderConfirmation, OrderLine, PaymentMethod};
pub use payment::{Authorization, PaymentError, PaymentGateway, SimulatedGateway};

/// Errors that stop an order from being placed.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// A required form field is blank.
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    /// There is nothing in the cart to buy.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// Totals could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The payment gateway did not approve the charge.
    #[error("payment was not approved")]
    PaymentDeclined(#[source] PaymentError),
}

/// Places orders through a payment gateway.
#[derive(Debug)]
pub struct Checkout<G> {
    gateway: G,
    policy: PricingPolicy,
}

impl<G: PaymentGateway> Checkout<G> {
    /// Create a checkout that charges through `gateway` and prices under `policy`.
    pub fn new(gateway: G, policy: PricingPolicy) -> Self {
        Self { gateway, policy }
    }

    /// The pricing policy applied to every order.
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// The payment gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Validate `form`, charge the cart and, once payment is approved, empty the cart.
    ///
    /// The cart is only cleared after a successful authorization. On any error it is
    /// left exactly as it was.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::MissingField`]: a required field is blank.
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    /// - [`CheckoutError::Pricing`]: totals could not be calculated.
    /// - [`CheckoutError::PaymentDeclined`]: the gateway refused the payment.
    #[tracing::instrument(skip_all, fields(lines = cart.len()))]
    pub async fn submit(
        &self,
        cart: &mut CartLedger<'_>,
        form: &CheckoutForm,
    ) -> Result<OrderConfirmation, CheckoutError> {
        form.validate()?;

        let order = Order::from_cart(cart, form, &self.policy)?;

        let authorization = match self.gateway.authorize(&order).await {
            Ok(authorization) => authorization,
            Err(error) => {
                warn!(order_id = %order.id(), %error, "payment failed");

                return Err(CheckoutError::PaymentDeclined(error));
            }
        };

        cart.clear();

        info!(
            order_id = %order.id(),
            total = %order.totals().grand_total(),
            reference = %authorization.reference,
            "order placed"
        );

        Ok(OrderConfirmation {
            order,
            authorization,
        })
    }
}
