//! Payment authorization
//!
//! Checkout only needs a yes or no from a payment provider, so providers sit behind the
//! [`PaymentGateway`] trait. [`SimulatedGateway`] stands in for a real provider.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::debug;

use crate::checkout::order::Order;

/// Proof that a payment was approved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    /// Provider reference for the approved charge
    pub reference: String,
}

/// Reasons a payment was not approved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// The provider refused the charge.
    #[error("payment declined: {0}")]
    Declined(String),

    /// The provider could not be reached or did not answer.
    #[error("payment provider unavailable: {0}")]
    Unavailable(String),
}

/// A payment provider that can approve or refuse a charge.
#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Ask the provider to approve the grand total of `order`.
    async fn authorize(&self, order: &Order) -> Result<Authorization, PaymentError>;
}

/// A gateway that waits for a fixed delay and then approves every payment.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    /// How long the storefront pretends payment processing takes.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    /// Create a gateway that approves after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured processing delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn authorize(&self, order: &Order) -> Result<Authorization, PaymentError> {
        debug!(order_id = %order.id(), delay_ms = self.delay.as_millis(), "simulating payment");

        tokio::time::sleep(self.delay).await;

        Ok(Authorization {
            reference: format!("sim-{}", order.id().simple()),
        })
    }
}
