//! Integration tests for submitting the jewelry fixture cart.

use std::time::Duration;

use async_trait::async_trait;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use zelie::{
    checkout::{
        Authorization, Checkout, CheckoutError, Order, PaymentError, PaymentGateway,
        PaymentMethod, SimulatedGateway,
    },
    fixtures::Fixture,
    receipt::{OrderNotification, Receipt},
};

/// Refuses every payment.
#[derive(Debug)]
struct DecliningGateway;

#[async_trait]
impl PaymentGateway for DecliningGateway {
    async fn authorize(&self, _order: &Order) -> Result<Authorization, PaymentError> {
        Err(PaymentError::Declined("card expired".to_string()))
    }
}

#[tokio::test(start_paused = true)]
async fn simulated_checkout_places_order_and_empties_cart() -> TestResult {
    let fixture = Fixture::from_set("jewelry")?;
    let form = fixture.checkout_form("jewelry")?;
    let mut cart = fixture.cart()?;

    let checkout = Checkout::new(
        SimulatedGateway::new(Duration::from_millis(250)),
        fixture.policy(),
    );

    let confirmation = checkout.submit(&mut cart, &form).await?;
    let order = &confirmation.order;

    assert!(cart.is_empty());
    assert_eq!(order.item_count(), 3);
    assert_eq!(order.totals().grand_total(), Money::from_minor(464_100, USD));
    assert_eq!(
        order.payment(),
        &PaymentMethod::Card {
            last_four: "4242".to_string()
        }
    );

    let mut receipt = Vec::new();
    Receipt::from_order(order)
        .with_color(false)
        .write_to(&mut receipt)?;
    let receipt = String::from_utf8_lossy(&receipt);

    assert!(receipt.contains("Elegant Diamond Ring"), "got {receipt}");
    assert!(receipt.contains("Free"), "got {receipt}");

    let notification = OrderNotification::new(order).render();

    assert!(notification.contains("- Customer: Ada Lovelace"), "got {notification}");

    Ok(())
}

#[tokio::test]
async fn declined_checkout_keeps_cart_for_retry() -> TestResult {
    let fixture = Fixture::from_set("jewelry")?;
    let form = fixture.checkout_form("jewelry")?;
    let mut cart = fixture.cart()?;

    let checkout = Checkout::new(DecliningGateway, fixture.policy());
    let result = checkout.submit(&mut cart, &form).await;

    assert!(matches!(
        result,
        Err(CheckoutError::PaymentDeclined(PaymentError::Declined(_)))
    ));
    assert_eq!(cart.total_item_count(), 3);

    Ok(())
}

#[tokio::test]
async fn incomplete_form_is_rejected_before_payment() -> TestResult {
    let fixture = Fixture::from_set("jewelry")?;
    let mut form = fixture.checkout_form("jewelry")?;
    let mut cart = fixture.cart()?;

    form.contact.email = "  ".to_string();

    let checkout = Checkout::new(DecliningGateway, fixture.policy());
    let result = checkout.submit(&mut cart, &form).await;

    assert_eq!(result.err(), Some(CheckoutError::MissingField("email")));
    assert_eq!(cart.len(), 2);

    Ok(())
}
