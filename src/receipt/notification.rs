//! Merchant order notification

use std::fmt::{self, Write};

use crate::checkout::order::Order;

/// Plain-text message telling the merchant a new order needs processing.
#[derive(Debug, Clone, Copy)]
pub struct OrderNotification<'o> {
    order: &'o Order,
}

impl<'o> OrderNotification<'o> {
    /// Create a notification for `order`.
    #[must_use]
    pub fn new(order: &'o Order) -> Self {
        Self { order }
    }

    /// Render the notification body.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OrderNotification<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = self.order;

        let mut items = String::new();

        for line in order.lines() {
            writeln!(
                items,
                "- {} x {} ({} each) = {}",
                line.quantity, line.name, line.unit_price, line.line_total
            )?;
        }

        writeln!(f, "New Order Received - Zelie Jewelry")?;
        writeln!(f)?;
        writeln!(f, "Order Details:")?;
        writeln!(f, "- Order: {}", order.id())?;
        writeln!(f, "- Customer: {}", order.shipping().full_name())?;
        writeln!(f, "- Email: {}", order.contact().email.trim())?;
        writeln!(f, "- Order Total: {}", order.totals().grand_total())?;
        writeln!(f, "- Payment Method: {}", order.payment())?;
        writeln!(
            f,
            "- Order Date: {}",
            order.placed_at().strftime("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(f)?;
        writeln!(f, "Items Ordered:")?;
        write!(f, "{items}")?;
        writeln!(f)?;
        writeln!(f, "Shipping Address:")?;
        writeln!(f, "{}", order.shipping())?;
        writeln!(f)?;
        writeln!(f, "Please process this order promptly.")?;
        writeln!(f)?;
        writeln!(f, "Best regards,")?;
        writeln!(f, "Zelie Jewelry System")
    }
}
