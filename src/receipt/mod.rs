//! Receipt

use std::io;

use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    checkout::order::{Order, OrderLine},
    pricing::CheckoutTotals,
};

mod notification;

pub use notification::OrderNotification;

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Printable summary of a placed order.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'o> {
    order: &'o Order,
    color: bool,
}

impl<'o> Receipt<'o> {
    /// Create a receipt for `order`, rendered with ANSI colours.
    #[must_use]
    pub fn from_order(order: &'o Order) -> Self {
        Self { order, color: true }
    }

    /// Enable or disable ANSI colours.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// The order being described.
    #[must_use]
    pub fn order(&self) -> &'o Order {
        self.order
    }

    /// Purchased lines
    #[must_use]
    pub fn lines(&self) -> &'o [OrderLine] {
        self.order.lines()
    }

    /// Checkout totals
    #[must_use]
    pub fn totals(&self) -> &'o CheckoutTotals {
        self.order.totals()
    }

    /// Writes the receipt table and summary to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Product", "Unit Price", "Qty", "Line Total"]);

        for (idx, line) in self.lines().iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                format!("{}", line.unit_price),
                line.quantity.to_string(),
                format!("{}", line.line_total),
            ]);
        }

        writeln!(
            out,
            "\nOrder {} placed {}",
            self.order.id(),
            self.order.placed_at().strftime("%Y-%m-%d %H:%M UTC")
        )
        .map_err(|_err| ReceiptError::IO)?;

        self.write_table(&mut out, builder)?;
        self.write_summary(&mut out)?;

        Ok(())
    }

    fn write_table(&self, out: &mut impl io::Write, builder: Builder) -> Result<(), ReceiptError> {
        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Columns::new(2..5), Alignment::right());

        if !self.color {
            return writeln!(out, "{table}").map_err(|_err| ReceiptError::IO);
        }

        table.modify(Rows::first(), Color::BOLD);

        let table_str = grey_borders(&table.to_string());

        writeln!(out, "{table_str}").map_err(|_err| ReceiptError::IO)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let totals = self.totals();

        let shipping = if totals.has_free_shipping() {
            "Free".to_string()
        } else {
            format!("{}", totals.shipping())
        };

        let total_label = if self.color {
            format!(" {BOLD}Total:{RESET}")
        } else {
            " Total:".to_string()
        };

        let rows: SmallVec<[(&str, String); 4]> = SmallVec::from_buf([
            (" Subtotal:", format!("{}  ", totals.subtotal())),
            (" Shipping:", format!("{shipping}  ")),
            (" Tax:", format!("{}  ", totals.tax())),
            (total_label.as_str(), format!("{}  ", totals.grand_total())),
        ]);

        let label_width = rows
            .iter()
            .map(|(label, _)| visible_width(label))
            .max()
            .unwrap_or_default();

        let value_width = rows
            .iter()
            .map(|(_, value)| visible_width(value))
            .max()
            .unwrap_or_default();

        for (label, value) in &rows {
            write_summary_line(out, label, value, label_width, value_width)?;
        }

        writeln!(out).map_err(|_err| ReceiptError::IO)
    }
}

const GREY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn is_border(ch: char) -> bool {
    ('\u{2500}'..='\u{257F}').contains(&ch)
}

/// Greys out each run of box-drawing characters in a rendered table.
fn grey_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut rest = table;

    while let Some(start) = rest.find(is_border) {
        let (plain, tail) = rest.split_at(start);
        let run_len = tail.find(|ch: char| !is_border(ch)).unwrap_or(tail.len());
        let (run, after) = tail.split_at(run_len);

        out.push_str(plain);
        out.push_str(GREY);
        out.push_str(run);
        out.push_str(RESET);

        rest = after;
    }

    out.push_str(rest);
    out
}

/// Column width of `s` once ANSI escape sequences are stripped.
fn visible_width(s: &str) -> usize {
    s.split('\x1b')
        .enumerate()
        .map(|(idx, chunk)| {
            if idx == 0 {
                chunk.chars().count()
            } else {
                chunk
                    .split_once(|ch: char| ch.is_ascii_alphabetic())
                    .map_or(0, |(_, text)| text.chars().count())
            }
        })
        .sum()
}

/// Writes a summary line with a right-aligned label and a right-aligned value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), ReceiptError> {
    let label_pad = label_col_width.saturating_sub(visible_width(label));
    let value_pad = value_col_width.saturating_sub(visible_width(value));

    writeln!(
        out,
        "{:label_pad$}{label}  {:value_pad$}{value}",
        "", ""
    )
    .map_err(|_err| ReceiptError::IO)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        cart::CartLedger,
        pricing::PricingPolicy,
        test_support::{self, complete_form, lookup},
    };

    use super::*;

    fn render(order: &Order, color: bool) -> Result<String, ReceiptError> {
        let mut out = Vec::new();

        Receipt::from_order(order).with_color(color).write_to(&mut out)?;

        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn receipt_lists_lines_and_totals() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);
        cart.add_item(lookup(&catalog, 1)?, 1)?;
        cart.add_item(lookup(&catalog, 2)?, 2)?;

        let order = Order::from_cart(&cart, &complete_form(), &PricingPolicy::default())?;
        let text = render(&order, false)?;

        assert!(text.contains("Elegant Diamond Ring"), "got {text}");
        assert!(text.contains("Pearl Drop Earrings"), "got {text}");
        assert!(text.contains("Shipping:"), "got {text}");
        assert!(text.contains("Free"), "got {text}");
        assert!(
            text.contains(&order.totals().grand_total().to_string()),
            "got {text}"
        );
        assert!(!text.contains('\x1b'), "plain receipt contains escapes: {text}");

        Ok(())
    }

    #[test]
    fn paid_shipping_shows_fee() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);
        cart.add_one(lookup(&catalog, 2)?)?;

        let order = Order::from_cart(&cart, &complete_form(), &PricingPolicy::default())?;
        let text = render(&order, false)?;

        assert!(!text.contains("Free"), "got {text}");
        assert!(
            text.contains(&order.totals().shipping().to_string()),
            "got {text}"
        );

        Ok(())
    }

    #[test]
    fn colored_receipt_greys_borders() -> TestResult {
        let catalog = test_support::catalog()?;
        let mut cart = CartLedger::for_catalog(&catalog);
        cart.add_one(lookup(&catalog, 3)?)?;

        let order = Order::from_cart(&cart, &complete_form(), &PricingPolicy::default())?;
        let text = render(&order, true)?;

        assert!(text.contains("\x1b[90m"), "got {text}");

        Ok(())
    }

    #[test]
    fn visible_width_ignores_ansi_sequences() {
        assert_eq!(visible_width("\x1b[1mTotal:\x1b[0m"), 6);
        assert_eq!(visible_width("plain"), 5);
        assert_eq!(visible_width(" \x1b[90m│\x1b[0m a"), 4);
    }

    #[test]
    fn grey_borders_wraps_each_run_once() {
        assert_eq!(
            grey_borders("│ a ││"),
            "\x1b[90m│\x1b[0m a \x1b[90m││\x1b[0m"
        );
    }
}
