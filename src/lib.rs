//! Zelie
//!
//! Zelie is the storefront engine behind a small jewelry shop: a product catalog with
//! search and category filters, a shopping cart ledger, checkout totals with shipping and
//! tax, and a simulated payment checkout.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod fixtures;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod utils;

#[cfg(test)]
mod test_support;
