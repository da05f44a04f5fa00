//! Storefront Example
//!
//! Browses the fixture catalog, fills a cart from the items fixture and, with `--checkout`,
//! pays for it through the simulated gateway and prints the receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-q` and `-c` to search and filter the catalog
//! Use `--checkout` to submit the cart

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zelie::{
    checkout::{Checkout, SimulatedGateway},
    fixtures::Fixture,
    receipt::{OrderNotification, Receipt},
    utils::StorefrontArgs,
};

/// Storefront Example
#[expect(clippy::print_stdout, reason = "Example code")]
#[tokio::main(flavor = "current_thread")]
pub async fn main() -> Result<()> {
    let args = StorefrontArgs::parse();

    tracing_subscriber::fmt()
        .compact()
        .with_target(true)
        .with_env_filter(
            EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let fixture = Fixture::from_set_in(&args.fixtures_dir, &args.fixture)?;
    let catalog = fixture.catalog()?;

    println!("Categories: {}", catalog.categories().join(" | "));
    println!();

    let query = args.catalog_query();

    for product in catalog.filter(&query) {
        let stars = "★".repeat(usize::from(product.rating.filled_stars()));
        let stock = if product.in_stock { "" } else { "  (out of stock)" };

        println!(
            "{:>4}  {:<28} {:<10} {:>12}  {stars:<5} {} ({} reviews){stock}",
            product.id.to_string(),
            product.name,
            product.category,
            product.price.to_string(),
            product.rating,
            product.reviews,
        );
    }

    let mut cart = fixture.cart()?;
    let policy = args.pricing_policy(fixture.policy())?;
    let totals = cart.totals(&policy)?;

    println!();
    println!(
        "Cart: {} items, subtotal {}, total {}",
        cart.total_item_count(),
        totals.subtotal(),
        totals.grand_total()
    );

    if !args.checkout {
        return Ok(());
    }

    let form = fixture.checkout_form(&args.fixture)?;
    let checkout = Checkout::new(SimulatedGateway::new(args.delay()), policy);

    println!("Processing payment...");

    let confirmation = checkout.submit(&mut cart, &form).await?;

    Receipt::from_order(&confirmation.order)
        .with_color(!args.no_color)
        .write_to(io::stdout().lock())?;

    println!("{}", OrderNotification::new(&confirmation.order).render());

    Ok(())
}
