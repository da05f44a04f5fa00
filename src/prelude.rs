//! Zelie prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartError, CartLedger, line_item::LineItem},
    catalog::{ALL_CATEGORIES, Catalog, CatalogError, CatalogQuery, CategoryFilter},
    checkout::{
        Authorization, CardDetails, Checkout, CheckoutError, CheckoutForm, ContactDetails,
        Country, Order, OrderConfirmation, OrderLine, PaymentDetails, PaymentError,
        PaymentGateway, PaymentMethod, ShippingAddress, SimulatedGateway,
    },
    fixtures::{Fixture, FixtureError},
    prices::Price,
    pricing::{CheckoutTotals, PricingError, PricingPolicy, TaxRounding},
    products::{Product, ProductId, Rating},
    receipt::{OrderNotification, Receipt, ReceiptError},
};
