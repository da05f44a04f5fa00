//! Shared helpers for unit tests.

use rusty_money::{Money, iso::USD};
use smallvec::smallvec;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    checkout::form::{
        CardDetails, CheckoutForm, ContactDetails, Country, PaymentDetails, ShippingAddress,
    },
    products::{Product, ProductId, Rating},
};

/// An in-stock USD product priced in whole dollars.
pub(crate) fn product(id: u32, name: &str, category: &str, dollars: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: format!("{name} from the {category} collection"),
        category: category.to_string(),
        price: Money::from_minor(dollars * 100, USD),
        images: smallvec![format!("{id}.jpg")],
        in_stock: true,
        rating: Rating::default(),
        reviews: 0,
    }
}

/// Ring ($2499), earrings ($899), bracelet ($1899) and an out-of-stock pendant ($1799).
pub(crate) fn catalog() -> Result<Catalog, CatalogError> {
    let mut pendant = product(6, "Emerald Pendant", "Necklaces", 1799);
    pendant.in_stock = false;

    Catalog::new(
        [
            product(1, "Elegant Diamond Ring", "Rings", 2499),
            product(2, "Pearl Drop Earrings", "Earrings", 899),
            product(3, "Gold Tennis Bracelet", "Bracelets", 1899),
            pendant,
        ],
        USD,
    )
}

/// A product id the test catalog does not contain.
#[derive(Debug, Error)]
#[error("product {0} missing from test catalog")]
pub(crate) struct MissingProduct(u32);

/// Looks up a product that the test catalog is known to contain.
pub(crate) fn lookup(catalog: &Catalog, id: u32) -> Result<&Product, MissingProduct> {
    catalog.get(ProductId::new(id)).ok_or(MissingProduct(id))
}

/// A fully filled-in card checkout form.
pub(crate) fn complete_form() -> CheckoutForm {
    CheckoutForm {
        contact: ContactDetails {
            email: "ada@example.com".to_string(),
        },
        shipping: ShippingAddress {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "12 St James's Square".to_string(),
            city: "London".to_string(),
            postal_code: "SW1Y 4JH".to_string(),
            country: Some(Country::UnitedKingdom),
        },
        payment: PaymentDetails::Card(CardDetails {
            number: "4242 4242 4242 4242".to_string(),
            expiry: "04/27".to_string(),
            cvv: "123".to_string(),
        }),
    }
}
