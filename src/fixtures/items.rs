//! Item Fixtures

use serde::Deserialize;

use crate::products::ProductId;

/// Wrapper for cart items in YAML
#[derive(Debug, Deserialize)]
pub struct ItemsFixture {
    /// Cart additions in the order they are made
    pub items: Vec<ItemFixture>,
}

/// One cart addition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ItemFixture {
    /// Product to add
    pub product: ProductId,

    /// Units to add, defaults to one
    #[serde(default = "quantity_default")]
    pub quantity: i64,
}

fn quantity_default() -> i64 {
    1
}
