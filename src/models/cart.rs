//! Cart line items. The cart is process-local and is never persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::{Modifier, Product};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartTopping {
    pub modifier: Modifier,
    pub quantity: u32,
}

impl CartTopping {
    pub fn line_price(&self) -> Decimal {
        self.modifier.price * Decimal::from(self.quantity)
    }

    pub fn line_cost(&self) -> Decimal {
        self.modifier.cost * Decimal::from(self.quantity)
    }
}

/// One composed line in the cart. `product` and `size` are snapshots taken
/// at composition time; later catalog edits do not reach into placed carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique per add; two identical compositions get distinct ids.
    pub id: String,
    pub product: Product,
    pub size: Modifier,
    pub toppings: Vec<CartTopping>,
    pub notes: String,
    pub total_price: Decimal,
    pub total_cost: Decimal,
}

impl CartItem {
    /// Price of the item before toppings (base + size).
    pub fn base_price(&self) -> Decimal {
        let toppings: Decimal = self.toppings.iter().map(CartTopping::line_price).sum();
        self.total_price - toppings
    }
}
