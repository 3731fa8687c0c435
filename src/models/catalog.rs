//! Catalog model: categories, modifiers, products, delivery zones.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The one category whose products fall back to the global size list.
pub const GLOBAL_SIZE_CATEGORY: &str = "acai";

/// Displayed product grouping. Deleting one orphans nothing automatically;
/// read sites must tolerate products pointing at a missing category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A named bucket of modifiers with required/exclusive semantics.
/// `max_selection == 1` means exclusive choice; above that, up-to-N.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierGroup {
    pub id: String,
    pub name: String,
    pub is_required: bool,
    pub max_selection: u32,
}

/// A priced add-on. With a `group_id` it is a topping under that group;
/// without one it is a global açaí size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub cost: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl Modifier {
    pub fn is_global_size(&self) -> bool {
        self.group_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub base_price: Decimal,
    pub cost: Decimal,
    pub category_id: String,
    #[serde(default)]
    pub product_specific_sizes: Vec<Modifier>,
    #[serde(default)]
    pub group_ids: Vec<String>,
    /// Display permutation of `group_ids`; `group_ids` order applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_order: Option<Vec<String>>,
}

impl Product {
    /// Whether the global açaí size list applies to this product.
    pub fn uses_global_sizes(&self) -> bool {
        self.product_specific_sizes.is_empty() && self.category_id == GLOBAL_SIZE_CATEGORY
    }

    /// Group ids in display order.
    pub fn display_group_order(&self) -> &[String] {
        match &self.group_order {
            Some(order) if !order.is_empty() => order,
            _ => &self.group_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryZone {
    pub id: String,
    pub neighborhood: String,
    pub fee: Decimal,
}
