//! Cart composition: the product-modal state machine and menu pricing.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{CartItem, CartTopping, Modifier, ModifierGroup, Product};

use super::store::{DataStore, GroupedModifiers};

/// Sizes applicable to a product: its own sizes win, the global açaí list
/// applies to the açaí category, anything else is sizeless.
pub fn applicable_sizes(store: &DataStore, product: &Product) -> Vec<Modifier> {
    if !product.product_specific_sizes.is_empty() {
        return product.product_specific_sizes.clone();
    }
    if product.uses_global_sizes() {
        return store.sizes.get();
    }
    Vec::new()
}

/// Menu-card starting price: cheapest size when sizes apply, else the base price.
pub fn starting_price(store: &DataStore, product: &Product) -> Decimal {
    let sizes = applicable_sizes(store, product);
    sizes
        .iter()
        .map(|s| s.price)
        .min()
        .unwrap_or(product.base_price)
}

/// The product's attached modifier groups, in display order, each with its
/// toppings; groups with no toppings are omitted.
pub fn groups_with_toppings(store: &DataStore, product: &Product) -> Vec<GroupedModifiers> {
    let all_groups = store.modifier_groups.read();
    let all_toppings = store.toppings.read();

    product
        .display_group_order()
        .iter()
        .filter_map(|id| all_groups.iter().find(|g| &g.id == id))
        .map(|group| GroupedModifiers {
            group: group.clone(),
            modifiers: all_toppings
                .iter()
                .filter(|t| t.group_id.as_deref() == Some(group.id.as_str()))
                .cloned()
                .collect(),
        })
        .filter(|g| !g.modifiers.is_empty())
        .collect()
}

/// Composition state for one line item.
///
/// Selection rules: when sizes apply exactly one must be chosen; every
/// required attached group needs at least one topping; exclusive groups
/// (`max_selection == 1`) replace the prior pick, multi groups accumulate
/// up to their cap.
pub struct ItemBuilder {
    product: Product,
    sizes: Vec<Modifier>,
    groups: Vec<GroupedModifiers>,
    selected_size: Option<Modifier>,
    toppings: Vec<CartTopping>,
    notes: String,
}

impl ItemBuilder {
    pub fn new(store: &DataStore, product: Product) -> Self {
        let sizes = applicable_sizes(store, &product);
        let groups = groups_with_toppings(store, &product);
        // Preselect the first size, matching the modal.
        let selected_size = sizes.first().cloned();
        Self {
            product,
            sizes,
            groups,
            selected_size,
            toppings: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn sizes(&self) -> &[Modifier] {
        &self.sizes
    }

    pub fn groups(&self) -> &[GroupedModifiers] {
        &self.groups
    }

    pub fn select_size(&mut self, size_id: &str) {
        self.selected_size = self.sizes.iter().find(|s| s.id == size_id).cloned();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn is_topping_selected(&self, topping_id: &str) -> bool {
        self.toppings.iter().any(|t| t.modifier.id == topping_id)
    }

    fn selected_in_group(&self, group_id: &str) -> usize {
        self.toppings
            .iter()
            .filter(|t| t.modifier.group_id.as_deref() == Some(group_id))
            .count()
    }

    /// Toggle a topping on or off. Returns whether the topping is selected
    /// afterwards; a toggle-on that would exceed the group cap is refused.
    pub fn toggle_topping(&mut self, topping: &Modifier, group: &ModifierGroup) -> bool {
        if self.is_topping_selected(&topping.id) {
            self.toppings.retain(|t| t.modifier.id != topping.id);
            return false;
        }

        if group.max_selection == 1 {
            // Exclusive choice: the new pick replaces anything in the group.
            self.toppings
                .retain(|t| t.modifier.group_id.as_deref() != Some(group.id.as_str()));
        } else if self.selected_in_group(&group.id) >= group.max_selection as usize {
            return false;
        }

        self.toppings.push(CartTopping {
            modifier: topping.clone(),
            quantity: 1,
        });
        true
    }

    pub fn is_selection_valid(&self) -> bool {
        if !self.sizes.is_empty() && self.selected_size.is_none() {
            return false;
        }
        self.groups
            .iter()
            .filter(|g| g.group.is_required)
            .all(|g| self.selected_in_group(&g.group.id) > 0)
    }

    pub fn total_price(&self) -> Decimal {
        let size = self.selected_size.as_ref().map(|s| s.price).unwrap_or(Decimal::ZERO);
        let toppings: Decimal = self.toppings.iter().map(CartTopping::line_price).sum();
        self.product.base_price + size + toppings
    }

    pub fn total_cost(&self) -> Decimal {
        let size = self.selected_size.as_ref().map(|s| s.cost).unwrap_or(Decimal::ZERO);
        let toppings: Decimal = self.toppings.iter().map(CartTopping::line_cost).sum();
        self.product.cost + size + toppings
    }

    /// Finish composition. Sizeless products get the implicit "Único" size.
    pub fn build(self) -> Result<CartItem, StoreError> {
        if !self.is_selection_valid() {
            return Err(StoreError::invalid(
                "selection is incomplete: missing size or required modifier",
            ));
        }

        let total_price = self.total_price();
        let total_cost = self.total_cost();
        let size = self.selected_size.unwrap_or_else(|| Modifier {
            id: format!("{}-default", self.product.id),
            name: "Único".to_string(),
            price: Decimal::ZERO,
            cost: Decimal::ZERO,
            group_id: None,
        });

        Ok(CartItem {
            id: Uuid::new_v4().to_string(),
            product: self.product,
            size,
            toppings: self.toppings,
            notes: self.notes,
            total_price,
            total_cost,
        })
    }
}
