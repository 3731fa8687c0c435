//! Write-through reactive data store.
//!
//! Each collection lives in a [`Cell`]: mutations commit in memory first and
//! then write through to the KV namespace synchronously, so a snapshot
//! written for step N is durable before any snapshot for step N+1. Readers
//! always observe the committed value; computed views re-derive from the
//! cells on every read, which keeps propagation inside the mutating turn.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    AccountPayable, CartItem, CashRegisterSession, Category, DeliveryZone, Expense, Modifier,
    ModifierGroup, Order, Product, Settings, User,
};

use super::kv::Namespace;

/// A single named state cell with optional KV write-through.
pub struct Cell<T> {
    value: RefCell<T>,
    ns: Rc<Namespace>,
    /// `None` for process-local cells (cart, current user).
    key: Option<&'static str>,
}

impl<T: serde::Serialize> Cell<T> {
    fn new(ns: Rc<Namespace>, key: Option<&'static str>, initial: T) -> Self {
        Self {
            value: RefCell::new(initial),
            ns,
            key,
        }
    }

    /// Borrowed read of the current value.
    pub fn read(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    /// Cloned snapshot of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
        self.persist();
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.borrow_mut());
        self.persist();
    }

    fn persist(&self) {
        if let Some(key) = self.key {
            self.ns.put(key, &*self.value.borrow());
        }
    }
}

/// Identity access for the generic catalog upsert.
pub trait HasId {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! impl_has_id {
    ($($ty:ty),+ $(,)?) => {
        $(impl HasId for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        })+
    };
}

impl_has_id!(
    Product,
    Category,
    ModifierGroup,
    Modifier,
    DeliveryZone,
    User,
    Expense,
    AccountPayable,
);

/// A modifier group together with the toppings filed under it.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedModifiers {
    pub group: ModifierGroup,
    pub modifiers: Vec<Modifier>,
}

/// Authoritative in-memory state: eight catalog collections, four
/// transactional collections and two process-local cells.
pub struct DataStore {
    // Catalog (version-gated against the seed, see services::sync).
    pub settings: Cell<Settings>,
    pub categories: Cell<Vec<Category>>,
    pub sizes: Cell<Vec<Modifier>>,
    pub modifier_groups: Cell<Vec<ModifierGroup>>,
    pub toppings: Cell<Vec<Modifier>>,
    pub products: Cell<Vec<Product>>,
    pub users: Cell<Vec<User>>,
    pub delivery_zones: Cell<Vec<DeliveryZone>>,

    // Transactional (always loaded from KV, independent of the seed version).
    pub orders: Cell<Vec<Order>>,
    pub expenses: Cell<Vec<Expense>>,
    pub accounts_payable: Cell<Vec<AccountPayable>>,
    pub cash_register_history: Cell<Vec<CashRegisterSession>>,

    // Process-local, never persisted.
    pub cart: Cell<Vec<CartItem>>,
    pub current_user: Cell<Option<User>>,
}

impl DataStore {
    /// Empty store wired to a namespace. Hydration is the sync manager's job.
    pub fn new(ns: Rc<Namespace>) -> Self {
        Self {
            settings: Cell::new(ns.clone(), Some("settings"), Settings::default()),
            categories: Cell::new(ns.clone(), Some("categories"), Vec::new()),
            sizes: Cell::new(ns.clone(), Some("sizes"), Vec::new()),
            modifier_groups: Cell::new(ns.clone(), Some("modifierCategories"), Vec::new()),
            toppings: Cell::new(ns.clone(), Some("toppings"), Vec::new()),
            products: Cell::new(ns.clone(), Some("products"), Vec::new()),
            users: Cell::new(ns.clone(), Some("users"), Vec::new()),
            delivery_zones: Cell::new(ns.clone(), Some("deliveryZones"), Vec::new()),
            orders: Cell::new(ns.clone(), Some("orders"), Vec::new()),
            expenses: Cell::new(ns.clone(), Some("expenses"), Vec::new()),
            accounts_payable: Cell::new(ns.clone(), Some("accountsPayable"), Vec::new()),
            cash_register_history: Cell::new(
                ns.clone(),
                Some("cashRegisterHistory"),
                Vec::new(),
            ),
            cart: Cell::new(ns.clone(), None, Vec::new()),
            current_user: Cell::new(ns, None, None),
        }
    }

    // --- Computed views -------------------------------------------------

    pub fn cart_total(&self) -> Decimal {
        self.cart.read().iter().map(|i| i.total_price).sum()
    }

    /// First open session, if any.
    pub fn active_cash_register(&self) -> Option<CashRegisterSession> {
        self.cash_register_history
            .read()
            .iter()
            .find(|s| s.is_open())
            .cloned()
    }

    /// Every modifier group with the toppings whose `group_id` matches.
    pub fn grouped_modifiers(&self) -> Vec<GroupedModifiers> {
        let toppings = self.toppings.read();
        self.modifier_groups
            .read()
            .iter()
            .map(|group| GroupedModifiers {
                group: group.clone(),
                modifiers: toppings
                    .iter()
                    .filter(|m| m.group_id.as_deref() == Some(group.id.as_str()))
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Groups for the product editor: the product's selected groups in their
    /// stored order, then every unselected group in catalog order.
    pub fn product_modifier_groups_for_editing(&self, product: &Product) -> Vec<ModifierGroup> {
        let all = self.modifier_groups.read();

        let selected: Vec<ModifierGroup> = product
            .display_group_order()
            .iter()
            .filter_map(|id| all.iter().find(|g| &g.id == id).cloned())
            .collect();

        let unselected = all
            .iter()
            .filter(|g| !product.group_ids.contains(&g.id))
            .cloned();

        selected.into_iter().chain(unselected).collect()
    }

    /// Zones sorted by neighborhood, case-insensitively.
    pub fn sorted_delivery_zones(&self) -> Vec<DeliveryZone> {
        let mut zones = self.delivery_zones.get();
        zones.sort_by(|a, b| {
            a.neighborhood
                .to_lowercase()
                .cmp(&b.neighborhood.to_lowercase())
        });
        zones
    }

    pub fn zone_by_neighborhood(&self, neighborhood: &str) -> Option<DeliveryZone> {
        self.delivery_zones
            .read()
            .iter()
            .find(|z| z.neighborhood == neighborhood)
            .cloned()
    }

    pub fn zone_by_id(&self, id: &str) -> Option<DeliveryZone> {
        self.delivery_zones
            .read()
            .iter()
            .find(|z| z.id == id)
            .cloned()
    }

    // --- Cart -----------------------------------------------------------

    /// Append a composed item; every add gets a fresh id.
    pub fn add_to_cart(&self, mut item: CartItem) -> CartItem {
        item.id = Uuid::new_v4().to_string();
        self.cart.update(|cart| cart.push(item.clone()));
        item
    }

    pub fn remove_from_cart(&self, item_id: &str) {
        self.cart.update(|cart| cart.retain(|i| i.id != item_id));
    }

    pub fn clear_cart(&self) {
        self.cart.set(Vec::new());
    }

    // --- Admin CRUD -----------------------------------------------------
    //
    // Upsert by id: existing ids are replaced in place; empty or `new_`-
    // prefixed ids get a fresh uuid and are appended. Deletions filter by id
    // and perform no referential cleanup; dangling references are tolerated
    // at read sites.

    fn upsert<T: HasId + Clone>(list: &mut Vec<T>, mut item: T) {
        let is_new = item.id().is_empty() || item.id().starts_with("new_");
        if !is_new {
            if let Some(existing) = list.iter_mut().find(|i| i.id() == item.id()) {
                *existing = item;
                return;
            }
        }
        item.set_id(Uuid::new_v4().to_string());
        list.push(item);
    }

    pub fn save_product(&self, mut product: Product) {
        // A product with its own sizes prices through them exclusively.
        if !product.product_specific_sizes.is_empty() {
            product.base_price = Decimal::ZERO;
        }
        self.products.update(|list| Self::upsert(list, product));
    }

    pub fn delete_product(&self, id: &str) {
        self.products.update(|list| list.retain(|p| p.id != id));
    }

    pub fn save_category(&self, category: Category) {
        self.categories.update(|list| Self::upsert(list, category));
    }

    pub fn delete_category(&self, id: &str) {
        self.categories.update(|list| list.retain(|c| c.id != id));
    }

    /// Routes by `group_id`: toppings carry one, global sizes do not.
    pub fn save_modifier(&self, modifier: Modifier) {
        if modifier.group_id.is_some() {
            self.toppings.update(|list| Self::upsert(list, modifier));
        } else {
            self.sizes.update(|list| Self::upsert(list, modifier));
        }
    }

    pub fn delete_modifier(&self, id: &str) {
        self.toppings.update(|list| list.retain(|m| m.id != id));
        self.sizes.update(|list| list.retain(|m| m.id != id));
    }

    pub fn save_modifier_group(&self, group: ModifierGroup) {
        self.modifier_groups
            .update(|list| Self::upsert(list, group));
    }

    pub fn delete_modifier_group(&self, id: &str) {
        self.modifier_groups
            .update(|list| list.retain(|g| g.id != id));
    }

    /// Replace the whole list; used by the admin's drag-reorder.
    pub fn reorder_modifier_groups(&self, groups: Vec<ModifierGroup>) {
        self.modifier_groups.set(groups);
    }

    pub fn save_delivery_zone(&self, zone: DeliveryZone) {
        self.delivery_zones.update(|list| Self::upsert(list, zone));
    }

    pub fn delete_delivery_zone(&self, id: &str) {
        self.delivery_zones
            .update(|list| list.retain(|z| z.id != id));
    }

    pub fn save_user(&self, user: User) {
        self.users.update(|list| Self::upsert(list, user));
    }

    pub fn delete_user(&self, id: &str) {
        self.users.update(|list| list.retain(|u| u.id != id));
    }

    pub fn save_expense(&self, expense: Expense) {
        self.expenses.update(|list| Self::upsert(list, expense));
    }

    pub fn delete_expense(&self, id: &str) {
        self.expenses.update(|list| list.retain(|e| e.id != id));
    }

    pub fn save_account_payable(&self, payable: AccountPayable) {
        self.accounts_payable
            .update(|list| Self::upsert(list, payable));
    }

    pub fn delete_account_payable(&self, id: &str) {
        self.accounts_payable
            .update(|list| list.retain(|p| p.id != id));
    }

    pub fn toggle_account_payable_paid(&self, id: &str) {
        self.accounts_payable.update(|list| {
            if let Some(payable) = list.iter_mut().find(|p| p.id == id) {
                payable.is_paid = !payable.is_paid;
            }
        });
    }

    pub fn update_settings(&self, settings: Settings) {
        self.settings.set(settings);
    }
}
