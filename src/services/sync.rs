//! Seed hydration, export and import of the catalog document.
//!
//! A versioned `MenuData` document is compiled into the binary. On boot the
//! sync manager compares its version against the persisted one and either
//! adopts the newer seed wholesale or rebuilds state from the KV namespace.
//! Export emits the same document shape as a TypeScript module so it can be
//! dropped back into the build as the next seed; import accepts that module
//! text (or bare JSON) and replaces the catalog atomically.

use std::rc::Rc;

use chrono::Utc;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::{
    Category, DeliveryZone, Modifier, ModifierGroup, Order, Product, Settings, User,
};

use super::kv::Namespace;
use super::store::DataStore;

/// The full catalog document: a version stamp plus every catalog collection.
/// Orders ride along for legacy imports but are stripped from exports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuData {
    pub version: i64,
    pub settings: Settings,
    pub categories: Vec<Category>,
    pub sizes: Vec<Modifier>,
    #[serde(rename = "modifierCategories")]
    pub modifier_groups: Vec<ModifierGroup>,
    pub toppings: Vec<Modifier>,
    pub products: Vec<Product>,
    pub users: Vec<User>,
    pub delivery_zones: Vec<DeliveryZone>,
    pub orders: Vec<Order>,
}

/// Collections an import document must carry. `version` and `orders` are
/// optional for backwards compatibility with older exports.
const REQUIRED_COLLECTIONS: [&str; 8] = [
    "settings",
    "categories",
    "sizes",
    "modifierCategories",
    "toppings",
    "products",
    "users",
    "deliveryZones",
];

const SEED_JSON: &str = include_str!("../../data/menu-data.json");

static SEED: Lazy<MenuData> = Lazy::new(|| match serde_json::from_str(SEED_JSON) {
    Ok(data) => data,
    Err(e) => {
        tracing::error!(error = %e, "compiled seed failed to parse, booting empty");
        MenuData::default()
    }
});

/// The compiled-in seed document.
pub fn seed() -> &'static MenuData {
    &SEED
}

/// Boot-time hydration plus the export/import surface.
pub struct SyncManager {
    store: Rc<DataStore>,
    ns: Rc<Namespace>,
}

impl SyncManager {
    pub fn new(store: Rc<DataStore>, ns: Rc<Namespace>) -> Self {
        Self { store, ns }
    }

    /// Hydrate from the compiled seed.
    pub fn hydrate(&self) {
        self.hydrate_from(seed());
    }

    /// Version gate: a seed newer than the persisted version (or a namespace
    /// with no settings at all, i.e. first boot or a prefix bump) wins and is
    /// written through; otherwise persisted state wins key by key, falling
    /// back to the seed for any key that is absent or unparsable.
    /// Transactional collections always load from the namespace.
    pub fn hydrate_from(&self, seed: &MenuData) {
        let local_version: i64 = self.ns.get("version").unwrap_or(-1);
        let local_settings: Option<Settings> = self.ns.get("settings");

        if seed.version > local_version || local_settings.is_none() {
            tracing::info!(
                seed_version = seed.version,
                local_version,
                "adopting seed catalog"
            );
            self.store.settings.set(seed.settings.clone());
            self.store.categories.set(seed.categories.clone());
            self.store.sizes.set(seed.sizes.clone());
            self.store.modifier_groups.set(seed.modifier_groups.clone());
            self.store.toppings.set(seed.toppings.clone());
            self.store.products.set(seed.products.clone());
            self.store.users.set(seed.users.clone());
            self.store.delivery_zones.set(seed.delivery_zones.clone());
            self.ns.put("version", &seed.version);
        } else {
            tracing::info!(local_version, "loading catalog from storage");
            self.store
                .settings
                .set(local_settings.unwrap_or_else(|| seed.settings.clone()));
            self.store
                .categories
                .set(self.ns.get_or("categories", seed.categories.clone()));
            self.store
                .sizes
                .set(self.ns.get_or("sizes", seed.sizes.clone()));
            self.store.modifier_groups.set(
                self.ns
                    .get_or("modifierCategories", seed.modifier_groups.clone()),
            );
            self.store
                .toppings
                .set(self.ns.get_or("toppings", seed.toppings.clone()));
            self.store
                .products
                .set(self.ns.get_or("products", seed.products.clone()));
            self.store
                .users
                .set(self.ns.get_or("users", seed.users.clone()));
            self.store
                .delivery_zones
                .set(self.ns.get_or("deliveryZones", seed.delivery_zones.clone()));
        }

        self.store.orders.set(self.ns.get_or("orders", Vec::new()));
        self.store
            .expenses
            .set(self.ns.get_or("expenses", Vec::new()));
        self.store
            .accounts_payable
            .set(self.ns.get_or("accountsPayable", Vec::new()));
        self.store
            .cash_register_history
            .set(self.ns.get_or("cashRegisterHistory", Vec::new()));
    }

    /// Export the live catalog as a TypeScript module, stamped with the
    /// current time so re-importing (or recompiling) it outranks every
    /// existing installation. Returns `(file_name, contents)`.
    pub fn export(&self) -> Result<(String, String), StoreError> {
        let data = MenuData {
            version: Utc::now().timestamp_millis(),
            settings: self.store.settings.get(),
            categories: self.store.categories.get(),
            sizes: self.store.sizes.get(),
            modifier_groups: self.store.modifier_groups.get(),
            toppings: self.store.toppings.get(),
            products: self.store.products.get(),
            users: self.store.users.get(),
            delivery_zones: self.store.delivery_zones.get(),
            orders: Vec::new(),
        };
        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| StoreError::Persistence(e.into()))?;
        let contents = format!("export const MENU_DATA = {json};\n");
        Ok(("menu-data.ts".to_string(), contents))
    }

    /// Replace the catalog from pasted module text or bare JSON. Returns
    /// `true` on success; on any failure the live state is untouched.
    pub fn import(&self, raw: &str) -> bool {
        match self.parse_import(raw) {
            Ok(data) => {
                self.store.settings.set(data.settings);
                self.store.categories.set(data.categories);
                self.store.sizes.set(data.sizes);
                self.store.modifier_groups.set(data.modifier_groups);
                self.store.toppings.set(data.toppings);
                self.store.products.set(data.products);
                self.store.users.set(data.users);
                self.store.delivery_zones.set(data.delivery_zones);
                self.ns.put("version", &data.version);
                tracing::info!(version = data.version, "catalog imported");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "catalog import rejected");
                false
            }
        }
    }

    /// Full validation happens here, before any cell is touched.
    fn parse_import(&self, raw: &str) -> Result<MenuData, StoreError> {
        let json = extract_json_object(raw)
            .ok_or_else(|| StoreError::ImportFailure("no JSON object found".to_string()))?;

        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| StoreError::ImportFailure(format!("invalid JSON: {e}")))?;

        for key in REQUIRED_COLLECTIONS {
            if value.get(key).is_none() {
                return Err(StoreError::ImportFailure(format!(
                    "missing collection: {key}"
                )));
            }
        }

        let mut data: MenuData = serde_json::from_value(value)
            .map_err(|e| StoreError::ImportFailure(format!("malformed document: {e}")))?;

        // Versionless legacy exports outrank the current installation.
        if data.version <= 0 {
            data.version = Utc::now().timestamp_millis();
        }
        Ok(data)
    }
}

/// Slice out the outermost `{ ... }`, dropping any `export const X =`
/// wrapper and trailing semicolon around it.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end >= start).then(|| &raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::kv::MemoryKv;

    fn rig() -> (Rc<DataStore>, Rc<Namespace>) {
        let ns = Rc::new(Namespace::new(Rc::new(MemoryKv::new()), "test_"));
        (Rc::new(DataStore::new(ns.clone())), ns)
    }

    #[test]
    fn seed_document_parses() {
        let data = seed();
        assert!(data.version >= 1);
        assert_eq!(data.settings.opening_hours.len(), 7);
        assert!(!data.products.is_empty());
    }

    #[test]
    fn first_boot_adopts_seed() {
        let (store, ns) = rig();
        SyncManager::new(store.clone(), ns.clone()).hydrate();
        assert_eq!(store.settings.read().store_name, seed().settings.store_name);
        assert_eq!(ns.get::<i64>("version"), Some(seed().version));
    }

    #[test]
    fn newer_local_state_survives_hydration() {
        let (store, ns) = rig();
        let manager = SyncManager::new(store.clone(), ns.clone());
        manager.hydrate();

        let mut settings = store.settings.get();
        settings.store_name = "Renamed".to_string();
        store.update_settings(settings);
        ns.put("version", &(seed().version + 10));

        let store2 = Rc::new(DataStore::new(ns.clone()));
        SyncManager::new(store2.clone(), ns).hydrate();
        assert_eq!(store2.settings.read().store_name, "Renamed");
    }

    #[test]
    fn import_strips_module_wrapper() {
        let (store, ns) = rig();
        let manager = SyncManager::new(store.clone(), ns);
        manager.hydrate();

        let (_, contents) = manager.export().unwrap();
        assert!(contents.starts_with("export const MENU_DATA = {"));
        assert!(manager.import(&contents));
    }

    #[test]
    fn import_rejects_missing_collections_untouched() {
        let (store, ns) = rig();
        let manager = SyncManager::new(store.clone(), ns);
        manager.hydrate();
        let before = store.products.get();

        assert!(!manager.import(r#"{ "settings": {}, "categories": [] }"#));
        assert_eq!(store.products.get(), before);
    }

    #[test]
    fn versionless_import_gets_a_fresh_version() {
        let (store, ns) = rig();
        let manager = SyncManager::new(store.clone(), ns.clone());
        manager.hydrate();

        let (_, contents) = manager.export().unwrap();
        let json = extract_json_object(&contents).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(json).unwrap();
        value.as_object_mut().unwrap().remove("version");

        assert!(manager.import(&value.to_string()));
        assert!(ns.get::<i64>("version").unwrap() > seed().version);
    }
}
