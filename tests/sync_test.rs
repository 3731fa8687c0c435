//! Seed hydration, export/import and KV persistence.

mod common;

use std::rc::Rc;

use common::{add_soda, counter_sale, TestRig};
use storefront_core::services::sync::{seed, MenuData, SyncManager};
use storefront_core::services::{DataStore, FileKv, Namespace};

fn fresh_store(ns: &Rc<Namespace>) -> Rc<DataStore> {
    let store = Rc::new(DataStore::new(ns.clone()));
    SyncManager::new(store.clone(), ns.clone()).hydrate();
    store
}

#[test]
fn first_boot_installs_the_seed_catalog() {
    let rig = TestRig::seeded();
    assert_eq!(rig.store.settings.read().store_name, "Açaí da Rafinha");
    assert_eq!(rig.store.products.read().len(), seed().products.len());
    assert_eq!(rig.ns.get::<i64>("version"), Some(seed().version));
}

#[test]
fn local_edits_survive_a_restart_at_equal_version() {
    let rig = TestRig::seeded();

    let mut settings = rig.store.settings.get();
    settings.store_name = "Açaí do Centro".to_string();
    rig.store.update_settings(settings);

    let store = fresh_store(&rig.ns);
    assert_eq!(store.settings.read().store_name, "Açaí do Centro");
}

#[test]
fn newer_seed_overwrites_local_catalog() {
    let rig = TestRig::seeded();

    let mut settings = rig.store.settings.get();
    settings.store_name = "Açaí do Centro".to_string();
    rig.store.update_settings(settings);

    let mut newer = seed().clone();
    newer.version = seed().version + 1;
    newer.settings.store_name = "Açaí 2.0".to_string();

    let store = Rc::new(DataStore::new(rig.ns.clone()));
    SyncManager::new(store.clone(), rig.ns.clone()).hydrate_from(&newer);

    assert_eq!(store.settings.read().store_name, "Açaí 2.0");
    assert_eq!(rig.ns.get::<i64>("version"), Some(newer.version));
}

#[test]
fn seed_upgrade_preserves_transactional_data() {
    let rig = TestRig::seeded();
    add_soda(&rig.store);
    let order = rig.engine.place_pos_order(counter_sale()).unwrap();

    let mut newer = seed().clone();
    newer.version = seed().version + 1;

    let store = Rc::new(DataStore::new(rig.ns.clone()));
    SyncManager::new(store.clone(), rig.ns.clone()).hydrate_from(&newer);

    assert_eq!(store.orders.read().len(), 1);
    assert_eq!(store.orders.read()[0].id, order.id);
}

#[test]
fn prefix_bump_retires_the_cached_catalog() {
    let rig = TestRig::seeded();
    let mut settings = rig.store.settings.get();
    settings.store_name = "Açaí do Centro".to_string();
    rig.store.update_settings(settings);

    // New schema prefix over the same physical store: back to the seed.
    let ns = Rc::new(Namespace::new(rig.kv.clone(), "test_v2_"));
    let store = fresh_store(&ns);
    assert_eq!(store.settings.read().store_name, seed().settings.store_name);
}

#[test]
fn export_import_round_trips_the_catalog() {
    let source = TestRig::seeded();
    let mut settings = source.store.settings.get();
    settings.store_name = "Açaí Exportado".to_string();
    source.store.update_settings(settings);

    let manager = SyncManager::new(source.store.clone(), source.ns.clone());
    let (file_name, contents) = manager.export().unwrap();
    assert_eq!(file_name, "menu-data.ts");

    let target = TestRig::seeded();
    let target_manager = SyncManager::new(target.store.clone(), target.ns.clone());
    assert!(target_manager.import(&contents));

    assert_eq!(target.store.settings.read().store_name, "Açaí Exportado");
    assert_eq!(
        target.store.products.get(),
        source.store.products.get()
    );
}

#[test]
fn export_strips_orders_and_outranks_installs() {
    let rig = TestRig::seeded();
    add_soda(&rig.store);
    rig.engine.place_pos_order(counter_sale()).unwrap();

    let manager = SyncManager::new(rig.store.clone(), rig.ns.clone());
    let (_, contents) = manager.export().unwrap();

    assert!(contents.contains("\"orders\": []"));
    let json = &contents[contents.find('{').unwrap()..=contents.rfind('}').unwrap()];
    let data: MenuData = serde_json::from_str(json).unwrap();
    assert!(data.version > seed().version);
}

#[test]
fn import_keeps_existing_orders() {
    let rig = TestRig::seeded();
    add_soda(&rig.store);
    rig.engine.place_pos_order(counter_sale()).unwrap();

    let manager = SyncManager::new(rig.store.clone(), rig.ns.clone());
    let (_, contents) = manager.export().unwrap();
    assert!(manager.import(&contents));
    assert_eq!(rig.store.orders.read().len(), 1);
}

#[test]
fn failed_import_leaves_everything_untouched() {
    let rig = TestRig::seeded();
    let manager = SyncManager::new(rig.store.clone(), rig.ns.clone());
    let products_before = rig.store.products.get();
    let version_before = rig.ns.get::<i64>("version");

    assert!(!manager.import("not even json"));
    assert!(!manager.import(r#"{ "settings": {}, "categories": [] }"#));

    assert_eq!(rig.store.products.get(), products_before);
    assert_eq!(rig.ns.get::<i64>("version"), version_before);
}

#[test]
fn file_backed_store_persists_across_processes() {
    let dir = tempfile::tempdir().unwrap();

    {
        let kv = Rc::new(FileKv::new(dir.path()).unwrap());
        let ns = Rc::new(Namespace::new(kv, "acai_core_v1_"));
        let store = fresh_store(&ns);
        let mut settings = store.settings.get();
        settings.store_name = "Açaí em Disco".to_string();
        store.update_settings(settings);
    }

    let kv = Rc::new(FileKv::new(dir.path()).unwrap());
    let ns = Rc::new(Namespace::new(kv, "acai_core_v1_"));
    let store = fresh_store(&ns);
    assert_eq!(store.settings.read().store_name, "Açaí em Disco");
}
