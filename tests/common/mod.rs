//! Shared fixtures for the integration tests.
//!
//! Every rig runs on an in-memory KV store; file-backed persistence gets its
//! own coverage in the sync tests.

#![allow(dead_code)]

use std::rc::Rc;
use std::str::FromStr;

use rust_decimal::Decimal;

use storefront_core::models::{CartItem, PaymentMethod};
use storefront_core::services::{
    DataStore, ItemBuilder, MemoryKv, Namespace, OrderBroadcast, OrderEngine, RecordingSink,
    SyncManager,
};
use storefront_core::services::orders::{OnlineOrderDetails, PosOrderDetails};

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// A fully wired engine over an in-memory KV store.
pub struct TestRig {
    pub kv: Rc<MemoryKv>,
    pub ns: Rc<Namespace>,
    pub store: Rc<DataStore>,
    pub sink: Rc<RecordingSink>,
    pub broadcast: Rc<OrderBroadcast>,
    pub engine: OrderEngine,
}

impl TestRig {
    /// Empty store; tests seed exactly what they need.
    pub fn new() -> Self {
        let kv = Rc::new(MemoryKv::new());
        let ns = Rc::new(Namespace::new(kv.clone(), "test_"));
        let store = Rc::new(DataStore::new(ns.clone()));
        let sink = Rc::new(RecordingSink::new());
        let broadcast = Rc::new(OrderBroadcast::new(true));
        let engine = OrderEngine::new(store.clone(), sink.clone(), broadcast.clone());
        Self {
            kv,
            ns,
            store,
            sink,
            broadcast,
            engine,
        }
    }

    /// Store hydrated from the compiled seed catalog.
    pub fn seeded() -> Self {
        let rig = Self::new();
        SyncManager::new(rig.store.clone(), rig.ns.clone()).hydrate();
        rig
    }
}

/// Compose a 500ml açaí with the first cobertura picked (the required group)
/// and add it to the cart. Totals 17.50 against the seed catalog.
pub fn add_acai_500(store: &DataStore) -> CartItem {
    let product = store
        .products
        .read()
        .iter()
        .find(|p| p.id == "acai_tradicional")
        .cloned()
        .unwrap();

    let mut builder = ItemBuilder::new(store, product);
    builder.select_size("size_500");
    let coberturas = builder
        .groups()
        .iter()
        .find(|g| g.group.id == "coberturas")
        .cloned()
        .unwrap();
    builder.toggle_topping(&coberturas.modifiers[0], &coberturas.group);

    store.add_to_cart(builder.build().unwrap())
}

/// Add a sizeless drink to the cart. Totals 5.00 against the seed catalog.
pub fn add_soda(store: &DataStore) -> CartItem {
    let product = store
        .products
        .read()
        .iter()
        .find(|p| p.id == "coca_lata")
        .cloned()
        .unwrap();
    let builder = ItemBuilder::new(store, product);
    store.add_to_cart(builder.build().unwrap())
}

/// Valid online checkout form for the seed's "Centro" zone.
pub fn online_details(neighborhood: &str) -> OnlineOrderDetails {
    OnlineOrderDetails {
        customer_name: "Maria Silva".to_string(),
        customer_phone: "11988887777".to_string(),
        customer_address: "Rua das Laranjeiras, 45".to_string(),
        neighborhood: neighborhood.to_string(),
        payment_method: PaymentMethod::Pix,
        scheduled_delivery_time: None,
        reference_point: None,
    }
}

/// Walk-in counter sale paid in cash.
pub fn counter_sale() -> PosOrderDetails {
    PosOrderDetails {
        payment_method: Some(PaymentMethod::Dinheiro),
        ..PosOrderDetails::default()
    }
}

/// POS delivery to a seed zone with complete customer details.
pub fn pos_delivery(zone_id: &str) -> PosOrderDetails {
    PosOrderDetails {
        is_delivery: true,
        zone_id: Some(zone_id.to_string()),
        customer_name: "João Souza".to_string(),
        customer_phone: "11977776666".to_string(),
        customer_address: "Av. Brasil, 200".to_string(),
        payment_method: Some(PaymentMethod::Cartao),
        ..PosOrderDetails::default()
    }
}
