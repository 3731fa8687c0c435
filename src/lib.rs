//! Storefront Core - order lifecycle and reactive data engine for a
//! single-tenant food storefront.
//!
//! The crate is the in-process core behind a menu/checkout/POS/kitchen UI:
//! write-through data stores, the cart and order engines, the store-open
//! scheduling oracle, the cash register session machine, the versioned
//! seed/local sync manager and the permission gate. Rendering, transport
//! and durable storage are external; they plug in through the `KvStore`,
//! `NotificationSink` and `OrderBroadcast` seams.

pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;

pub use error::{StateConflict, StoreError};
