pub mod auth;
pub mod broadcast;
pub mod cart;
pub mod cash_register;
pub mod kv;
pub mod notification;
pub mod orders;
pub mod receipt;
pub mod schedule;
pub mod store;
pub mod sync;

pub use auth::{AuthGate, View};
pub use broadcast::{OrderBroadcast, OrderFeed};
pub use cart::ItemBuilder;
pub use cash_register::CashRegister;
pub use kv::{FileKv, KvStore, MemoryKv, Namespace};
pub use notification::{NotificationSink, NullSink, RecordingSink};
pub use orders::{OnlineOrderDetails, OrderEngine, PosOrderDetails};
pub use store::DataStore;
pub use sync::{MenuData, SyncManager};
