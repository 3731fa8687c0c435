//! Order broadcast channel.
//!
//! An optional append-only stream of order records with subscribe-from-now
//! semantics, standing in for the hosted realtime backend. Publishing is
//! fire-and-forget: a disabled channel, a channel with no subscribers or a
//! lagging subscriber never affects the local order flow.

use chrono::Utc;
use tokio::sync::broadcast;

use crate::error::StoreError;
use crate::models::Order;

const CHANNEL_CAPACITY: usize = 64;

pub struct OrderBroadcast {
    tx: Option<broadcast::Sender<Order>>,
}

impl OrderBroadcast {
    pub fn new(enabled: bool) -> Self {
        let tx = enabled.then(|| broadcast::channel(CHANNEL_CAPACITY).0);
        Self { tx }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// Append an order record. Never blocks, never fails the caller: the
    /// remote-unavailable error is logged and swallowed here.
    pub fn publish(&self, order: &Order) {
        if let Some(tx) = &self.tx {
            if tx.send(order.clone()).is_err() {
                let error = StoreError::RemoteUnavailable;
                tracing::debug!(order_id = %order.id, %error, "order record dropped");
            }
        }
    }

    /// Subscribe from now: records published earlier, or carrying an older
    /// timestamp, are not delivered. `None` when the channel is disabled.
    pub fn subscribe(&self) -> Option<OrderFeed> {
        self.tx.as_ref().map(|tx| OrderFeed {
            rx: tx.subscribe(),
            since_ms: Utc::now().timestamp_millis(),
        })
    }
}

pub struct OrderFeed {
    rx: broadcast::Receiver<Order>,
    since_ms: i64,
}

impl OrderFeed {
    /// Drain the next available record, skipping pre-subscription timestamps
    /// and lapped slots.
    pub fn try_next(&mut self) -> Option<Order> {
        loop {
            match self.rx.try_recv() {
                Ok(order) if order.timestamp >= self.since_ms => return Some(order),
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "order feed lagged, records skipped");
                    continue;
                }
                Err(_) => return None,
            }
        }
    }
}
