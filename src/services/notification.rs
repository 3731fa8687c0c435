//! Notification sink seam.
//!
//! The UI shell plugs in audio/title alerts here; the engine only knows the
//! three fire-and-forget calls.

use std::cell::RefCell;

pub trait NotificationSink {
    /// New online order arrived: start the chime and visual alert.
    fn announce_new_order(&self);
    /// Stop the chime (order accepted or cancelled).
    fn silence_new_order(&self);
    /// Clear the visual alert (operator reached an order screen).
    fn clear_visual(&self);
}

/// Sink that only leaves a trace line. Default wiring for headless use.
#[derive(Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn announce_new_order(&self) {
        tracing::debug!("new order announced (no sink attached)");
    }

    fn silence_new_order(&self) {}

    fn clear_visual(&self) {}
}

/// Test double recording every call in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: RefCell<Vec<&'static str>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn announce_new_order(&self) {
        self.calls.borrow_mut().push("announce_new_order");
    }

    fn silence_new_order(&self) {
        self.calls.borrow_mut().push("silence_new_order");
    }

    fn clear_visual(&self) {
        self.calls.borrow_mut().push("clear_visual");
    }
}
