//! Cash register session machine.
//!
//! A singleton atop the transactional store: at most one session in the
//! history is ever open. Closing-balance reconciliation belongs to the
//! caller; the engine only tracks the open/close pair.

use std::rc::Rc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{StateConflict, StoreError};
use crate::models::{CashRegisterSession, SessionStatus};

use super::store::DataStore;

pub struct CashRegister {
    store: Rc<DataStore>,
}

impl CashRegister {
    pub fn new(store: Rc<DataStore>) -> Self {
        Self { store }
    }

    pub fn active_session(&self) -> Option<CashRegisterSession> {
        self.store.active_cash_register()
    }

    /// Open a session with the counted starting cash.
    pub fn open(&self, starting_balance: Decimal) -> Result<CashRegisterSession, StoreError> {
        if self.store.active_cash_register().is_some() {
            tracing::warn!("refusing to open cash register: a session is already open");
            return Err(StateConflict::AlreadyOpen.into());
        }

        let session = CashRegisterSession {
            id: Uuid::new_v4().to_string(),
            opening_time: Utc::now().timestamp_millis(),
            closing_time: None,
            starting_balance,
            closing_balance: None,
            status: SessionStatus::Open,
        };

        self.store
            .cash_register_history
            .update(|history| history.push(session.clone()));

        tracing::info!(session_id = %session.id, %starting_balance, "cash register opened");
        Ok(session)
    }

    /// Close the open session, stamping the closing time.
    pub fn close(&self) -> Result<CashRegisterSession, StoreError> {
        let Some(active) = self.store.active_cash_register() else {
            tracing::warn!("refusing to close cash register: no session is open");
            return Err(StateConflict::NoneOpen.into());
        };

        let mut closed = active.clone();
        self.store.cash_register_history.update(|history| {
            if let Some(session) = history.iter_mut().find(|s| s.id == active.id) {
                session.status = SessionStatus::Closed;
                session.closing_time = Some(Utc::now().timestamp_millis());
                closed = session.clone();
            }
        });

        tracing::info!(session_id = %closed.id, "cash register closed");
        Ok(closed)
    }
}
