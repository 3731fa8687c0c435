//! Back-office finance records: expenses, payables, cash register sessions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayable {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub is_paid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Open,
    Closed,
}

/// One operator shift of the cash drawer.
///
/// Invariant: at most one session in the history has `status == Open`.
/// The closing cash total is reconciled by the caller, not the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashRegisterSession {
    pub id: String,
    pub opening_time: i64,
    #[serde(default)]
    pub closing_time: Option<i64>,
    pub starting_balance: Decimal,
    #[serde(default)]
    pub closing_balance: Option<Decimal>,
    pub status: SessionStatus,
}

impl CashRegisterSession {
    pub fn is_open(&self) -> bool {
        self.status == SessionStatus::Open
    }
}
