//! Chain records: one row of the navigation index per snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A numbered snapshot: one trading date and session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub number: u32,
    pub date: NaiveDate,
    pub session: String,
}

/// Underlying state for one record and one expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirySnapshot {
    pub number: u32,
    pub expiry: String,
    /// Underlying close.
    pub close: Option<f64>,
    pub days_remaining: Option<u32>,
    /// At-the-money strike; anchors the order ladder and the settlement grid.
    pub atm_price: Option<i64>,
}
