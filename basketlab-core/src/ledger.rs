//! Trade ledger: the ordered basket of legs for one session.
//!
//! Append-only with pop-last and clear. Insertion order is preserved because
//! both the basket table and `remove_last` depend on it. Legs are never merged,
//! even when identical.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{LegError, LegRequest, TradeLeg};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    legs: Vec<TradeLeg>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append one leg. The basket is unchanged on error.
    pub fn append(&mut self, req: LegRequest) -> Result<&TradeLeg, LegError> {
        let leg = TradeLeg::try_from(req).map_err(|e| {
            warn!(error = %e, "leg rejected");
            e
        })?;
        debug!(
            action = %leg.action(),
            right = %leg.right(),
            strike = leg.strike(),
            premium = leg.premium(),
            quantity = leg.quantity(),
            "leg appended"
        );
        self.legs.push(leg);
        Ok(&self.legs[self.legs.len() - 1])
    }

    /// Remove the most recent leg. Empty ledger is a no-op.
    pub fn remove_last(&mut self) -> Option<TradeLeg> {
        let removed = self.legs.pop();
        if removed.is_some() {
            debug!(remaining = self.legs.len(), "last leg removed");
        }
        removed
    }

    pub fn clear(&mut self) {
        debug!(removed = self.legs.len(), "ledger cleared");
        self.legs.clear();
    }

    /// Read-only view in insertion order.
    pub fn snapshot(&self) -> &[TradeLeg] {
        &self.legs
    }

    pub fn iter(&self) -> impl Iterator<Item = &TradeLeg> {
        self.legs.iter()
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}

impl FromIterator<TradeLeg> for Ledger {
    fn from_iter<I: IntoIterator<Item = TradeLeg>>(iter: I) -> Self {
        Self { legs: iter.into_iter().collect() }
    }
}
