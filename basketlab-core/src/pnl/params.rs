//! Contract multiplier and flat fee used by the payoff formulas.

use serde::{Deserialize, Serialize};

/// Points-to-currency multiplier per contract.
pub const DEFAULT_MULTIPLIER: f64 = 50.0;
/// Flat cost per contract; a leg of quantity `q` pays it `q` times.
pub const DEFAULT_FEE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffParams {
    pub multiplier: f64,
    pub fee: f64,
}

impl PayoffParams {
    pub fn new(multiplier: f64, fee: f64) -> Self {
        Self { multiplier, fee }
    }

    /// No fee, unit multiplier: payoffs in raw index points.
    pub fn points() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl Default for PayoffParams {
    fn default() -> Self {
        Self::new(DEFAULT_MULTIPLIER, DEFAULT_FEE)
    }
}
