//! Option last-price quotes, including the "no quote" sentinel of the chain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label the option chain uses for a strike with no trade.
pub const UNAVAILABLE_LABEL: &str = "-";

/// Last traded price of one option contract, or the absence of one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Quote {
    Last(f64),
    Unavailable,
}

impl Quote {
    /// Parse a chain cell. `-`, empty and unparseable cells are unavailable.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == UNAVAILABLE_LABEL {
            return Quote::Unavailable;
        }
        match trimmed.parse::<f64>() {
            Ok(price) if price.is_finite() => Quote::Last(price),
            _ => Quote::Unavailable,
        }
    }

    /// The price, if this quote carries a finite one.
    pub fn price(&self) -> Option<f64> {
        match self {
            Quote::Last(p) if p.is_finite() => Some(*p),
            _ => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.price().is_some()
    }
}

impl From<f64> for Quote {
    fn from(price: f64) -> Self {
        Quote::Last(price)
    }
}

impl From<Option<f64>> for Quote {
    fn from(price: Option<f64>) -> Self {
        price.map_or(Quote::Unavailable, Quote::Last)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.price() {
            Some(p) => write!(f, "{p}"),
            None => f.write_str(UNAVAILABLE_LABEL),
        }
    }
}
