//! TOML configuration and basket files.
//!
//! ```toml
//! [payoff]
//! multiplier = 50.0
//! fee = 100.0
//!
//! [grid]
//! half_width = 1000
//! step = 10
//!
//! [ladder]
//! strike_step = 50
//! below = 11
//! above = 11
//! ```
//!
//! Every section and field is optional and falls back to the defaults above.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::chain::LadderSpec;
use crate::domain::TradeLeg;
use crate::ledger::Ledger;
use crate::pnl::{GridError, GridSpec, PayoffParams, PnlEngine};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidValue { field: &'static str, value: f64 },

    #[error("ladder needs a positive strike_step and non-negative counts (got step {step})")]
    InvalidLadder { step: i64 },

    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasketConfig {
    pub payoff: PayoffParams,
    pub grid: GridSpec,
    pub ladder: LadderSpec,
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl BasketConfig {
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: BasketConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read(path)?, path)
    }

    /// Load `path` if given, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("payoff.multiplier", self.payoff.multiplier),
            ("payoff.fee", self.payoff.fee),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        self.grid.point_count()?;
        if self.ladder.strike_step <= 0 || self.ladder.below < 0 || self.ladder.above < 0 {
            return Err(ConfigError::InvalidLadder { step: self.ladder.strike_step });
        }
        Ok(())
    }

    pub fn engine(&self) -> PnlEngine {
        PnlEngine::new(self.payoff, self.grid)
    }
}

/// A saved basket for the CLI:
///
/// ```toml
/// reference_price = 18000
///
/// [[legs]]
/// date = "2024-03-11"
/// session = "Regular"
/// action = "buy"
/// right = "call"
/// strike = 18000
/// premium = 120
/// quantity = 1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketFile {
    pub reference_price: Option<i64>,
    #[serde(default)]
    pub legs: Vec<TradeLeg>,
}

impl BasketFile {
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read(path)?, path)
    }

    pub fn into_ledger(self) -> Ledger {
        let ledger: Ledger = self.legs.into_iter().collect();
        debug!(legs = ledger.len(), "basket file loaded");
        ledger
    }
}
