//! basketlab core: the option basket ledger and its P&L at settlement.
//!
//! This crate contains:
//! - Domain types (trade legs, quotes, chain records)
//! - The trade ledger: an ordered, append-only basket with undo and clear
//! - The P&L engine: settlement grid, per-leg payoff, basket aggregation
//! - Option-chain browsing: record navigation, quote board, order ladder
//! - TOML configuration and basket files

pub mod chain;
pub mod config;
pub mod domain;
pub mod ledger;
pub mod pnl;

pub use config::{BasketConfig, BasketFile, ConfigError};
pub use domain::{Action, LegError, LegRequest, Quote, Right, TradeLeg};
pub use ledger::Ledger;
pub use pnl::{CurveError, PnlCurve, PnlEngine};
