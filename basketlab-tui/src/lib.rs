//! basketlab TUI: build an option basket from a chain and watch its P&L.
//!
//! Panels:
//! 1. Chain: record header and the order ladder around the ATM strike
//! 2. Basket: ledger table with a curve summary
//! 3. Chart: P&L at settlement with a zero baseline
//! 4. Help: keyboard shortcuts

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::{AppState, Panel, StatusLevel};
pub use input::handle_key;

#[cfg(test)]
mod test_helpers;
