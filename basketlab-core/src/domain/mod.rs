//! Domain types for basketlab

pub mod leg;
pub mod quote;
pub mod record;

pub use leg::{Action, LabelError, LegError, LegRequest, Right, TradeLeg};
pub use quote::Quote;
pub use record::{ExpirySnapshot, Record};
