//! Option-chain browsing: record navigation, quote lookup, CSV loading.

pub mod board;
pub mod load;
pub mod records;

pub use board::{strike_ladder, ChainRow, LadderSpec, QuoteBoard, QuoteKey};
pub use load::{load_chain_dir, parse_date, ChainData, DataError};
pub use records::{RecordBook, SessionFilter};
