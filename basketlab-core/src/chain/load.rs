//! CSV loading for the chain data directory.
//!
//! Three files:
//! - `records.csv`: `number,date,session`
//! - `snapshots.csv`: `number,expiry,close,days_remaining,atm_price`
//! - `quotes.csv`: `date,session,expiry,strike,right,close`
//!
//! Text cells are trimmed. Rows whose date, strike or right cannot be parsed
//! can never match a lookup, so they are skipped and counted rather than
//! failing the load. Malformed CSV (bad quoting, wrong column count) fails.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{ExpirySnapshot, Quote, Record, Right};

use super::board::{QuoteBoard, QuoteKey};
use super::records::RecordBook;

pub const RECORDS_FILE: &str = "records.csv";
pub const SNAPSHOTS_FILE: &str = "snapshots.csv";
pub const QUOTES_FILE: &str = "quotes.csv";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("{file} contains no usable rows")]
    Empty { file: String },
}

/// Everything the browser needs from the data directory.
#[derive(Debug, Clone, Default)]
pub struct ChainData {
    pub book: RecordBook,
    pub board: QuoteBoard,
}

/// Accepts `YYYY-MM-DD` and `YYYY/MM/DD`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y/%m/%d"))
        .ok()
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Deserialize)]
struct RecordRow {
    number: u32,
    date: String,
    session: String,
}

#[derive(Debug, Deserialize)]
struct SnapshotRow {
    number: u32,
    expiry: String,
    #[serde(default)]
    close: String,
    #[serde(default)]
    days_remaining: String,
    #[serde(default)]
    atm_price: String,
}

#[derive(Debug, Deserialize)]
struct QuoteRow {
    date: String,
    session: String,
    expiry: String,
    strike: String,
    right: String,
    #[serde(default)]
    close: String,
}

fn csv_reader<R: io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader)
}

pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<Record>, DataError> {
    let mut out = Vec::new();
    let mut skipped = 0usize;
    for row in csv_reader(reader).deserialize::<RecordRow>() {
        let row = row.map_err(|source| DataError::Csv { file: RECORDS_FILE.into(), source })?;
        match parse_date(&row.date) {
            Some(date) => out.push(Record { number: row.number, date, session: row.session }),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(file = RECORDS_FILE, skipped, "rows with unparseable dates skipped");
    }
    Ok(out)
}

pub fn read_snapshots<R: io::Read>(reader: R) -> Result<Vec<ExpirySnapshot>, DataError> {
    let mut out = Vec::new();
    for row in csv_reader(reader).deserialize::<SnapshotRow>() {
        let row = row.map_err(|source| DataError::Csv { file: SNAPSHOTS_FILE.into(), source })?;
        out.push(ExpirySnapshot {
            number: row.number,
            expiry: row.expiry,
            close: parse_number(&row.close),
            days_remaining: parse_number(&row.days_remaining).map(|d| d as u32),
            atm_price: parse_number(&row.atm_price).map(|p| p as i64),
        });
    }
    Ok(out)
}

pub fn read_quotes<R: io::Read>(reader: R) -> Result<QuoteBoard, DataError> {
    let mut board = QuoteBoard::new();
    let mut skipped = 0usize;
    for row in csv_reader(reader).deserialize::<QuoteRow>() {
        let row = row.map_err(|source| DataError::Csv { file: QUOTES_FILE.into(), source })?;
        let date = parse_date(&row.date);
        let strike = parse_number(&row.strike);
        let right = row.right.parse::<Right>().ok();
        let (Some(date), Some(strike), Some(right)) = (date, strike, right) else {
            skipped += 1;
            continue;
        };
        let key = QuoteKey {
            date,
            session: row.session,
            expiry: row.expiry,
            strike: strike.round() as i64,
            right,
        };
        board.insert(key, Quote::parse(&row.close));
    }
    if skipped > 0 {
        warn!(file = QUOTES_FILE, skipped, "rows with unparseable date, strike or right skipped");
    }
    Ok(board)
}

fn open(dir: &Path, name: &str) -> Result<File, DataError> {
    let path = dir.join(name);
    File::open(&path).map_err(|source| DataError::Io { path, source })
}

/// Load `records.csv`, `snapshots.csv` and `quotes.csv` from `dir`.
pub fn load_chain_dir(dir: &Path) -> Result<ChainData, DataError> {
    let records = read_records(open(dir, RECORDS_FILE)?)?;
    if records.is_empty() {
        return Err(DataError::Empty { file: RECORDS_FILE.into() });
    }
    let snapshots = read_snapshots(open(dir, SNAPSHOTS_FILE)?)?;
    let board = read_quotes(open(dir, QUOTES_FILE)?)?;

    info!(
        dir = %dir.display(),
        records = records.len(),
        snapshots = snapshots.len(),
        quotes = board.len(),
        "chain data loaded"
    );
    Ok(ChainData { book: RecordBook::new(records, snapshots), board })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_in_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 11);
        assert_eq!(parse_date("2024-03-11"), expected);
        assert_eq!(parse_date(" 2024/03/11 "), expected);
        assert_eq!(parse_date("11.03.2024"), None);
    }

    #[test]
    fn records_skip_bad_dates() {
        let csv = "number,date,session\n1,2024/03/11,Regular\n2,not-a-date,Regular\n3,2024-03-12, AfterHours \n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].session, "AfterHours");
    }

    #[test]
    fn snapshots_tolerate_empty_cells() {
        let csv = "number,expiry,close,days_remaining,atm_price\n1,202403,18003.5,4,18000.0\n2,202403W3,,,\n";
        let snaps = read_snapshots(csv.as_bytes()).unwrap();
        assert_eq!(snaps[0].atm_price, Some(18000));
        assert_eq!(snaps[0].days_remaining, Some(4));
        assert_eq!(snaps[1].close, None);
        assert_eq!(snaps[1].atm_price, None);
    }

    #[test]
    fn quotes_parse_sentinels_and_labels() {
        let csv = "date,session,expiry,strike,right,close\n\
                   2024/03/11,Regular,202403,18000,買權,120\n\
                   2024/03/11,Regular,202403,18000.0,put,-\n\
                   2024/03/11,Regular,202403,abc,put,10\n";
        let board = read_quotes(csv.as_bytes()).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board.quote(day, "Regular", "202403", 18000, Right::Call), Quote::Last(120.0));
        assert_eq!(board.quote(day, "Regular", "202403", 18000, Right::Put), Quote::Unavailable);
    }

    #[test]
    fn ragged_csv_is_an_error() {
        let csv = "number,date,session\n1,2024-03-11\n";
        assert!(matches!(read_records(csv.as_bytes()), Err(DataError::Csv { .. })));
    }
}
