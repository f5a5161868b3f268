//! Test helpers for building an in-memory chain.

use chrono::NaiveDate;

use basketlab_core::chain::{ChainData, QuoteBoard, QuoteKey, RecordBook};
use basketlab_core::domain::{ExpirySnapshot, Record};
use basketlab_core::{Quote, Right};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn snap(number: u32, expiry: &str, atm: Option<i64>) -> ExpirySnapshot {
    ExpirySnapshot {
        number,
        expiry: expiry.into(),
        close: atm.map(|a| a as f64 + 12.0),
        days_remaining: Some(2),
        atm_price: atm,
    }
}

/// Four records over two days; record 3 has no ATM strike.
pub fn sample_chain() -> ChainData {
    let records = vec![
        Record { number: 1, date: day(11), session: "AfterHours".into() },
        Record { number: 2, date: day(11), session: "Regular".into() },
        Record { number: 3, date: day(12), session: "AfterHours".into() },
        Record { number: 4, date: day(12), session: "Regular".into() },
    ];
    let snapshots = vec![
        snap(1, "202403W3", Some(18000)),
        snap(2, "202403W3", Some(18000)),
        snap(2, "202403", Some(18000)),
        snap(3, "202403W3", None),
        snap(4, "202403W3", Some(18100)),
        snap(4, "202403", Some(18100)),
    ];

    let mut board = QuoteBoard::new();
    let mut quote = |strike: i64, right: Right, q: Quote| {
        board.insert(
            QuoteKey {
                date: day(11),
                session: "Regular".into(),
                expiry: "202403W3".into(),
                strike,
                right,
            },
            q,
        );
    };
    quote(18000, Right::Call, Quote::Last(120.0));
    quote(18000, Right::Put, Quote::Last(100.0));
    quote(18050, Right::Call, Quote::Unavailable);
    quote(17950, Right::Put, Quote::Last(72.0));

    ChainData { book: RecordBook::new(records, snapshots), board }
}
