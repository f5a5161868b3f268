//! Quote board and the order ladder shown around the at-the-money strike.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::{Quote, Right};

pub const DEFAULT_STRIKE_STEP: i64 = 50;
pub const DEFAULT_STRIKES_BELOW: i64 = 11;
pub const DEFAULT_STRIKES_ABOVE: i64 = 11;

/// Which strikes the ladder lists: `atm + strike_step * i` for `i` in `-below..above`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderSpec {
    pub strike_step: i64,
    pub below: i64,
    pub above: i64,
}

impl Default for LadderSpec {
    fn default() -> Self {
        Self {
            strike_step: DEFAULT_STRIKE_STEP,
            below: DEFAULT_STRIKES_BELOW,
            above: DEFAULT_STRIKES_ABOVE,
        }
    }
}

pub fn strike_ladder(atm: i64, spec: LadderSpec) -> Vec<i64> {
    (-spec.below..spec.above)
        .map(|i| atm + spec.strike_step * i)
        .collect()
}

/// Lookup key for one option quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuoteKey {
    pub date: NaiveDate,
    pub session: String,
    pub expiry: String,
    pub strike: i64,
    pub right: Right,
}

/// One ladder row: a strike with its call and put last prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainRow {
    pub strike: i64,
    pub call: Quote,
    pub put: Quote,
    pub is_atm: bool,
}

impl ChainRow {
    pub fn quote(&self, right: Right) -> Quote {
        match right {
            Right::Call => self.call,
            Right::Put => self.put,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuoteBoard {
    quotes: HashMap<QuoteKey, Quote>,
}

impl QuoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a quote. The first quote seen for a key is kept.
    pub fn insert(&mut self, key: QuoteKey, quote: Quote) {
        self.quotes.entry(key).or_insert(quote);
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn quote(
        &self,
        date: NaiveDate,
        session: &str,
        expiry: &str,
        strike: i64,
        right: Right,
    ) -> Quote {
        let key = QuoteKey {
            date,
            session: session.to_string(),
            expiry: expiry.to_string(),
            strike,
            right,
        };
        self.quotes.get(&key).copied().unwrap_or(Quote::Unavailable)
    }

    /// Ladder rows around `atm` for one date, session and expiry.
    pub fn ladder(
        &self,
        date: NaiveDate,
        session: &str,
        expiry: &str,
        atm: i64,
        spec: LadderSpec,
    ) -> Vec<ChainRow> {
        strike_ladder(atm, spec)
            .into_iter()
            .map(|strike| ChainRow {
                strike,
                call: self.quote(date, session, expiry, strike, Right::Call),
                put: self.quote(date, session, expiry, strike, Right::Put),
                is_atm: strike == atm,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
    }

    fn key(strike: i64, right: Right) -> QuoteKey {
        QuoteKey {
            date: day(),
            session: "Regular".into(),
            expiry: "202403".into(),
            strike,
            right,
        }
    }

    #[test]
    fn default_ladder_spans_22_strikes() {
        let strikes = strike_ladder(18000, LadderSpec::default());
        let expected: Vec<i64> = (-11..11).map(|i| 18000 + 50 * i).collect();
        assert_eq!(strikes, expected);
        assert_eq!(strikes.len(), 22);
        assert_eq!(strikes[0], 17450);
        assert_eq!(*strikes.last().unwrap(), 18500);
        assert_eq!(strikes[11], 18000);
    }

    #[test]
    fn first_quote_wins() {
        let mut board = QuoteBoard::new();
        board.insert(key(18000, Right::Call), Quote::Last(120.0));
        board.insert(key(18000, Right::Call), Quote::Last(999.0));
        assert_eq!(board.quote(day(), "Regular", "202403", 18000, Right::Call), Quote::Last(120.0));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn missing_quote_is_unavailable() {
        let board = QuoteBoard::new();
        assert_eq!(
            board.quote(day(), "Regular", "202403", 18000, Right::Put),
            Quote::Unavailable
        );
    }

    #[test]
    fn ladder_marks_atm_and_fills_both_sides() {
        let mut board = QuoteBoard::new();
        board.insert(key(18000, Right::Call), Quote::Last(120.0));
        board.insert(key(18000, Right::Put), Quote::Last(95.0));
        board.insert(key(17950, Right::Put), Quote::Unavailable);

        let spec = LadderSpec { strike_step: 50, below: 1, above: 2 };
        let rows = board.ladder(day(), "Regular", "202403", 18000, spec);
        assert_eq!(rows.iter().map(|r| r.strike).collect::<Vec<_>>(), vec![17950, 18000, 18050]);
        assert!(rows[1].is_atm && !rows[0].is_atm);
        assert_eq!(rows[1].quote(Right::Call), Quote::Last(120.0));
        assert_eq!(rows[1].put, Quote::Last(95.0));
        assert_eq!(rows[0].put, Quote::Unavailable);
        assert_eq!(rows[2].call, Quote::Unavailable);
    }
}
