//! Record book: the numbered navigation index over chain snapshots.
//!
//! Records are ordered by number. Moving past either end stays on the
//! boundary record. Selecting a date and session jumps to the smallest
//! record number with that date and session.

use chrono::NaiveDate;

use crate::domain::{ExpirySnapshot, Record};

/// Session restriction when listing a date's sessions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionFilter {
    #[default]
    All,
    Only(String),
}

impl SessionFilter {
    pub fn matches(&self, session: &str) -> bool {
        match self {
            SessionFilter::All => true,
            SessionFilter::Only(label) => label == session,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SessionFilter::All => "all",
            SessionFilter::Only(label) => label,
        }
    }

    /// Parse a CLI value: `all` (any case) or a session label.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            SessionFilter::All
        } else {
            SessionFilter::Only(trimmed.to_string())
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordBook {
    records: Vec<Record>,
    snapshots: Vec<ExpirySnapshot>,
}

impl RecordBook {
    /// Sorts records by number; the first row for a duplicated number wins.
    pub fn new(mut records: Vec<Record>, snapshots: Vec<ExpirySnapshot>) -> Self {
        records.sort_by_key(|r| r.number);
        records.dedup_by_key(|r| r.number);
        Self { records, snapshots }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn get(&self, number: u32) -> Option<&Record> {
        self.position(number).map(|i| &self.records[i])
    }

    fn position(&self, number: u32) -> Option<usize> {
        self.records.binary_search_by_key(&number, |r| r.number).ok()
    }

    /// Previous record, or the same one at the start. `None` if unknown.
    pub fn prev(&self, number: u32) -> Option<&Record> {
        let i = self.position(number)?;
        Some(&self.records[i.saturating_sub(1)])
    }

    /// Next record, or the same one at the end. `None` if unknown.
    pub fn next(&self, number: u32) -> Option<&Record> {
        let i = self.position(number)?;
        Some(&self.records[(i + 1).min(self.records.len() - 1)])
    }

    /// Distinct sessions traded on `date`, in record order.
    pub fn sessions_on(&self, date: NaiveDate, filter: &SessionFilter) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for r in self.records.iter().filter(|r| r.date == date) {
            if filter.matches(&r.session) && !out.contains(&r.session.as_str()) {
                out.push(&r.session);
            }
        }
        out
    }

    /// Every distinct session label in the book, in record order.
    pub fn session_labels(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for r in &self.records {
            if !out.contains(&r.session.as_str()) {
                out.push(&r.session);
            }
        }
        out
    }

    /// Smallest record number for `date` and `session`.
    pub fn first_on(&self, date: NaiveDate, session: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| r.date == date && r.session == session)
    }

    /// First record on `date` whose session passes `filter`.
    pub fn first_matching(&self, date: NaiveDate, filter: &SessionFilter) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| r.date == date && filter.matches(&r.session))
    }

    /// Distinct dates, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.records.iter().map(|r| r.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    pub fn prev_date(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.dates().into_iter().rev().find(|d| *d < date)
    }

    pub fn next_date(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.dates().into_iter().find(|d| *d > date)
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Expiries with a snapshot for record `number`, in file order.
    pub fn expiries(&self, number: u32) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for s in self.snapshots.iter().filter(|s| s.number == number) {
            if !out.contains(&s.expiry.as_str()) {
                out.push(&s.expiry);
            }
        }
        out
    }

    pub fn snapshot(&self, number: u32, expiry: &str) -> Option<&ExpirySnapshot> {
        self.snapshots
            .iter()
            .find(|s| s.number == number && s.expiry == expiry)
    }
}
