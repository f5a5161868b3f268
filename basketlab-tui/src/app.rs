//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here: the loaded chain, the browsing position, the
//! basket ledger and the curve derived from it.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use basketlab_core::chain::{ChainData, ChainRow, SessionFilter};
use basketlab_core::domain::{ExpirySnapshot, Record};
use basketlab_core::{Action, BasketConfig, Ledger, LegRequest, PnlCurve, PnlEngine, Right};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Chain,
    Basket,
    Chart,
    Help,
}

const PANEL_COUNT: usize = 4;

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Chain => 0,
            Panel::Basket => 1,
            Panel::Chart => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Chain),
            1 => Some(Panel::Basket),
            2 => Some(Panel::Chart),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Chain => "Chain",
            Panel::Basket => "Basket",
            Panel::Chart => "Chart",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % PANEL_COUNT).unwrap_or(self)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + PANEL_COUNT - 1) % PANEL_COUNT).unwrap_or(self)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Chain browsing
    pub data: ChainData,
    pub current: Option<u32>,
    pub expiry_idx: usize,
    pub session_filter: SessionFilter,
    /// Row index into the order ladder.
    pub cursor: usize,

    // Basket
    pub config: BasketConfig,
    pub engine: PnlEngine,
    pub ledger: Ledger,
    pub curve: Option<PnlCurve>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
}

impl AppState {
    pub fn new(data: ChainData, config: BasketConfig) -> Self {
        let current = data.book.first().map(|r| r.number);
        let mut app = Self {
            active_panel: Panel::Chain,
            running: true,
            data,
            current,
            expiry_idx: 0,
            session_filter: SessionFilter::All,
            cursor: 0,
            engine: config.engine(),
            config,
            ledger: Ledger::new(),
            curve: None,
            status_message: None,
        };
        app.reset_cursor();
        app.recompute();
        app
    }

    // ── Chain view ───────────────────────────────────────────────────

    pub fn current_record(&self) -> Option<&Record> {
        self.current.and_then(|n| self.data.book.get(n))
    }

    pub fn expiries(&self) -> Vec<&str> {
        self.current
            .map(|n| self.data.book.expiries(n))
            .unwrap_or_default()
    }

    pub fn current_expiry(&self) -> Option<&str> {
        self.expiries().get(self.expiry_idx).copied()
    }

    pub fn snapshot(&self) -> Option<&ExpirySnapshot> {
        let number = self.current?;
        let expiry = self.current_expiry()?;
        self.data.book.snapshot(number, expiry)
    }

    /// At-the-money strike of the selected record and expiry.
    pub fn atm(&self) -> Option<i64> {
        self.snapshot().and_then(|s| s.atm_price)
    }

    /// Ladder rows for the current selection; empty without an ATM strike.
    pub fn ladder(&self) -> Vec<ChainRow> {
        let (Some(record), Some(expiry), Some(atm)) =
            (self.current_record(), self.current_expiry(), self.atm())
        else {
            return Vec::new();
        };
        self.data
            .board
            .ladder(record.date, &record.session, expiry, atm, self.config.ladder)
    }

    /// Put the cursor on the ATM row.
    fn reset_cursor(&mut self) {
        let rows = self.ladder().len();
        let atm_row = self.config.ladder.below.max(0) as usize;
        self.cursor = atm_row.min(rows.saturating_sub(1));
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let rows = self.ladder().len();
        if rows == 0 {
            self.cursor = 0;
            return;
        }
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, rows as isize - 1) as usize;
    }

    // ── Record navigation ────────────────────────────────────────────

    fn select(&mut self, number: u32) {
        let previous_expiry = self.current_expiry().map(str::to_owned);
        self.current = Some(number);
        self.expiry_idx = previous_expiry
            .and_then(|e| self.expiries().iter().position(|x| *x == e))
            .unwrap_or(0);
        debug!(number, expiry_idx = self.expiry_idx, "record selected");
        self.reset_cursor();
        self.recompute();
    }

    pub fn next_record(&mut self) {
        let target = self
            .current
            .and_then(|n| self.data.book.next(n))
            .map(|r| r.number);
        match target {
            Some(n) if Some(n) != self.current => self.select(n),
            Some(_) => self.set_status("Already at the last record"),
            None => {}
        }
    }

    pub fn prev_record(&mut self) {
        let target = self
            .current
            .and_then(|n| self.data.book.prev(n))
            .map(|r| r.number);
        match target {
            Some(n) if Some(n) != self.current => self.select(n),
            Some(_) => self.set_status("Already at the first record"),
            None => {}
        }
    }

    /// Jump to the first record of the next (`forward`) or previous trading
    /// date that has a session passing the filter.
    pub fn step_date(&mut self, forward: bool) {
        let Some(mut date) = self.current_record().map(|r| r.date) else {
            return;
        };
        loop {
            let next = if forward {
                self.data.book.next_date(date)
            } else {
                self.data.book.prev_date(date)
            };
            let Some(next) = next else {
                self.set_status(if forward {
                    "No later trading date"
                } else {
                    "No earlier trading date"
                });
                return;
            };
            if let Some(n) = self.first_in_filter(next) {
                self.select(n);
                return;
            }
            date = next;
        }
    }

    fn first_in_filter(&self, date: NaiveDate) -> Option<u32> {
        self.data
            .book
            .first_matching(date, &self.session_filter)
            .map(|r| r.number)
    }

    /// All → each session label in turn → All.
    pub fn cycle_session_filter(&mut self) {
        let labels: Vec<String> = self
            .data
            .book
            .session_labels()
            .into_iter()
            .map(str::to_owned)
            .collect();
        self.session_filter = match &self.session_filter {
            SessionFilter::All => labels
                .first()
                .cloned()
                .map_or(SessionFilter::All, SessionFilter::Only),
            SessionFilter::Only(current) => labels
                .iter()
                .position(|l| l == current)
                .and_then(|i| labels.get(i + 1))
                .cloned()
                .map_or(SessionFilter::All, SessionFilter::Only),
        };

        let in_filter = self
            .current_record()
            .is_some_and(|r| self.session_filter.matches(&r.session));
        if !in_filter {
            let date = self.current_record().map(|r| r.date);
            let target = date.and_then(|d| self.first_in_filter(d)).or_else(|| {
                self.data
                    .book
                    .records()
                    .iter()
                    .find(|r| self.session_filter.matches(&r.session))
                    .map(|r| r.number)
            });
            if let Some(n) = target {
                self.select(n);
            }
        }
        self.set_status(format!("Session filter: {}", self.session_filter.label()));
    }

    pub fn cycle_expiry(&mut self) {
        let count = self.expiries().len();
        if count < 2 {
            self.set_warning("No other expiry for this record");
            return;
        }
        self.expiry_idx = (self.expiry_idx + 1) % count;
        self.reset_cursor();
        self.recompute();
        if let Some(e) = self.current_expiry() {
            let msg = format!("Expiry {e}");
            self.set_status(msg);
        }
    }

    // ── Basket ───────────────────────────────────────────────────────

    /// Add a leg at the cursor strike using the selected record's quote.
    pub fn trade(&mut self, action: Action, right: Right) {
        let rows = self.ladder();
        let (Some(row), Some(record)) = (rows.get(self.cursor), self.current_record()) else {
            self.set_warning("No ladder for this record");
            return;
        };
        let req = LegRequest::new(
            action,
            right,
            row.strike as f64,
            row.quote(right),
            record.date,
            record.session.clone(),
        );
        match self.ledger.append(req) {
            Ok(leg) => {
                let msg = format!(
                    "{} {} {} @ {}",
                    leg.action(),
                    leg.right(),
                    leg.strike(),
                    leg.premium()
                );
                info!(legs = self.ledger.len(), "{msg}");
                self.set_status(format!("Added {msg}"));
                self.recompute();
            }
            Err(e) => self.set_warning(format!("Order rejected: {e}")),
        }
    }

    pub fn undo(&mut self) {
        match self.ledger.remove_last() {
            Some(leg) => {
                self.set_status(format!(
                    "Removed {} {} {}",
                    leg.action(),
                    leg.right(),
                    leg.strike()
                ));
                self.recompute();
            }
            None => self.set_warning("Basket is empty"),
        }
    }

    pub fn clear_basket(&mut self) {
        if self.ledger.is_empty() {
            self.set_warning("Basket is empty");
            return;
        }
        let n = self.ledger.len();
        self.ledger.clear();
        self.set_status(format!("Cleared {n} legs"));
        self.recompute();
    }

    /// Rebuild the curve around the selected record's ATM strike.
    pub fn recompute(&mut self) {
        let Some(reference) = self.atm() else {
            self.curve = None;
            return;
        };
        match self.engine.curve(self.ledger.snapshot(), reference) {
            Ok(curve) => self.curve = Some(curve),
            Err(e) => {
                warn!(error = %e, "curve rebuild failed");
                self.curve = None;
                self.set_error(e.to_string());
            }
        }
    }

    // ── Status ───────────────────────────────────────────────────────

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
