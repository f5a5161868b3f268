//! Trade legs: one simulated single-option order inside a basket.
//!
//! A `TradeLeg` can only be built through validation (`TradeLeg::try_from`
//! on a `LegRequest`, or deserialization, which routes through the same
//! checks). Fields are private so a leg cannot be edited after it is placed
//! in a ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::quote::Quote;

/// Buy (long) or sell (short/write).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[serde(alias = "BUY", alias = "買進")]
    Buy,
    #[serde(alias = "SELL", alias = "賣出")]
    Sell,
}

/// Option right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Right {
    #[serde(alias = "CALL", alias = "買權")]
    Call,
    #[serde(alias = "PUT", alias = "賣權")]
    Put,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Buy => "Buy",
            Action::Sell => "Sell",
        }
    }
}

impl Right {
    pub fn label(self) -> &'static str {
        match self {
            Right::Call => "Call",
            Right::Put => "Put",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl fmt::Display for Right {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} label '{label}'")]
pub struct LabelError {
    pub kind: &'static str,
    pub label: String,
}

impl FromStr for Action {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "buy" | "Buy" | "BUY" | "買進" => Ok(Action::Buy),
            "sell" | "Sell" | "SELL" | "賣出" => Ok(Action::Sell),
            other => Err(LabelError { kind: "action", label: other.to_string() }),
        }
    }
}

impl FromStr for Right {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "call" | "Call" | "CALL" | "買權" => Ok(Right::Call),
            "put" | "Put" | "PUT" | "賣權" => Ok(Right::Put),
            other => Err(LabelError { kind: "right", label: other.to_string() }),
        }
    }
}

/// Why a leg was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LegError {
    #[error("no quote available for {right} {strike}")]
    NoQuote { right: Right, strike: f64 },

    #[error("premium {premium} is not a finite number")]
    NonFinitePremium { premium: f64 },

    #[error("strike {strike} is not a finite number")]
    NonFiniteStrike { strike: f64 },

    #[error("quantity must be at least one contract")]
    ZeroQuantity,
}

/// Unvalidated order as it arrives from the chain or a basket file.
#[derive(Debug, Clone, PartialEq)]
pub struct LegRequest {
    pub date: NaiveDate,
    pub session: String,
    pub action: Action,
    pub right: Right,
    pub strike: f64,
    pub premium: Quote,
    pub quantity: u32,
}

impl LegRequest {
    /// One-contract order; use [`LegRequest::with_quantity`] for more.
    pub fn new(
        action: Action,
        right: Right,
        strike: f64,
        premium: impl Into<Quote>,
        date: NaiveDate,
        session: impl Into<String>,
    ) -> Self {
        Self {
            date,
            session: session.into(),
            action,
            right,
            strike,
            premium: premium.into(),
            quantity: 1,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// One immutable position in a basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LegFields")]
pub struct TradeLeg {
    date: NaiveDate,
    session: String,
    action: Action,
    right: Right,
    strike: f64,
    premium: f64,
    quantity: u32,
}

impl TradeLeg {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn right(&self) -> Right {
        self.right
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn premium(&self) -> f64 {
        self.premium
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Date as the chain prints it (`YYYY/MM/DD`).
    pub fn date_label(&self) -> String {
        self.date.format("%Y/%m/%d").to_string()
    }

    /// Build a leg without validation, for exercising the invariant checks.
    #[cfg(test)]
    pub(crate) fn unchecked(
        action: Action,
        right: Right,
        strike: f64,
        premium: f64,
        quantity: u32,
    ) -> Self {
        Self {
            date: NaiveDate::default(),
            session: String::new(),
            action,
            right,
            strike,
            premium,
            quantity,
        }
    }

    /// Re-check the construction invariants.
    pub fn validate(&self) -> Result<(), LegError> {
        check(self.strike, self.premium, self.quantity)
    }
}

fn check(strike: f64, premium: f64, quantity: u32) -> Result<(), LegError> {
    if !strike.is_finite() {
        return Err(LegError::NonFiniteStrike { strike });
    }
    if !premium.is_finite() {
        return Err(LegError::NonFinitePremium { premium });
    }
    if quantity == 0 {
        return Err(LegError::ZeroQuantity);
    }
    Ok(())
}

impl TryFrom<LegRequest> for TradeLeg {
    type Error = LegError;

    fn try_from(req: LegRequest) -> Result<Self, Self::Error> {
        let premium = match req.premium {
            Quote::Unavailable => {
                return Err(LegError::NoQuote { right: req.right, strike: req.strike })
            }
            Quote::Last(p) => p,
        };
        check(req.strike, premium, req.quantity)?;
        Ok(Self {
            date: req.date,
            session: req.session,
            action: req.action,
            right: req.right,
            strike: req.strike,
            premium,
            quantity: req.quantity,
        })
    }
}

/// Serialized shape of a leg; quantity defaults to one contract.
#[derive(Debug, Deserialize)]
struct LegFields {
    date: NaiveDate,
    #[serde(default)]
    session: String,
    action: Action,
    right: Right,
    strike: f64,
    premium: f64,
    #[serde(default = "one")]
    quantity: u32,
}

fn one() -> u32 {
    1
}

impl TryFrom<LegFields> for TradeLeg {
    type Error = LegError;

    fn try_from(raw: LegFields) -> Result<Self, Self::Error> {
        let req = LegRequest {
            date: raw.date,
            session: raw.session,
            action: raw.action,
            right: raw.right,
            strike: raw.strike,
            premium: Quote::Last(raw.premium),
            quantity: raw.quantity,
        };
        TradeLeg::try_from(req)
    }
}
