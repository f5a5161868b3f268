//! Curve aggregation: sum every leg's payoff at every grid point.
//!
//! Always a full rebuild from the ledger snapshot. A leg that fails its
//! invariants aborts the whole computation; there is no per-leg skipping.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{LegError, TradeLeg};

use super::grid::{build_grid, GridError, GridSpec};
use super::params::PayoffParams;
use super::payoff::leg_payoff;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("malformed basket: leg #{index} violates its invariants: {source}")]
    MalformedBasket {
        index: usize,
        #[source]
        source: LegError,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Settlement prices and the basket P&L at each of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlCurve {
    pub reference_price: i64,
    pub prices: Vec<i64>,
    pub pnl: Vec<f64>,
}

impl PnlCurve {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// `(settlement, pnl)` pairs in grid order.
    pub fn points(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.prices.iter().copied().zip(self.pnl.iter().copied())
    }

    /// P&L at an exact grid price.
    pub fn at(&self, price: i64) -> Option<f64> {
        self.prices.iter().position(|&p| p == price).map(|i| self.pnl[i])
    }
}

/// Total payoff of `legs` at every price in `grid`.
pub fn aggregate(
    legs: &[TradeLeg],
    grid: &[i64],
    params: &PayoffParams,
) -> Result<Vec<f64>, CurveError> {
    for (index, leg) in legs.iter().enumerate() {
        leg.validate()
            .map_err(|source| CurveError::MalformedBasket { index, source })?;
    }

    let totals = grid
        .iter()
        .map(|&s| {
            let s = s as f64;
            legs.iter()
                .fold(0.0, |acc, leg| acc + leg_payoff(leg, s, params))
        })
        .collect();
    Ok(totals)
}

/// Grid builder + payoff parameters; produces curves on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PnlEngine {
    pub params: PayoffParams,
    pub grid: GridSpec,
}

impl PnlEngine {
    pub fn new(params: PayoffParams, grid: GridSpec) -> Self {
        Self { params, grid }
    }

    /// Build the grid around `reference_price` and aggregate `legs` over it.
    pub fn curve(&self, legs: &[TradeLeg], reference_price: i64) -> Result<PnlCurve, CurveError> {
        let prices = build_grid(reference_price, self.grid)?;
        let pnl = aggregate(legs, &prices, &self.params)?;
        debug!(legs = legs.len(), points = prices.len(), reference_price, "curve recomputed");
        Ok(PnlCurve { reference_price, prices, pnl })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Action, LegRequest, Right};
    use chrono::NaiveDate;

    fn leg(action: Action, right: Right, strike: f64, premium: f64, qty: u32) -> TradeLeg {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        TradeLeg::try_from(
            LegRequest::new(action, right, strike, premium, date, "Regular").with_quantity(qty),
        )
        .unwrap()
    }

    #[test]
    fn empty_basket_is_flat_zero() {
        let curve = PnlEngine::default().curve(&[], 18000).unwrap();
        assert_eq!(curve.len(), 201);
        assert!(curve.pnl.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn basket_sums_leg_payoffs() {
        let engine = PnlEngine::default();
        let long_call = leg(Action::Buy, Right::Call, 18000.0, 120.0, 1);
        let short_put = leg(Action::Sell, Right::Put, 18000.0, 80.0, 2);
        let curve = engine.curve(&[long_call, short_put], 18000).unwrap();

        // call: (200 - 120) * 50 - 100 = 3900, put: 2 * min(13900, 3900) = 7800
        assert_eq!(curve.at(18200), Some(3900.0 + 7800.0));
        assert_eq!(curve.reference_price, 18000);
    }

    #[test]
    fn prices_and_pnl_are_parallel() {
        let engine = PnlEngine::new(PayoffParams::default(), GridSpec::new(100, 50));
        let curve = engine
            .curve(&[leg(Action::Buy, Right::Put, 500.0, 5.0, 1)], 500)
            .unwrap();
        assert_eq!(curve.prices, vec![400, 450, 500, 550, 600]);
        assert_eq!(curve.pnl.len(), curve.prices.len());
        let pts: Vec<(i64, f64)> = curve.points().collect();
        assert_eq!(pts[0], (400, (100.0 - 5.0) * 50.0 - 100.0));
    }

    #[test]
    fn invalid_grid_propagates() {
        let engine = PnlEngine::new(PayoffParams::default(), GridSpec::new(100, 0));
        assert!(matches!(engine.curve(&[], 100), Err(CurveError::Grid(_))));
    }

    #[test]
    fn malformed_leg_aborts_whole_curve() {
        let good = leg(Action::Buy, Right::Call, 18000.0, 120.0, 1);
        let bad = TradeLeg::unchecked(Action::Sell, Right::Put, 18000.0, f64::NAN, 1);
        let legs = vec![good.clone(), bad, good];

        let err = aggregate(&legs, &[18000, 18010], &PayoffParams::default()).unwrap_err();
        assert!(matches!(
            err,
            CurveError::MalformedBasket { index: 1, source: LegError::NonFinitePremium { .. } }
        ));

        let err = PnlEngine::default().curve(&legs, 18000).unwrap_err();
        assert!(matches!(err, CurveError::MalformedBasket { index: 1, .. }));
    }
}
