//! P&L engine: settlement grid, per-leg payoff formulas, basket aggregation.

pub mod curve;
pub mod grid;
pub mod params;
pub mod payoff;
pub mod series;

pub use curve::{aggregate, CurveError, PnlCurve, PnlEngine};
pub use grid::{build_grid, GridError, GridSpec};
pub use params::PayoffParams;
pub use payoff::{leg_payoff, payoff_bound};
pub use series::{CurveSeries, CurveSummary, SeriesMeta, SeriesPoint};
