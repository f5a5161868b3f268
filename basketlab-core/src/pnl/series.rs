//! Rendering-ready output: series metadata plus a curve summary.

use serde::{Deserialize, Serialize};

use super::curve::PnlCurve;

/// How a chart should label and decorate the P&L line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMeta {
    pub name: String,
    pub x_title: String,
    pub y_title: String,
    /// Draw a dashed horizontal line at P&L = 0.
    pub zero_baseline: bool,
}

impl Default for SeriesMeta {
    fn default() -> Self {
        Self {
            name: "P&L".into(),
            x_title: "Settlement price".into(),
            y_title: "P&L".into(),
            zero_baseline: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub settlement: i64,
    pub pnl: f64,
}

/// A curve ready for a plotting surface or JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSeries {
    pub meta: SeriesMeta,
    pub reference_price: i64,
    pub points: Vec<SeriesPoint>,
    pub summary: CurveSummary,
}

/// Extremes and breakevens over the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSummary {
    pub max_pnl: f64,
    pub max_at: i64,
    pub min_pnl: f64,
    pub min_at: i64,
    /// Settlement prices where the curve crosses zero, interpolated linearly
    /// between adjacent grid points.
    pub breakevens: Vec<f64>,
}

impl PnlCurve {
    /// Summary over the grid; `None` for an empty curve.
    pub fn summary(&self) -> Option<CurveSummary> {
        let mut points = self.points();
        let (first_price, first_pnl) = points.next()?;
        let mut summary = CurveSummary {
            max_pnl: first_pnl,
            max_at: first_price,
            min_pnl: first_pnl,
            min_at: first_price,
            breakevens: Vec::new(),
        };
        if first_pnl == 0.0 {
            summary.breakevens.push(first_price as f64);
        }

        let mut prev = (first_price, first_pnl);
        for (price, pnl) in points {
            if pnl > summary.max_pnl {
                summary.max_pnl = pnl;
                summary.max_at = price;
            }
            if pnl < summary.min_pnl {
                summary.min_pnl = pnl;
                summary.min_at = price;
            }
            if pnl == 0.0 {
                summary.breakevens.push(price as f64);
            } else if prev.1 != 0.0 && (prev.1 < 0.0) != (pnl < 0.0) {
                let (p0, v0) = (prev.0 as f64, prev.1);
                let t = v0 / (v0 - pnl);
                summary.breakevens.push(p0 + t * (price as f64 - p0));
            }
            prev = (price, pnl);
        }
        Some(summary)
    }

    /// Attach metadata and summary for rendering.
    pub fn series(&self, meta: SeriesMeta) -> Option<CurveSeries> {
        let summary = self.summary()?;
        Some(CurveSeries {
            meta,
            reference_price: self.reference_price,
            points: self
                .points()
                .map(|(settlement, pnl)| SeriesPoint { settlement, pnl })
                .collect(),
            summary,
        })
    }
}
