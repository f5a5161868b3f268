//! Settlement-price grid centred on the reference (at-the-money) price.
//!
//! The grid starts at `reference - half_width` and advances by `step` up to
//! the last value not exceeding `reference + half_width`. When `half_width`
//! is a multiple of `step` both ends are included and the grid is symmetric;
//! otherwise the upper end rounds down to the last reachable value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_HALF_WIDTH: i64 = 1000;
pub const DEFAULT_STEP: i64 = 10;
/// Upper bound on grid size; a curve is one row per point.
pub const MAX_GRID_POINTS: usize = 100_001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub half_width: i64,
    pub step: i64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { half_width: DEFAULT_HALF_WIDTH, step: DEFAULT_STEP }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid: half_width {half_width} must be >= 0 and step {step} must be > 0")]
    InvalidSpec { half_width: i64, step: i64 },
    #[error("grid too large: half_width {half_width} step {step} exceeds {max} points")]
    TooLarge { half_width: i64, step: i64, max: usize },
    #[error("grid around {reference_price} with half_width {half_width} leaves the i64 range")]
    OutOfRange { reference_price: i64, half_width: i64 },
}

impl GridSpec {
    pub fn new(half_width: i64, step: i64) -> Self {
        Self { half_width, step }
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.half_width < 0 || self.step <= 0 {
            return Err(GridError::InvalidSpec { half_width: self.half_width, step: self.step });
        }
        Ok(())
    }

    /// Number of points the grid will hold, at most [`MAX_GRID_POINTS`].
    pub fn point_count(&self) -> Result<usize, GridError> {
        self.validate()?;
        let too_large = GridError::TooLarge {
            half_width: self.half_width,
            step: self.step,
            max: MAX_GRID_POINTS,
        };
        let steps = self
            .half_width
            .checked_mul(2)
            .map(|span| span / self.step)
            .ok_or_else(|| too_large.clone())?;
        match usize::try_from(steps) {
            Ok(steps) if steps < MAX_GRID_POINTS => Ok(steps + 1),
            _ => Err(too_large),
        }
    }
}

/// Build the ordered settlement prices for `reference_price`.
pub fn build_grid(reference_price: i64, spec: GridSpec) -> Result<Vec<i64>, GridError> {
    let count = spec.point_count()?;
    let out_of_range = || GridError::OutOfRange { reference_price, half_width: spec.half_width };
    let start = reference_price
        .checked_sub(spec.half_width)
        .ok_or_else(out_of_range)?;
    // count is bounded, so only the last point can overflow.
    spec.step
        .checked_mul(count as i64 - 1)
        .and_then(|span| start.checked_add(span))
        .ok_or_else(out_of_range)?;
    Ok((0..count as i64).map(|i| start + i * spec.step).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_has_201_points() {
        let grid = build_grid(18000, GridSpec::default()).unwrap();
        assert_eq!(grid.len(), 201);
        assert_eq!(grid[0], 17000);
        assert_eq!(grid[100], 18000);
        assert_eq!(*grid.last().unwrap(), 19000);
    }

    #[test]
    fn uneven_width_rounds_upper_end_down() {
        // 50 / 20 = 2 whole steps → 3 points, last at 115 instead of 125.
        let grid = build_grid(100, GridSpec::new(25, 20)).unwrap();
        assert_eq!(grid, vec![75, 95, 115]);

        // Odd width but even span still reaches both ends.
        let grid = build_grid(100, GridSpec::new(25, 10)).unwrap();
        assert_eq!(grid, vec![75, 85, 95, 105, 115, 125]);
    }

    #[test]
    fn zero_width_is_single_point() {
        assert_eq!(build_grid(500, GridSpec::new(0, 10)).unwrap(), vec![500]);
    }

    #[test]
    fn rejects_bad_spec() {
        assert!(build_grid(100, GridSpec::new(100, 0)).is_err());
        assert!(build_grid(100, GridSpec::new(100, -5)).is_err());
        assert!(build_grid(100, GridSpec::new(-1, 10)).is_err());
    }

    #[test]
    fn oversized_grid_is_an_error() {
        assert!(matches!(
            build_grid(0, GridSpec::new(5_000_000_000_000_000_000, 1)),
            Err(GridError::TooLarge { .. })
        ));
        assert!(matches!(
            GridSpec::new(1_000_000_000_000, 1).point_count(),
            Err(GridError::TooLarge { .. })
        ));
        assert_eq!(
            GridSpec::new(50_000, 1).point_count().unwrap(),
            MAX_GRID_POINTS
        );
        assert!(GridSpec::new(50_001, 1).point_count().is_err());
    }

    #[test]
    fn grid_leaving_i64_range_is_an_error() {
        assert!(matches!(
            build_grid(i64::MIN + 5, GridSpec::new(10, 1)),
            Err(GridError::OutOfRange { .. })
        ));
        assert!(matches!(
            build_grid(i64::MAX - 5, GridSpec::new(10, 1)),
            Err(GridError::OutOfRange { .. })
        ));
    }
}
