//! Uniform periodic resampling of a closed curve.
//!
//! The merged curve is sampled where the teeth happen to fall, which is
//! irregular and leaves gaps between teeth. The decomposition works on a
//! uniform grid over `[0, 360]`, filled by linear interpolation that treats
//! the curve as periodic with period 360°: points past the last angle
//! interpolate towards the first angle of the next revolution.
//!
//! # Grid size
//!
//! The highest order searched is `max_order = factor · Z`. The grid holds
//! `max(360, 2 · max_order + 10)` points, which keeps the sampling above the
//! Nyquist rate of that order with a small margin.
//!
//! # Example
//!
//! ```rust
//! use ripple_core::curve::ClosedCurve;
//! use ripple_core::resample::{grid_points, resample};
//!
//! let curve = ClosedCurve {
//!     angles: vec![0.0, 90.0, 180.0, 270.0],
//!     values: vec![0.0, 1.0, 0.0, -1.0],
//! };
//! let uniform = resample(&curve, grid_points(25, 5));
//! assert_eq!(uniform.len(), 360);
//! assert_eq!(uniform.angles[0], 0.0);
//! assert_eq!(*uniform.angles.last().unwrap(), 360.0);
//! ```

use crate::curve::ClosedCurve;
use crate::math::linspace;

/// Full revolution in degrees.
pub const PERIOD_DEG: f64 = 360.0;

/// Minimum number of grid points regardless of tooth count.
pub const MIN_GRID_POINTS: usize = 360;

/// Number of grid points for a gear with `teeth` teeth searched up to
/// `max_order_factor · teeth`.
pub fn grid_points(teeth: u32, max_order_factor: u32) -> usize {
    let max_order = teeth as usize * max_order_factor as usize;
    MIN_GRID_POINTS.max(2 * max_order + 10)
}

/// Resample a closed curve onto `points` evenly spaced angles from 0 to 360°
/// inclusive.
pub fn resample(curve: &ClosedCurve, points: usize) -> ClosedCurve {
    let angles = linspace(0.0, PERIOD_DEG, points);
    let values = periodic_interp(&angles, &curve.angles, &curve.values, PERIOD_DEG);
    ClosedCurve { angles, values }
}

/// Linear interpolation of `(xp, fp)` at `x`, with all abscissae taken modulo
/// `period`.
///
/// `xp` need not be sorted. Returns zeros when there is nothing to
/// interpolate from.
pub fn periodic_interp(x: &[f64], xp: &[f64], fp: &[f64], period: f64) -> Vec<f64> {
    let mut known: Vec<(f64, f64)> = xp
        .iter()
        .zip(fp)
        .map(|(&a, &v)| (a.rem_euclid(period), v))
        .collect();
    if known.is_empty() {
        return vec![0.0; x.len()];
    }
    known.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Close the loop: one point either side from the neighbouring revolution.
    let first = known[0];
    let last = known[known.len() - 1];
    let mut table = Vec::with_capacity(known.len() + 2);
    table.push((last.0 - period, last.1));
    table.extend(known);
    table.push((first.0 + period, first.1));

    x.iter()
        .map(|&xi| interp_sorted(&table, xi.rem_euclid(period)))
        .collect()
}

/// Piecewise-linear lookup in a table sorted by abscissa; clamps outside.
fn interp_sorted(table: &[(f64, f64)], x: f64) -> f64 {
    let idx = table.partition_point(|p| p.0 <= x);
    if idx == 0 {
        return table[0].1;
    }
    if idx == table.len() {
        return table[table.len() - 1].1;
    }
    let (x0, y0) = table[idx - 1];
    let (x1, y1) = table[idx];
    let dx = x1 - x0;
    if dx <= 0.0 {
        y0
    } else {
        y0 + (y1 - y0) * (x - x0) / dx
    }
}
