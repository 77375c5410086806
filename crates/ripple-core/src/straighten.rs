//! Crown and slope removal for single-tooth traces.
//!
//! Ripple is the short-wave content left after the form of the flank is taken
//! out. The form is modelled as a parabola (crowning / tip relief) plus a
//! straight line (slope deviation) over a normalised abscissa `x ∈ [-1, 1]`:
//!
//! ```text
//! 1. fit  a·x² + b·x + c  → subtract   (crown)
//! 2. fit  k·x + d         → subtract   (slope)
//! ```

use crate::math::{least_squares, linspace};

/// Fewer samples than this cannot carry a quadratic fit.
pub const MIN_TREND_SAMPLES: usize = 3;

/// Quadratic trend `crown·x² + slope·x + offset` over `x = linspace(-1, 1, n)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    /// Coefficient of x².
    pub crown: f64,
    /// Coefficient of x.
    pub slope: f64,
    /// Constant term.
    pub offset: f64,
}

impl Trend {
    /// Evaluate the trend at normalised position `x`.
    #[inline]
    pub fn at(&self, x: f64) -> f64 {
        self.crown * x * x + self.slope * x + self.offset
    }
}

/// Least-squares quadratic trend of `values`, or `None` for fewer than three
/// samples.
pub fn quadratic_trend(values: &[f64]) -> Option<Trend> {
    if values.len() < MIN_TREND_SAMPLES {
        return None;
    }
    let x = linspace(-1.0, 1.0, values.len());
    let [crown, slope, offset] = least_squares(x.iter().map(|&x| [x * x, x, 1.0]), values);
    Some(Trend {
        crown,
        slope,
        offset,
    })
}

/// Remove crown and slope from a single-tooth trace.
///
/// Traces shorter than three samples are returned unchanged.
///
/// # Example
/// ```rust
/// use ripple_core::straighten::straighten;
///
/// let bowed: Vec<f64> = (0..21)
///     .map(|i| {
///         let x = -1.0 + i as f64 * 0.1;
///         4.0 * x * x + 2.0 * x + 1.0
///     })
///     .collect();
/// assert!(straighten(&bowed).iter().all(|v| v.abs() < 1e-9));
/// ```
pub fn straighten(values: &[f64]) -> Vec<f64> {
    let Some(crown) = quadratic_trend(values) else {
        return values.to_vec();
    };
    let x = linspace(-1.0, 1.0, values.len());

    let crown_removed: Vec<f64> = values
        .iter()
        .zip(&x)
        .map(|(&v, &x)| v - crown.at(x))
        .collect();

    let [k, d] = least_squares(x.iter().map(|&x| [x, 1.0]), &crown_removed);

    crown_removed
        .iter()
        .zip(&x)
        .map(|(&v, &x)| v - (k * x + d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_traces_pass_through() {
        assert!(straighten(&[]).is_empty());
        assert_eq!(straighten(&[1.5]), vec![1.5]);
        assert_eq!(straighten(&[1.0, 4.0]), vec![1.0, 4.0]);
        assert!(quadratic_trend(&[1.0, 2.0]).is_none());
    }

    #[test]
    fn three_samples_fit_exactly() {
        let out = straighten(&[5.0, -2.0, 7.0]);
        assert!(out.iter().all(|v| v.abs() < 1e-9), "{out:?}");
    }

    #[test]
    fn ripple_survives_straightening() {
        let n = 200;
        let x = linspace(-1.0, 1.0, n);
        let ripple: Vec<f64> = x
            .iter()
            .map(|&x| 0.5 * (20.0 * std::f64::consts::PI * x).sin())
            .collect();
        let formed: Vec<f64> = ripple
            .iter()
            .zip(&x)
            .map(|(&r, &x)| r + 8.0 * x * x - 3.0 * x + 2.0)
            .collect();

        let out = straighten(&formed);
        let trend = quadratic_trend(&out).unwrap();
        assert!(trend.crown.abs() < 1e-9);
        assert!(trend.slope.abs() < 1e-9);
        assert!(trend.offset.abs() < 1e-9);

        // The high-frequency ripple is nearly orthogonal to the trend.
        let peak = out.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        assert!(peak > 0.4 && peak < 0.6, "peak {peak}");
    }
}
