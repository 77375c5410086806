//! Ripple tolerance limit curve.
//!
//! The permissible amplitude falls off with order:
//!
//! ```text
//! T(O) = R                   O ≤ 1
//! T(O) = R / (O − 1)^N       N = N₀ + K / O
//! ```
//!
//! `R` is the permissible wave depth, `N₀` the base exponent and `K` a
//! correction that steepens the curve at low orders.

use crate::spectrum::SpectrumComponent;

/// Base exponent used by [`RippleTolerance::auto_fit`].
pub const AUTO_N0: f64 = 0.6;
/// Correction used by [`RippleTolerance::auto_fit`].
pub const AUTO_K: f64 = 2.8;

const AUTO_R_MIN: f64 = 0.0001;
const AUTO_R_MAX: f64 = 10.0;

/// Parameters of the limit curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RippleTolerance {
    /// Permissible wave depth R.
    pub r: f64,
    /// Base exponent N₀.
    pub n0: f64,
    /// Exponent correction K.
    pub k: f64,
}

impl Default for RippleTolerance {
    fn default() -> Self {
        Self {
            r: 2.0,
            n0: 1.0,
            k: 0.0,
        }
    }
}

/// Verdict for one spectrum component.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToleranceCheck {
    /// Component order.
    pub order: u32,
    /// Component amplitude.
    pub amplitude: f64,
    /// Limit at this order.
    pub limit: f64,
    /// True if the amplitude is above the limit.
    pub exceeded: bool,
}

impl RippleTolerance {
    /// Create a limit curve.
    pub fn new(r: f64, n0: f64, k: f64) -> Self {
        Self { r, n0, k }
    }

    /// Exponent `N = N₀ + K/O` at `order`.
    pub fn exponent(&self, order: f64) -> f64 {
        self.n0 + self.k / order
    }

    /// Permissible amplitude at `order`.
    ///
    /// # Example
    /// ```rust
    /// use ripple_core::RippleTolerance;
    ///
    /// let tol = RippleTolerance::new(2.0, 1.0, 0.0);
    /// assert_eq!(tol.limit(1.0), 2.0);
    /// assert_eq!(tol.limit(5.0), 0.5);
    /// ```
    pub fn limit(&self, order: f64) -> f64 {
        if order <= 1.0 {
            self.r
        } else {
            self.r / (order - 1.0).powf(self.exponent(order))
        }
    }

    /// Check each component against the curve.
    pub fn check(&self, components: &[SpectrumComponent]) -> Vec<ToleranceCheck> {
        components
            .iter()
            .map(|c| {
                let limit = self.limit(f64::from(c.order));
                ToleranceCheck {
                    order: c.order,
                    amplitude: c.amplitude,
                    limit,
                    exceeded: c.amplitude > limit,
                }
            })
            .collect()
    }

    /// Fit a curve to a measured spectrum.
    ///
    /// Uses `N₀ = 0.6`, `K = 2.8`, and picks `R` so that the limit at order
    /// `teeth` is 1.5× the strongest amplitude within one order of `teeth`,
    /// or 2× the strongest amplitude overall if no component is that close.
    /// `R` is clamped to `[0.0001, 10]`. Returns `None` for an empty spectrum
    /// or fewer than two teeth.
    pub fn auto_fit(components: &[SpectrumComponent], teeth: u32) -> Option<Self> {
        if components.is_empty() || teeth < 2 {
            return None;
        }
        let ze = f64::from(teeth);
        let span = (ze - 1.0).powf(AUTO_N0 + AUTO_K / ze);

        let near_mesh = components
            .iter()
            .filter(|c| (f64::from(c.order) - ze).abs() < 1.0)
            .map(|c| c.amplitude)
            .fold(None, |best: Option<f64>, a| Some(best.map_or(a, |b| b.max(a))));

        let r = match near_mesh {
            Some(amplitude) => amplitude * 1.5 * span,
            None => {
                let peak = components.iter().map(|c| c.amplitude).fold(0.0, f64::max);
                peak * 2.0 * span
            }
        };

        Some(Self::new(r.clamp(AUTO_R_MIN, AUTO_R_MAX), AUTO_N0, AUTO_K))
    }
}
