//! Order spectrum by iterative sine decomposition (matching pursuit).
//!
//! Ripple is periodic over one gear revolution, so the curve is described by
//! integer spatial orders `k` (cycles per revolution). For each candidate
//! order a two-parameter least-squares fit
//!
//! ```text
//! y(θ) ≈ a·cos(kθ) + b·sin(kθ)
//! A = √(a² + b²),   φ = atan2(a, b)
//! ```
//!
//! gives the amplitude of that order. The decomposition repeatedly picks the
//! strongest order, removes its fitted sinusoid from the residual, and
//! searches again, so that after `N` rounds the spectrum holds the `N`
//! dominant orders. Each order is used at most once.
//!
//! Scanning orders `1..=max_order` costs one `O(n)` fit per order, so one
//! decomposition is `O(N · max_order · n)`.

use std::collections::BTreeSet;

use crate::error::{Result, RippleError};
use crate::math::{least_squares, mean, rms};

/// One fitted sinusoid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpectrumComponent {
    /// Spatial order (cycles per revolution), ≥ 1.
    pub order: u32,
    /// Amplitude `√(a² + b²)`, ≥ 0.
    pub amplitude: f64,
    /// Phase `atan2(a, b)` in radians.
    pub phase: f64,
    /// Cosine coefficient `a`.
    pub coefficient_a: f64,
    /// Sine coefficient `b`.
    pub coefficient_b: f64,
}

impl SpectrumComponent {
    /// Build a component from its cosine and sine coefficients.
    pub fn from_coefficients(order: u32, a: f64, b: f64) -> Self {
        Self {
            order,
            amplitude: a.hypot(b),
            phase: a.atan2(b),
            coefficient_a: a,
            coefficient_b: b,
        }
    }

    /// Value of the sinusoid at `angle` radians.
    #[inline]
    pub fn value_at(&self, angle: f64) -> f64 {
        let k_theta = f64::from(self.order) * angle;
        self.coefficient_a * k_theta.cos() + self.coefficient_b * k_theta.sin()
    }

    /// The sinusoid sampled at `angles_rad`.
    pub fn waveform(&self, angles_rad: &[f64]) -> Vec<f64> {
        angles_rad.iter().map(|&t| self.value_at(t)).collect()
    }

    /// Phase in degrees.
    pub fn phase_deg(&self) -> f64 {
        self.phase.to_degrees()
    }
}

/// Result of an iterative decomposition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpectrumResult {
    /// Components in extraction order (not sorted).
    pub components: Vec<SpectrumComponent>,
    /// Sum of all component sinusoids on the input grid.
    pub reconstructed: Vec<f64>,
    /// What remains of the mean-free input after all extractions.
    pub residual: Vec<f64>,
    /// The input values as given.
    pub original: Vec<f64>,
}

impl SpectrumResult {
    /// Orders in extraction order.
    pub fn orders(&self) -> Vec<u32> {
        self.components.iter().map(|c| c.order).collect()
    }

    /// Amplitudes in extraction order.
    pub fn amplitudes(&self) -> Vec<f64> {
        self.components.iter().map(|c| c.amplitude).collect()
    }

    /// Phases (radians) in extraction order.
    pub fn phases(&self) -> Vec<f64> {
        self.components.iter().map(|c| c.phase).collect()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True if no component was extracted.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// RMS of the final residual.
    pub fn residual_rms(&self) -> f64 {
        rms(&self.residual)
    }

    /// Component with the largest amplitude.
    pub fn dominant(&self) -> Option<&SpectrumComponent> {
        self.components
            .iter()
            .max_by(|a, b| a.amplitude.total_cmp(&b.amplitude))
    }
}

/// Least-squares fit of a single order to `values` sampled at `angles_rad`.
pub fn fit_order(angles_rad: &[f64], values: &[f64], order: u32) -> SpectrumComponent {
    let k = f64::from(order);
    let [a, b] = least_squares(
        angles_rad.iter().map(|&t| {
            let (sin, cos) = (k * t).sin_cos();
            [cos, sin]
        }),
        values,
    );
    SpectrumComponent::from_coefficients(order, a, b)
}

/// Strongest order found by [`search_best_order`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSearch {
    /// Winning order.
    pub order: u32,
    /// Its amplitude.
    pub amplitude: f64,
    /// The full fit.
    pub component: SpectrumComponent,
}

/// Scan `min_order..=max_order`, skipping `excluded`, and return the order
/// with the largest fitted amplitude.
///
/// Comparison is strict, so on an exact tie the lowest order wins. Returns
/// `None` if every candidate is excluded or the range is empty.
pub fn search_best_order(
    angles_rad: &[f64],
    values: &[f64],
    max_order: u32,
    min_order: u32,
    excluded: &BTreeSet<u32>,
) -> Option<OrderSearch> {
    let mut best: Option<SpectrumComponent> = None;

    for order in min_order..=max_order {
        if excluded.contains(&order) {
            continue;
        }
        let component = fit_order(angles_rad, values, order);
        match best {
            Some(b) if component.amplitude <= b.amplitude => {}
            _ => best = Some(component),
        }
    }

    best.map(|component| OrderSearch {
        order: component.order,
        amplitude: component.amplitude,
        component,
    })
}

/// Iterative sine decomposition over orders `1..=max_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectralDecomposer {
    max_order: u32,
}

impl SpectralDecomposer {
    /// Lowest order searched.
    pub const MIN_ORDER: u32 = 1;

    /// Create a decomposer searching up to `max_order`.
    pub fn new(max_order: u32) -> Self {
        Self { max_order }
    }

    /// Decomposer for a gear: `max_order = max_order_factor · teeth`.
    pub fn for_teeth(teeth: u32, max_order_factor: u32) -> Self {
        Self::new(teeth.saturating_mul(max_order_factor))
    }

    /// Highest order searched.
    pub fn max_order(&self) -> u32 {
        self.max_order
    }

    /// Extract the `component_count` strongest orders from `values` sampled at
    /// `angles_deg`.
    ///
    /// The mean is removed first. Each round fits every order that has not
    /// been extracted yet, keeps the strongest, and subtracts its sinusoid
    /// from the running residual.
    pub fn decompose(
        &self,
        angles_deg: &[f64],
        values: &[f64],
        component_count: usize,
    ) -> Result<SpectrumResult> {
        if angles_deg.is_empty() || values.is_empty() {
            return Err(RippleError::InvalidInput(
                "decomposition needs at least one sample".to_string(),
            ));
        }
        if angles_deg.len() != values.len() {
            return Err(RippleError::InvalidInput(format!(
                "{} angles but {} values",
                angles_deg.len(),
                values.len()
            )));
        }
        let candidates = (Self::MIN_ORDER..=self.max_order).count();
        if component_count > candidates {
            return Err(RippleError::InvalidInput(format!(
                "cannot extract {component_count} distinct orders from {candidates} candidates"
            )));
        }

        let angles_rad: Vec<f64> = angles_deg.iter().map(|a| a.to_radians()).collect();
        let offset = mean(values);
        let mut residual: Vec<f64> = values.iter().map(|v| v - offset).collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            max_order = self.max_order,
            components = component_count,
            samples = values.len(),
            "starting sine decomposition"
        );

        let mut components = Vec::with_capacity(component_count);
        let mut extracted = BTreeSet::new();

        for _ in 0..component_count {
            let found = search_best_order(
                &angles_rad,
                &residual,
                self.max_order,
                Self::MIN_ORDER,
                &extracted,
            )
            .ok_or_else(|| {
                RippleError::InvalidInput("no candidate order left to extract".to_string())
            })?;

            extracted.insert(found.order);
            residual = residual
                .iter()
                .zip(&angles_rad)
                .map(|(r, &t)| r - found.component.value_at(t))
                .collect();

            #[cfg(feature = "tracing")]
            tracing::debug!(
                iteration = components.len() + 1,
                order = found.order,
                amplitude = found.amplitude,
                phase_deg = found.component.phase_deg(),
                residual_rms = rms(&residual),
                "extracted component"
            );

            components.push(found.component);
        }

        let reconstructed = angles_rad
            .iter()
            .map(|&t| components.iter().map(|c| c.value_at(t)).sum::<f64>())
            .collect();

        Ok(SpectrumResult {
            components,
            reconstructed,
            residual,
            original: values.to_vec(),
        })
    }
}
