//! High-order ripple scoring.
//!
//! Orders at or above the tooth count Z repeat at least once per tooth mesh
//! and are typically left by the finishing process (grinding, honing). The
//! scorer keeps those components of a spectrum and reports two severity
//! figures:
//!
//! - **W**: sum of the scaled high-order amplitudes
//! - **RMS**: root mean square of the scaled high-order waveform

use crate::math::rms;
use crate::spectrum::SpectrumResult;

/// High-order part of a spectrum.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighOrderResult {
    /// Positions of the selected components in extraction order.
    pub indices: Vec<usize>,
    /// Orders of the selected components.
    pub orders: Vec<u32>,
    /// Scaled amplitudes of the selected components.
    pub amplitudes: Vec<f64>,
    /// Scaled sum of the selected sinusoids on the evaluation grid.
    pub waveform: Vec<f64>,
    /// W value: sum of `amplitudes`.
    pub total_amplitude: f64,
    /// RMS of `waveform`.
    pub rms: f64,
}

impl HighOrderResult {
    /// True if no component reached the tooth-count order.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Selects and scores components with order ≥ Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighOrderScorer {
    teeth: u32,
    amplitude_scale: f64,
}

impl HighOrderScorer {
    /// Create a scorer for a gear with `teeth` teeth. Every reported
    /// amplitude and the waveform are multiplied by `amplitude_scale`.
    pub fn new(teeth: u32, amplitude_scale: f64) -> Self {
        Self {
            teeth,
            amplitude_scale,
        }
    }

    /// Lowest order counted as high order.
    pub fn threshold(&self) -> u32 {
        self.teeth
    }

    /// Scale applied to amplitudes and waveform.
    pub fn amplitude_scale(&self) -> f64 {
        self.amplitude_scale
    }

    /// Score `spectrum` on the grid `angles_deg` it was computed on.
    pub fn evaluate(&self, spectrum: &SpectrumResult, angles_deg: &[f64]) -> HighOrderResult {
        let scaled: Vec<f64> = spectrum
            .components
            .iter()
            .map(|c| c.amplitude * self.amplitude_scale)
            .collect();

        let indices: Vec<usize> = spectrum
            .components
            .iter()
            .enumerate()
            .filter(|(_, c)| c.order >= self.teeth)
            .map(|(i, _)| i)
            .collect();

        let orders = indices.iter().map(|&i| spectrum.components[i].order).collect();
        let amplitudes: Vec<f64> = indices.iter().map(|&i| scaled[i]).collect();

        let waveform: Vec<f64> = angles_deg
            .iter()
            .map(|a| {
                let t = a.to_radians();
                let sum: f64 = indices
                    .iter()
                    .map(|&i| spectrum.components[i].value_at(t))
                    .sum();
                sum * self.amplitude_scale
            })
            .collect();

        let total_amplitude = amplitudes.iter().sum();
        let rms = rms(&waveform);

        HighOrderResult {
            indices,
            orders,
            amplitudes,
            waveform,
            total_amplitude,
            rms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::linspace;
    use crate::spectrum::SpectrumComponent;

    fn spectrum_with(orders_amps: &[(u32, f64)]) -> SpectrumResult {
        SpectrumResult {
            components: orders_amps
                .iter()
                .map(|&(k, a)| SpectrumComponent::from_coefficients(k, 0.0, a))
                .collect(),
            reconstructed: Vec::new(),
            residual: Vec::new(),
            original: Vec::new(),
        }
    }

    #[test]
    fn selects_orders_at_or_above_teeth() {
        let spectrum = spectrum_with(&[(1, 4.0), (5, 3.0), (20, 2.0), (30, 1.0)]);
        let angles = linspace(0.0, 360.0, 720);
        let result = HighOrderScorer::new(20, 0.1).evaluate(&spectrum, &angles);

        assert_eq!(result.indices, vec![2, 3]);
        assert_eq!(result.orders, vec![20, 30]);
        assert!((result.amplitudes[0] - 0.2).abs() < 1e-12);
        assert!((result.total_amplitude - 0.1 * (2.0 + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn rms_of_scaled_waveform() {
        let spectrum = spectrum_with(&[(40, 2.0)]);
        let angles = linspace(0.0, 360.0, 2001);
        let result = HighOrderScorer::new(20, 0.5).evaluate(&spectrum, &angles);
        // A sine of amplitude 1 has RMS 1/√2.
        assert!((result.rms - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-3);
        assert_eq!(result.waveform.len(), angles.len());
    }

    #[test]
    fn no_high_orders() {
        let spectrum = spectrum_with(&[(1, 4.0), (2, 3.0)]);
        let angles = linspace(0.0, 360.0, 360);
        let result = HighOrderScorer::new(20, 0.1).evaluate(&spectrum, &angles);
        assert!(result.is_empty());
        assert_eq!(result.total_amplitude, 0.0);
        assert_eq!(result.rms, 0.0);
    }

    #[test]
    fn empty_grid_gives_zero_rms() {
        let spectrum = spectrum_with(&[(25, 1.0)]);
        let result = HighOrderScorer::new(20, 0.1).evaluate(&spectrum, &[]);
        assert!(result.waveform.is_empty());
        assert_eq!(result.rms, 0.0);
        assert!((result.total_amplitude - 0.1).abs() < 1e-12);
    }
}
