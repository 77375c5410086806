//! Analysis configuration.

use crate::error::{Result, RippleError};

/// Tunable parameters of the ripple analysis.
///
/// # Example
/// ```rust
/// use ripple_core::AnalysisConfig;
///
/// let config = AnalysisConfig::default()
///     .with_component_count(15)
///     .with_amplitude_scale(1.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisConfig {
    /// Number of sinusoids extracted per curve.
    pub component_count: usize,
    /// Factor applied to high-order amplitudes and waveform. The default of
    /// 0.1 is a unit/engineering convention carried over from existing
    /// reports, not a physical constant.
    pub amplitude_scale: f64,
    /// Orders are searched up to `max_order_factor · Z`.
    pub max_order_factor: u32,
    /// Merged curves with fewer points are not analysed.
    pub min_curve_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            component_count: 10,
            amplitude_scale: 0.1,
            max_order_factor: 5,
            min_curve_points: 10,
        }
    }
}

impl AnalysisConfig {
    /// Set the number of extracted components.
    pub fn with_component_count(mut self, count: usize) -> Self {
        self.component_count = count;
        self
    }

    /// Set the high-order amplitude scale.
    pub fn with_amplitude_scale(mut self, scale: f64) -> Self {
        self.amplitude_scale = scale;
        self
    }

    /// Set the search bound factor.
    pub fn with_max_order_factor(mut self, factor: u32) -> Self {
        self.max_order_factor = factor;
        self
    }

    /// Set the minimum merged-curve size.
    pub fn with_min_curve_points(mut self, points: usize) -> Self {
        self.min_curve_points = points;
        self
    }

    /// Highest order searched for a gear with `teeth` teeth.
    pub fn max_order(&self, teeth: u32) -> u32 {
        teeth.saturating_mul(self.max_order_factor)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.component_count == 0 {
            return Err(RippleError::InvalidConfig {
                field: "component_count",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.amplitude_scale.is_finite() || self.amplitude_scale <= 0.0 {
            return Err(RippleError::InvalidConfig {
                field: "amplitude_scale",
                reason: format!("must be finite and positive, got {}", self.amplitude_scale),
            });
        }
        if self.max_order_factor == 0 {
            return Err(RippleError::InvalidConfig {
                field: "max_order_factor",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// [`validate`](Self::validate), plus a check that the search range of a
    /// gear with `teeth` teeth holds enough distinct orders.
    pub fn validate_for(&self, teeth: u32) -> Result<()> {
        self.validate()?;
        let max_order = self.max_order(teeth) as usize;
        if self.component_count > max_order {
            return Err(RippleError::InvalidConfig {
                field: "component_count",
                reason: format!(
                    "{} components requested but only orders 1..={max_order} are searched",
                    self.component_count
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.component_count, 10);
        assert_eq!(config.amplitude_scale, 0.1);
        assert_eq!(config.max_order(25), 125);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_components() {
        let err = AnalysisConfig::default()
            .with_component_count(0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            RippleError::InvalidConfig {
                field: "component_count",
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_scale() {
        assert!(AnalysisConfig::default().with_amplitude_scale(0.0).validate().is_err());
        assert!(
            AnalysisConfig::default()
                .with_amplitude_scale(f64::INFINITY)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn too_many_components_for_small_gear() {
        let config = AnalysisConfig::default().with_max_order_factor(1);
        assert!(config.validate_for(10).is_ok());
        assert!(config.validate_for(9).is_err());
    }
}
