//! End-to-end ripple analysis of one gear.
//!
//! ```text
//! traces ─▶ build_closed_curve ─▶ resample ─▶ decompose ─▶ high-order score
//! ```
//!
//! One [`RippleAnalyzer`] serves all sides and directions of a gear. It holds
//! no mutable state, so independent analyses may run on separate threads.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::AnalysisConfig;
use crate::curve::{ClosedCurve, CurveAssembler};
use crate::error::Result;
use crate::flank::{Direction, EvaluationRange, FlankTraces, Side, ToothTrace};
use crate::geometry::GearGeometry;
use crate::high_order::{HighOrderResult, HighOrderScorer};
use crate::resample::{grid_points, resample};
use crate::spectrum::{SpectralDecomposer, SpectrumResult};

/// Identifies one side/direction combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnalysisKey {
    /// Flank side.
    pub side: Side,
    /// Measurement direction.
    pub direction: Direction,
}

impl AnalysisKey {
    /// Create a key.
    pub fn new(side: Side, direction: Direction) -> Self {
        Self { side, direction }
    }
}

impl fmt::Display for AnalysisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.side, self.direction)
    }
}

/// Everything computed for one side and direction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RippleAnalysisResult {
    /// Flank side.
    pub side: Side,
    /// Measurement direction.
    pub direction: Direction,
    /// Merged curve before interpolation.
    pub curve: ClosedCurve,
    /// Curve on the uniform grid.
    pub resampled: ClosedCurve,
    /// Order spectrum of the resampled curve.
    pub spectrum: SpectrumResult,
    /// High-order part of the spectrum.
    pub high_order: HighOrderResult,
}

impl RippleAnalysisResult {
    /// Key of this result.
    pub fn key(&self) -> AnalysisKey {
        AnalysisKey::new(self.side, self.direction)
    }
}

/// Runs the ripple pipeline for one gear.
///
/// # Example
///
/// ```rust
/// use ripple_core::{
///     AnalysisConfig, Direction, EvaluationRange, GearGeometry, RippleAnalyzer, Side, ToothTrace,
/// };
///
/// let gear = GearGeometry::new(25, 2.0, 20.0, 0.0, None).unwrap();
/// let analyzer = RippleAnalyzer::new(gear, AnalysisConfig::default()).unwrap();
///
/// let trace: Vec<f64> = (0..50).map(|i| (i as f64 * 0.7).sin()).collect();
/// let traces: Vec<ToothTrace> = (0..25u32).map(|t| ToothTrace::new(t, trace.clone())).collect();
/// let range = EvaluationRange::new(47.5, 52.5, 47.0, 53.0);
///
/// let result = analyzer
///     .analyze(&traces, Direction::Profile, Side::Left, &range)
///     .unwrap()
///     .expect("enough data");
/// assert_eq!(result.spectrum.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct RippleAnalyzer {
    geometry: GearGeometry,
    config: AnalysisConfig,
}

impl RippleAnalyzer {
    /// Create an analyzer. Fails if `config` is unusable for this gear.
    pub fn new(geometry: GearGeometry, config: AnalysisConfig) -> Result<Self> {
        config.validate_for(geometry.teeth())?;
        Ok(Self { geometry, config })
    }

    /// Gear geometry.
    pub fn geometry(&self) -> &GearGeometry {
        &self.geometry
    }

    /// Analysis configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Merge `traces` into a closed curve without analysing it.
    pub fn build_curve(
        &self,
        traces: &[ToothTrace],
        direction: Direction,
        side: Side,
        range: &EvaluationRange,
    ) -> Option<ClosedCurve> {
        CurveAssembler::new(&self.geometry).build_closed_curve(traces, direction, side, range)
    }

    /// Analyse one side and direction.
    ///
    /// Returns `Ok(None)` when the merged curve has fewer than
    /// `min_curve_points` points.
    pub fn analyze(
        &self,
        traces: &[ToothTrace],
        direction: Direction,
        side: Side,
        range: &EvaluationRange,
    ) -> Result<Option<RippleAnalysisResult>> {
        let Some(curve) = self
            .build_curve(traces, direction, side, range)
            .filter(|curve| curve.len() >= self.config.min_curve_points)
        else {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                side = %side,
                direction = %direction,
                min_points = self.config.min_curve_points,
                "insufficient data for ripple analysis"
            );
            return Ok(None);
        };

        let teeth = self.geometry.teeth();
        let resampled = resample(&curve, grid_points(teeth, self.config.max_order_factor));

        let decomposer = SpectralDecomposer::for_teeth(teeth, self.config.max_order_factor);
        let spectrum = decomposer.decompose(
            &resampled.angles,
            &resampled.values,
            self.config.component_count,
        )?;

        let high_order = HighOrderScorer::new(teeth, self.config.amplitude_scale)
            .evaluate(&spectrum, &resampled.angles);

        #[cfg(feature = "tracing")]
        tracing::info!(
            side = %side,
            direction = %direction,
            points = curve.len(),
            high_orders = high_order.orders.len(),
            w = high_order.total_amplitude,
            rms = high_order.rms,
            "ripple analysis complete"
        );

        Ok(Some(RippleAnalysisResult {
            side,
            direction,
            curve,
            resampled,
            spectrum,
            high_order,
        }))
    }

    /// Analyse every side and direction that has data.
    ///
    /// Combinations without traces or without a usable curve are left out of
    /// the map; they never abort the remaining ones.
    pub fn analyze_all_directions(
        &self,
        profile: &FlankTraces,
        helix: &FlankTraces,
        profile_range: &EvaluationRange,
        helix_range: &EvaluationRange,
    ) -> Result<BTreeMap<AnalysisKey, RippleAnalysisResult>> {
        let mut results = BTreeMap::new();

        for side in Side::ALL {
            let jobs = [
                (Direction::Profile, profile.side(side), profile_range),
                (Direction::Helix, helix.side(side), helix_range),
            ];
            for (direction, traces, range) in jobs {
                if traces.is_empty() {
                    continue;
                }
                if let Some(result) = self.analyze(traces, direction, side, range)? {
                    results.insert(result.key(), result);
                }
            }
        }

        Ok(results)
    }
}
