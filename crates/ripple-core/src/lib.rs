//! Ripple Core - gear flank ripple (high-order waviness) analysis
//!
//! This crate turns per-tooth profile and helix traces from a gear measuring
//! machine into a closed curve over one revolution, decomposes that curve into
//! its dominant rotational orders, and scores the orders at or above the tooth
//! count.
//!
//! # Pipeline
//!
//! ## Geometry
//!
//! - [`GearGeometry`] - Tooth count, module, angles and derived diameters
//! - [`AngleMapper`] - Sample position to rotation angle (roll and axial twist)
//!
//! ## Curve Assembly
//!
//! - [`straighten`] - Remove crowning and slope from one trace
//! - [`CurveAssembler`] - Merge all teeth of one flank into a [`ClosedCurve`]
//! - [`resample`] - Periodic linear interpolation onto a uniform grid
//!
//! ## Spectrum
//!
//! - [`SpectralDecomposer`] - Greedy single-order least-squares matching pursuit
//! - [`HighOrderScorer`] - Total amplitude W and RMS of orders `>= Z`
//! - [`RippleTolerance`] - Order-dependent limit curve `R / (O - 1)^(N0 + K / O)`
//!
//! ## Orchestration
//!
//! - [`RippleAnalyzer`] - Runs the whole pipeline for each side and direction
//!
//! # Example
//!
//! ```rust
//! use ripple_core::{
//!     AnalysisConfig, Direction, EvaluationRange, FlankTraces, GearGeometry, RippleAnalyzer,
//!     ToothTrace,
//! };
//!
//! let gear = GearGeometry::new(20, 3.0, 20.0, 0.0, None)?;
//! let analyzer = RippleAnalyzer::new(gear, AnalysisConfig::default())?;
//!
//! let trace: Vec<f64> = (0..40).map(|i| 0.5 * (f64::from(i) * 0.4).sin()).collect();
//! let mut profile = FlankTraces::default();
//! profile.left = (0..20u32).map(|t| ToothTrace::new(t, trace.clone())).collect();
//!
//! let range = EvaluationRange::new(57.0, 63.0, 56.5, 63.5);
//! let results =
//!     analyzer.analyze_all_directions(&profile, &FlankTraces::default(), &range, &range)?;
//!
//! for (key, result) in &results {
//!     println!("{key}: W = {:.4}", result.high_order.total_amplitude);
//! }
//! # Ok::<(), ripple_core::RippleError>(())
//! ```
//!
//! # Features
//!
//! - `serde` - Serialize/deserialize results and configuration
//! - `tracing` - Structured diagnostics from the pipeline stages

pub mod analyzer;
pub mod angle;
pub mod config;
pub mod curve;
pub mod error;
pub mod flank;
pub mod geometry;
pub mod high_order;
pub mod math;
pub mod resample;
pub mod spectrum;
pub mod straighten;
pub mod tolerance;

// Re-export main types at crate root
pub use analyzer::{AnalysisKey, RippleAnalysisResult, RippleAnalyzer};
pub use angle::AngleMapper;
pub use config::AnalysisConfig;
pub use curve::{ClosedCurve, CurveAssembler, ToothSegment};
pub use error::{Result, RippleError};
pub use flank::{Direction, EvaluationRange, FlankTraces, Side, ToothId, ToothTrace};
pub use geometry::GearGeometry;
pub use high_order::{HighOrderResult, HighOrderScorer};
pub use resample::{MIN_GRID_POINTS, PERIOD_DEG, grid_points, periodic_interp, resample};
pub use spectrum::{
    OrderSearch, SpectralDecomposer, SpectrumComponent, SpectrumResult, fit_order,
    search_best_order,
};
pub use straighten::{MIN_TREND_SAMPLES, Trend, quadratic_trend, straighten};
pub use tolerance::{AUTO_K, AUTO_N0, RippleTolerance, ToleranceCheck};
