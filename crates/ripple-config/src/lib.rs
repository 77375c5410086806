//! Measurement job files for ripple analysis.
//!
//! A job bundles gear parameters, analysis settings, a tolerance curve, and
//! the per-tooth profile and helix traces of one gear measurement. Jobs are
//! stored as TOML or JSON; the format follows the file extension.
//!
//! # Features
//!
//! - **Job Files**: Load and save [`MeasurementJob`]s as TOML or JSON
//! - **Conversion**: Turn a job into core geometry, configuration, and traces
//! - **Synthetic Jobs**: Generate gears with a known ripple order for demos
//!
//! # Example
//!
//! ```rust,no_run
//! use ripple_config::MeasurementJob;
//! use ripple_core::RippleAnalyzer;
//!
//! let job = MeasurementJob::load("pinion.toml").unwrap();
//! let analyzer = RippleAnalyzer::new(job.geometry().unwrap(), job.config().unwrap()).unwrap();
//! let results = analyzer
//!     .analyze_all_directions(
//!         &job.profile_traces(),
//!         &job.helix_traces(),
//!         &job.profile_range(),
//!         &job.helix_range(),
//!     )
//!     .unwrap();
//! println!("{} side/direction results", results.len());
//! ```

mod error;
mod job;

/// Synthetic gear measurements.
pub mod synthetic;

pub use error::ConfigError;
pub use job::{DirectionData, GearSection, JobFormat, MeasurementJob};
pub use synthetic::SyntheticGear;
