//! Integration tests for ripple-config.
//!
//! These tests verify job files on disk and their conversion into a full
//! analysis run.

use ripple_config::{ConfigError, GearSection, MeasurementJob, SyntheticGear};
use ripple_core::{AnalysisConfig, AnalysisKey, Direction, RippleAnalyzer, Side};
use tempfile::TempDir;

fn small_synthetic() -> MeasurementJob {
    SyntheticGear {
        gear: GearSection {
            helix_angle: 15.0,
            ..GearSection::new(25, 2.0)
        },
        points: 120,
        ..SyntheticGear::default()
    }
    .build()
    .expect("valid synthetic gear")
}

/// Save and reload in both formats; the job survives unchanged.
#[test]
fn test_job_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let job = small_synthetic();

    for name in ["job.toml", "nested/dir/job.json"] {
        let path = dir.path().join(name);
        job.save(&path).expect("save");
        assert!(path.exists());
        let loaded = MeasurementJob::load(&path).expect("load");
        assert_eq!(loaded, job, "{name} did not round trip");
    }
}

/// Unknown extensions are rejected on both save and load.
#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job.yaml");
    let job = MeasurementJob::new(GearSection::new(20, 1.0));

    assert!(matches!(
        job.save(&path),
        Err(ConfigError::UnsupportedFormat { .. })
    ));
    assert!(matches!(
        MeasurementJob::load(&path),
        Err(ConfigError::UnsupportedFormat { .. })
    ));
}

/// A missing file reports the path it tried to read.
#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = MeasurementJob::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

/// A hand-written TOML job with settings overrides feeds the analyzer.
#[test]
fn test_handwritten_job_analysis() {
    let mut text = String::from(
        r#"
name = "hand written"

[gear]
teeth = 12
module = 3.0

[analysis]
component_count = 4

[tolerance]
r = 1.5

[helix.range]
eval_start = 0.0
eval_end = 30.0
meas_start = 0.0
meas_end = 30.0

[helix.left]
"#,
    );
    // Spur helix: each tooth collapses onto its pitch slot, one point per tooth.
    for tooth in 0..12 {
        let level = f64::from(tooth % 3);
        text.push_str(&format!(
            "\"{tooth}\" = [0.0, {level:.1}, 0.0, -{level:.1}, 0.0]\n"
        ));
    }

    let job = MeasurementJob::from_toml(&text).unwrap();
    assert_eq!(job.analysis.component_count, 4);
    assert_eq!(job.analysis.amplitude_scale, AnalysisConfig::default().amplitude_scale);
    assert_eq!(job.tolerance.r, 1.5);
    assert_eq!(job.tolerance.n0, 1.0);

    let analyzer = RippleAnalyzer::new(job.geometry().unwrap(), job.config().unwrap()).unwrap();
    let results = analyzer
        .analyze_all_directions(
            &job.profile_traces(),
            &job.helix_traces(),
            &job.profile_range(),
            &job.helix_range(),
        )
        .unwrap();

    let key = AnalysisKey::new(Side::Left, Direction::Helix);
    assert_eq!(results.len(), 1);
    let result = &results[&key];
    assert_eq!(result.curve.len(), 12);
    assert_eq!(result.spectrum.len(), 4);
}

/// All four side/direction results come out of a synthetic helical job.
#[test]
fn test_synthetic_job_full_analysis() {
    let job = small_synthetic();
    let analyzer = RippleAnalyzer::new(job.geometry().unwrap(), job.config().unwrap()).unwrap();
    let results = analyzer
        .analyze_all_directions(
            &job.profile_traces(),
            &job.helix_traces(),
            &job.profile_range(),
            &job.helix_range(),
        )
        .unwrap();

    assert_eq!(results.len(), 4);
    for result in results.values() {
        assert_eq!(result.spectrum.components[0].order, 75, "{}", result.key());
        assert!(result.high_order.orders.contains(&75));
        assert!(result.high_order.total_amplitude > 0.0);
    }
}
