//! Closed-curve assembly from per-tooth traces.
//!
//! Each tooth trace is cut down to its evaluation range, straightened, and
//! mapped onto the gear rotation angle. The pieces from all teeth are then
//! merged into one curve over `[0, 360)`.
//!
//! ## Evaluation slicing
//!
//! The measured trace spans `meas_start..meas_end`; only `eval_start..eval_end`
//! is scored. The slice indices are proportional to the position within the
//! measured span (roll length for profiles, axial position for helices):
//!
//! ```text
//! start = ⌊n · clamp((e_start − m_start) / (m_end − m_start), 0, 1)⌋
//! end   = ⌊n · clamp((e_end   − m_start) / (m_end − m_start), 0, 1)⌋
//! ```
//!
//! A degenerate measured or evaluated span falls back to the whole trace.

use crate::angle::AngleMapper;
use crate::flank::{Direction, EvaluationRange, Side, ToothTrace};
use crate::geometry::GearGeometry;
use crate::math::linspace;
use crate::straighten::{MIN_TREND_SAMPLES, straighten};

/// Angles are considered duplicates when equal after rounding to 1/1000°.
const DEDUP_RESOLUTION: f64 = 1000.0;

/// Straightened evaluation slice of one tooth.
#[derive(Debug, Clone, PartialEq)]
pub struct ToothSegment {
    /// Crown- and slope-free deviation values (μm).
    pub values: Vec<f64>,
    /// Sample positions: roll lengths (profile) or axial positions (helix).
    pub positions: Vec<f64>,
}

/// Deviation curve over the gear rotation angle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosedCurve {
    /// Angles in degrees, ascending.
    pub angles: Vec<f64>,
    /// Deviation value at each angle (μm).
    pub values: Vec<f64>,
}

impl ClosedCurve {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// True if the curve holds no points.
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

/// Builds the 0–360° curve of one side and direction.
#[derive(Debug, Clone, Copy)]
pub struct CurveAssembler<'a> {
    mapper: AngleMapper<'a>,
}

impl<'a> CurveAssembler<'a> {
    /// Create an assembler for the given gear.
    pub fn new(geometry: &'a GearGeometry) -> Self {
        Self {
            mapper: AngleMapper::new(geometry),
        }
    }

    /// The angle mapper used for placement.
    pub fn mapper(&self) -> &AngleMapper<'a> {
        &self.mapper
    }

    /// Slice one tooth trace to its evaluation range and straighten it.
    ///
    /// Returns `None` when the raw trace or the evaluated slice has fewer than
    /// three samples; such teeth do not contribute to the curve.
    pub fn process_tooth(
        &self,
        trace: &[f64],
        range: &EvaluationRange,
        direction: Direction,
    ) -> Option<ToothSegment> {
        if trace.len() < MIN_TREND_SAMPLES {
            return None;
        }

        let (eval_start, eval_end, meas_start, meas_end) = match direction {
            Direction::Profile => (
                self.mapper.roll_length(range.eval_start),
                self.mapper.roll_length(range.eval_end),
                self.mapper.roll_length(range.meas_start),
                self.mapper.roll_length(range.meas_end),
            ),
            Direction::Helix => (
                range.eval_start,
                range.eval_end,
                range.meas_start,
                range.meas_end,
            ),
        };

        let (start, end) = slice_bounds(trace.len(), eval_start, eval_end, meas_start, meas_end);
        if end < start || end - start < MIN_TREND_SAMPLES {
            return None;
        }

        let values = straighten(&trace[start..end]);
        let positions = linspace(eval_start, eval_end, values.len());
        Some(ToothSegment { values, positions })
    }

    /// Merge all teeth of one side and direction into a closed curve.
    ///
    /// Teeth are processed in the given order. Angles are wrapped into
    /// `[0, 360)`, sorted (stable), and points whose angles agree to three
    /// decimals keep only the first occurrence. Returns `None` if no tooth
    /// contributed data.
    pub fn build_closed_curve(
        &self,
        traces: &[ToothTrace],
        direction: Direction,
        side: Side,
        range: &EvaluationRange,
    ) -> Option<ClosedCurve> {
        let mut points: Vec<(f64, f64)> = Vec::new();

        for trace in traces {
            let Some(tooth_index) = trace.tooth.index() else {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    side = %side,
                    direction = %direction,
                    "skipping trace with unknown tooth id"
                );
                continue;
            };

            let Some(segment) = self.process_tooth(&trace.values, range, direction) else {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    tooth = tooth_index,
                    samples = trace.values.len(),
                    "tooth skipped: too few samples in evaluation range"
                );
                continue;
            };

            let angles = match direction {
                Direction::Profile => {
                    self.mapper
                        .synthesize_profile_angles(&segment.positions, tooth_index, side)
                }
                Direction::Helix => self.mapper.synthesize_helix_angles(
                    &segment.positions,
                    tooth_index,
                    range,
                    side,
                ),
            };

            points.extend(angles.into_iter().zip(segment.values));
        }

        if points.is_empty() {
            return None;
        }

        for point in &mut points {
            point.0 = wrap_degrees(point.0);
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut curve = ClosedCurve {
            angles: Vec::with_capacity(points.len()),
            values: Vec::with_capacity(points.len()),
        };
        let mut last_key = None;
        for (angle, value) in points {
            let key = dedup_key(angle);
            if last_key == Some(key) {
                continue;
            }
            last_key = Some(key);
            curve.angles.push(angle);
            curve.values.push(value);
        }

        Some(curve)
    }
}

/// Proportional slice indices of the evaluated span within the measured span.
fn slice_bounds(
    n: usize,
    eval_start: f64,
    eval_end: f64,
    meas_start: f64,
    meas_end: f64,
) -> (usize, usize) {
    let measured = meas_end - meas_start;
    if measured > 0.0 && eval_end > eval_start {
        let start_ratio = ((eval_start - meas_start) / measured).clamp(0.0, 1.0);
        let end_ratio = ((eval_end - meas_start) / measured).clamp(0.0, 1.0);
        (
            (n as f64 * start_ratio) as usize,
            (n as f64 * end_ratio) as usize,
        )
    } else {
        (0, n)
    }
}

/// Wrap an angle into `[0, 360)`.
fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round tiny negative inputs up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Angle rounded to 1/1000°, half to even.
fn dedup_key(angle: f64) -> i64 {
    (angle * DEDUP_RESOLUTION).round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flank::ToothId;

    fn spur() -> GearGeometry {
        GearGeometry::new(25, 2.0, 20.0, 0.0, None).unwrap()
    }

    #[test]
    fn slice_bounds_proportional() {
        assert_eq!(slice_bounds(100, 2.0, 8.0, 0.0, 10.0), (20, 80));
        assert_eq!(slice_bounds(100, -5.0, 15.0, 0.0, 10.0), (0, 100));
    }

    #[test]
    fn slice_bounds_degenerate_uses_whole_trace() {
        assert_eq!(slice_bounds(50, 2.0, 8.0, 5.0, 5.0), (0, 50));
        assert_eq!(slice_bounds(50, 8.0, 8.0, 0.0, 10.0), (0, 50));
    }

    #[test]
    fn wrap_degrees_range() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert!((wrap_degrees(-10.0) - 350.0).abs() < 1e-12);
        assert!((wrap_degrees(725.0) - 5.0).abs() < 1e-12);
        assert!(wrap_degrees(-1e-20) < 360.0);
    }

    #[test]
    fn helix_tooth_positions_cover_eval_range() {
        let gear = spur();
        let assembler = CurveAssembler::new(&gear);
        let range = EvaluationRange::new(2.0, 18.0, 0.0, 20.0);
        let trace: Vec<f64> = (0..100).map(|i| (i as f64 * 0.3).sin()).collect();

        let segment = assembler
            .process_tooth(&trace, &range, Direction::Helix)
            .unwrap();
        assert_eq!(segment.values.len(), 80);
        assert_eq!(segment.positions[0], 2.0);
        assert_eq!(*segment.positions.last().unwrap(), 18.0);
    }

    #[test]
    fn profile_tooth_positions_are_roll_lengths() {
        let gear = spur();
        let assembler = CurveAssembler::new(&gear);
        let range = EvaluationRange::new(48.0, 52.0, 47.5, 53.0);
        let trace = vec![0.0; 120];

        let segment = assembler
            .process_tooth(&trace, &range, Direction::Profile)
            .unwrap();
        let mapper = assembler.mapper();
        assert!((segment.positions[0] - mapper.roll_length(48.0)).abs() < 1e-12);
        assert!(
            (segment.positions.last().unwrap() - mapper.roll_length(52.0)).abs() < 1e-12
        );
        assert!(segment.values.len() < 120);
    }

    #[test]
    fn short_slice_skips_tooth() {
        let gear = spur();
        let assembler = CurveAssembler::new(&gear);
        // Evaluation covers 2% of a 50-sample trace → one sample.
        let range = EvaluationRange::new(4.0, 4.2, 0.0, 10.0);
        let trace = vec![1.0; 50];
        assert!(assembler.process_tooth(&trace, &range, Direction::Helix).is_none());
    }

    #[test]
    fn unknown_teeth_are_left_out() {
        let gear = spur();
        let assembler = CurveAssembler::new(&gear);
        let range = EvaluationRange::new(0.0, 10.0, 0.0, 10.0);
        let traces = vec![ToothTrace::new("x1", vec![1.0, 2.0, 0.5, 3.0])];
        assert!(
            assembler
                .build_closed_curve(&traces, Direction::Helix, Side::Left, &range)
                .is_none()
        );
    }

    #[test]
    fn duplicate_angles_keep_first_occurrence() {
        let gear = spur();
        let assembler = CurveAssembler::new(&gear);
        let range = EvaluationRange::new(0.0, 10.0, 0.0, 10.0);
        // Spur gear: every helix sample of a tooth maps to its pitch slot.
        let first = vec![1.0, -2.0, 3.0, 0.0, 4.0];
        let second = vec![9.0, 9.0, 9.0, 9.0, 9.0];
        let expected = straighten(&first)[0];
        let traces = vec![
            ToothTrace::new(ToothId::Index(2), first),
            ToothTrace::new(ToothId::Index(2), second),
        ];

        let curve = assembler
            .build_closed_curve(&traces, Direction::Helix, Side::Right, &range)
            .unwrap();
        assert_eq!(curve.len(), 1);
        assert!((curve.angles[0] - 2.0 * gear.pitch_angle()).abs() < 1e-12);
        assert_eq!(curve.values[0], expected);
    }
}
