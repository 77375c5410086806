//! Measurement data model: flank sides, measurement directions, tooth traces
//! and evaluation ranges.

use std::fmt;

/// Tooth flank side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Left flank.
    Left,
    /// Right flank.
    Right,
}

impl Side {
    /// Both sides, in analysis order.
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// Lowercase name used in result keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measurement direction on the tooth flank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Across the tooth face; positions are diameters.
    Profile,
    /// Along the tooth width (lead); positions are axial coordinates.
    Helix,
}

impl Direction {
    /// Lowercase name used in result keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Profile => "profile",
            Direction::Helix => "helix",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tooth identifier as delivered by the measurement-file parser.
///
/// Identifiers that are not plain decimal numbers map to [`ToothId::Unknown`];
/// such teeth cannot be placed at a pitch slot and are left out of the
/// closed curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToothId {
    /// Tooth number; multiplied by the pitch angle to place the tooth.
    Index(u32),
    /// Identifier that could not be read as a tooth number.
    Unknown,
}

impl ToothId {
    /// Parse a parser-supplied identifier. Only non-empty runs of ASCII
    /// digits that fit a `u32` are accepted.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return ToothId::Unknown;
        }
        raw.parse().map_or(ToothId::Unknown, ToothId::Index)
    }

    /// Tooth number, if known.
    pub fn index(self) -> Option<u32> {
        match self {
            ToothId::Index(i) => Some(i),
            ToothId::Unknown => None,
        }
    }
}

impl From<u32> for ToothId {
    fn from(index: u32) -> Self {
        ToothId::Index(index)
    }
}

impl From<&str> for ToothId {
    fn from(raw: &str) -> Self {
        ToothId::parse(raw)
    }
}

impl fmt::Display for ToothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToothId::Index(i) => write!(f, "{i}"),
            ToothId::Unknown => f.write_str("unknown"),
        }
    }
}

/// Raw deviation trace (μm) of one tooth for one side and direction.
#[derive(Debug, Clone, PartialEq)]
pub struct ToothTrace {
    /// Tooth the trace belongs to.
    pub tooth: ToothId,
    /// Deviation samples in measurement order.
    pub values: Vec<f64>,
}

impl ToothTrace {
    /// Create a trace.
    pub fn new(tooth: impl Into<ToothId>, values: impl Into<Vec<f64>>) -> Self {
        Self {
            tooth: tooth.into(),
            values: values.into(),
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the trace holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Per-side tooth traces of one measurement direction.
///
/// Traces keep the order the parser delivered them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlankTraces {
    /// Left flank traces.
    pub left: Vec<ToothTrace>,
    /// Right flank traces.
    pub right: Vec<ToothTrace>,
}

impl FlankTraces {
    /// Traces of one side.
    pub fn side(&self, side: Side) -> &[ToothTrace] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Mutable traces of one side.
    pub fn side_mut(&mut self, side: Side) -> &mut Vec<ToothTrace> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// True if neither side carries a trace.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

/// Evaluated and measured extent of a trace.
///
/// For profile traces all four values are diameters (mm); for helix traces
/// they are axial positions (mm). The measured range is a superset of the
/// evaluated range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationRange {
    /// Start of the scored region.
    pub eval_start: f64,
    /// End of the scored region.
    pub eval_end: f64,
    /// Start of the physically measured region.
    pub meas_start: f64,
    /// End of the physically measured region.
    pub meas_end: f64,
}

impl EvaluationRange {
    /// Create a range from evaluation and measurement limits.
    pub fn new(eval_start: f64, eval_end: f64, meas_start: f64, meas_end: f64) -> Self {
        Self {
            eval_start,
            eval_end,
            meas_start,
            meas_end,
        }
    }

    /// Midpoint of the evaluation range.
    pub fn eval_center(&self) -> f64 {
        (self.eval_start + self.eval_end) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooth_id_parses_digits() {
        assert_eq!(ToothId::parse("7"), ToothId::Index(7));
        assert_eq!(ToothId::parse("012"), ToothId::Index(12));
    }

    #[test]
    fn tooth_id_rejects_non_digits() {
        assert_eq!(ToothId::parse(""), ToothId::Unknown);
        assert_eq!(ToothId::parse("-1"), ToothId::Unknown);
        assert_eq!(ToothId::parse("3a"), ToothId::Unknown);
        assert_eq!(ToothId::parse(" 3"), ToothId::Unknown);
        assert_eq!(ToothId::parse("99999999999"), ToothId::Unknown);
    }

    #[test]
    fn keys_render_lowercase() {
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!(Direction::Helix.to_string(), "helix");
        assert_eq!(ToothId::Unknown.to_string(), "unknown");
    }

    #[test]
    fn eval_center_is_midpoint() {
        let range = EvaluationRange::new(2.0, 8.0, 0.0, 10.0);
        assert_eq!(range.eval_center(), 5.0);
    }

    #[test]
    fn flank_traces_by_side() {
        let mut traces = FlankTraces::default();
        assert!(traces.is_empty());
        traces.side_mut(Side::Right).push(ToothTrace::new(1_u32, vec![0.0; 4]));
        assert!(traces.side(Side::Left).is_empty());
        assert_eq!(traces.side(Side::Right).len(), 1);
        assert!(!traces.is_empty());
    }
}
