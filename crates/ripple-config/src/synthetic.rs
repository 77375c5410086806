//! Synthetic measurement jobs.
//!
//! Every tooth trace is sampled from one gear-fixed ripple
//! `amplitude · sin(order · φ)` at the gear angle φ its samples map to, with a
//! parabolic crown added on top. Analysing such a job should recover `order`
//! as the dominant component once the crown is straightened out.

use ripple_core::math::linspace;
use ripple_core::{AngleMapper, EvaluationRange, GearGeometry, Side};

use crate::error::ConfigError;
use crate::job::{DirectionData, GearSection, MeasurementJob};

/// Parameters of a synthetic gear measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticGear {
    /// Gear parameters.
    pub gear: GearSection,
    /// Ripple order imprinted on every flank.
    pub order: u32,
    /// Ripple amplitude (μm).
    pub amplitude: f64,
    /// Crown height (μm) added to every trace.
    pub crown: f64,
    /// Samples per trace.
    pub points: usize,
}

impl Default for SyntheticGear {
    fn default() -> Self {
        Self {
            gear: GearSection::new(25, 2.0),
            order: 75,
            amplitude: 2.0,
            crown: 4.0,
            points: 200,
        }
    }
}

impl SyntheticGear {
    /// Build the job: profile and helix traces for every tooth on both sides.
    ///
    /// Measured and evaluated ranges coincide so every sample maps to a known
    /// angle.
    pub fn build(&self) -> Result<MeasurementJob, ConfigError> {
        let geometry = GearGeometry::new(
            self.gear.teeth,
            self.gear.module,
            self.gear.pressure_angle,
            self.gear.helix_angle,
            self.gear.base_diameter,
        )?;
        let mapper = AngleMapper::new(&geometry);

        let profile_range = profile_range(&geometry);
        let helix_range = helix_range(&geometry);

        let rolls = linspace(
            mapper.roll_length(profile_range.eval_start),
            mapper.roll_length(profile_range.eval_end),
            self.points,
        );
        let axial = linspace(helix_range.eval_start, helix_range.eval_end, self.points);

        let mut profile = DirectionData::new(profile_range);
        let mut helix = DirectionData::new(helix_range);

        for side in Side::ALL {
            for tooth in 0..geometry.teeth() {
                let angles = mapper.synthesize_profile_angles(&rolls, tooth, side);
                profile
                    .side_mut(side)
                    .insert(tooth.to_string(), self.trace(&angles));

                let angles = mapper.synthesize_helix_angles(&axial, tooth, &helix_range, side);
                helix
                    .side_mut(side)
                    .insert(tooth.to_string(), self.trace(&angles));
            }
        }

        Ok(MeasurementJob::new(self.gear.clone())
            .with_name(format!(
                "synthetic Z={} order {} ({} μm)",
                self.gear.teeth, self.order, self.amplitude
            ))
            .with_profile(profile)
            .with_helix(helix))
    }

    fn trace(&self, angles_deg: &[f64]) -> Vec<f64> {
        let x = linspace(-1.0, 1.0, angles_deg.len());
        let order = f64::from(self.order);
        angles_deg
            .iter()
            .zip(&x)
            .map(|(a, x)| self.amplitude * (order * a.to_radians()).sin() + self.crown * x * x)
            .collect()
    }
}

/// Profile range from just outside the base circle to about one module
/// beyond the pitch circle.
fn profile_range(geometry: &GearGeometry) -> EvaluationRange {
    let start = geometry
        .base_diameter()
        .max(geometry.pitch_diameter() - 2.0 * geometry.module())
        + 0.1 * geometry.module();
    let end = geometry.pitch_diameter() + 1.6 * geometry.module();
    EvaluationRange::new(start, end, start, end)
}

/// Helix range over a face width of ten modules.
fn helix_range(geometry: &GearGeometry) -> EvaluationRange {
    let width = 10.0 * geometry.module();
    EvaluationRange::new(0.0, width, 0.0, width)
}
