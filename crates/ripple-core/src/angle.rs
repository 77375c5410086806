//! Measurement position → gear rotation angle.
//!
//! Every sample of every tooth is placed on one gear-fixed angular axis so the
//! traces of all teeth join into a single 0–360° curve.
//!
//! # Profile
//!
//! A point at diameter `d` on the involute lies at roll length
//! `s(d) = √((d/2)² − r_b²)` along the base circle, which corresponds to a
//! rotation of `ξ = s / (π·d_b) · 360°`. Each tooth's roll angles are centred
//! on their mean before the tooth is placed at its pitch slot `τ = i·τ₀`:
//!
//! ```text
//! φ = τ − ξ   (left flank)
//! φ = τ + ξ   (right flank)
//! ```
//!
//! # Helix
//!
//! On a helical gear an axial offset `Δz` from the evaluation centre turns the
//! contact point by `Δφ = 2·Δz·tan|β| / d₀`; the sign convention matches the
//! profile case. Axial positions already have a natural centre, so no mean
//! re-centring is applied.

use crate::flank::{EvaluationRange, Side};
use crate::geometry::GearGeometry;

/// Helix angles below this (degrees) are treated as a spur gear.
const SPUR_HELIX_DEG: f64 = 0.01;

/// Converts measurement positions into gear rotation angles.
#[derive(Debug, Clone, Copy)]
pub struct AngleMapper<'a> {
    geometry: &'a GearGeometry,
}

impl<'a> AngleMapper<'a> {
    /// Create a mapper for the given gear.
    pub fn new(geometry: &'a GearGeometry) -> Self {
        Self { geometry }
    }

    /// Involute polar angle `inv α = tan α − α` (radians) at radius `radius`,
    /// with `α = acos(r_b / r)`. Zero on or inside the base circle.
    pub fn involute_polar_angle(&self, radius: f64) -> f64 {
        let rb = self.geometry.base_radius();
        if rb <= 0.0 || radius <= rb {
            return 0.0;
        }
        let alpha = (rb / radius).acos();
        alpha.tan() - alpha
    }

    /// Roll length `s(d)` in mm for diameter `diameter`. Zero on or inside the
    /// base circle.
    pub fn roll_length(&self, diameter: f64) -> f64 {
        let radius = diameter / 2.0;
        let rb = self.geometry.base_radius();
        if radius <= rb {
            return 0.0;
        }
        (radius * radius - rb * rb).max(0.0).sqrt()
    }

    /// Rotation angle (degrees) corresponding to the roll length at
    /// `diameter`.
    pub fn roll_angle_deg(&self, diameter: f64) -> f64 {
        let circumference = self.geometry.base_circumference();
        if circumference <= 0.0 || diameter / 2.0 <= self.geometry.base_radius() {
            return 0.0;
        }
        self.roll_length(diameter) / circumference * 360.0
    }

    /// Rotation (degrees) caused by an axial offset from `center`. Zero for
    /// spur gears.
    pub fn axial_rotation_deg(&self, axial_position: f64, center: f64) -> f64 {
        let beta = self.geometry.helix_angle().abs();
        let d0 = self.geometry.pitch_diameter();
        if beta < SPUR_HELIX_DEG || d0 <= 0.0 {
            return 0.0;
        }
        let delta_z = axial_position - center;
        (2.0 * delta_z * beta.to_radians().tan() / d0).to_degrees()
    }

    /// Pitch slot `τ = i·τ₀` of a tooth, in degrees.
    pub fn pitch_slot(&self, tooth_index: u32) -> f64 {
        f64::from(tooth_index) * self.geometry.pitch_angle()
    }

    /// Gear angles (degrees) for profile samples given as roll lengths (mm).
    ///
    /// Roll angles are re-centred on their mean. A degenerate base circle
    /// contributes no roll angle and every sample lands on the pitch slot.
    pub fn synthesize_profile_angles(
        &self,
        roll_lengths: &[f64],
        tooth_index: u32,
        side: Side,
    ) -> Vec<f64> {
        let tau = self.pitch_slot(tooth_index);
        let circumference = self.geometry.base_circumference();
        if circumference <= 0.0 {
            return vec![tau; roll_lengths.len()];
        }

        let roll: Vec<f64> = roll_lengths
            .iter()
            .map(|s| s / circumference * 360.0)
            .collect();
        let centre = crate::math::mean(&roll);

        roll.iter()
            .map(|xi| place(tau, xi - centre, side))
            .collect()
    }

    /// Gear angles (degrees) for helix samples given as axial positions (mm).
    pub fn synthesize_helix_angles(
        &self,
        axial_positions: &[f64],
        tooth_index: u32,
        range: &EvaluationRange,
        side: Side,
    ) -> Vec<f64> {
        let tau = self.pitch_slot(tooth_index);
        let centre = range.eval_center();

        axial_positions
            .iter()
            .map(|&z| place(tau, self.axial_rotation_deg(z, centre), side))
            .collect()
    }
}

#[inline]
fn place(tau: f64, offset: f64, side: Side) -> f64 {
    match side {
        Side::Left => tau - offset,
        Side::Right => tau + offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spur() -> GearGeometry {
        GearGeometry::new(25, 2.0, 20.0, 0.0, None).unwrap()
    }

    #[test]
    fn involute_polar_angle_zero_inside_base_circle() {
        let gear = spur();
        let mapper = AngleMapper::new(&gear);
        assert_eq!(mapper.involute_polar_angle(gear.base_radius()), 0.0);
        assert_eq!(mapper.involute_polar_angle(1.0), 0.0);
    }

    #[test]
    fn involute_polar_angle_at_pitch_circle() {
        let gear = spur();
        let mapper = AngleMapper::new(&gear);
        // At the pitch circle α equals the pressure angle.
        let alpha = 20.0_f64.to_radians();
        let expected = alpha.tan() - alpha;
        assert!((mapper.involute_polar_angle(gear.pitch_radius()) - expected).abs() < 1e-12);
    }

    #[test]
    fn roll_length_matches_pythagoras() {
        let gear = spur();
        let mapper = AngleMapper::new(&gear);
        let rb = gear.base_radius();
        let s = mapper.roll_length(50.0);
        assert!((s - (25.0_f64.powi(2) - rb * rb).sqrt()).abs() < 1e-12);
        assert_eq!(mapper.roll_length(gear.base_diameter() * 0.9), 0.0);
    }

    #[test]
    fn roll_angle_is_fraction_of_base_circumference() {
        let gear = spur();
        let mapper = AngleMapper::new(&gear);
        let s = mapper.roll_length(52.0);
        let expected = s / (std::f64::consts::PI * gear.base_diameter()) * 360.0;
        assert!((mapper.roll_angle_deg(52.0) - expected).abs() < 1e-12);
        assert_eq!(mapper.roll_angle_deg(10.0), 0.0);
    }

    #[test]
    fn axial_rotation_zero_for_spur() {
        let gear = spur();
        let mapper = AngleMapper::new(&gear);
        assert_eq!(mapper.axial_rotation_deg(10.0, 0.0), 0.0);
    }

    #[test]
    fn axial_rotation_for_helical() {
        let gear = GearGeometry::new(40, 2.0, 20.0, -18.0, None).unwrap();
        let mapper = AngleMapper::new(&gear);
        let expected = (2.0 * 5.0 * 18.0_f64.to_radians().tan() / 80.0).to_degrees();
        assert!((mapper.axial_rotation_deg(15.0, 10.0) - expected).abs() < 1e-12);
        assert!((mapper.axial_rotation_deg(5.0, 10.0) + expected).abs() < 1e-12);
    }

    #[test]
    fn profile_angles_centred_on_pitch_slot() {
        let gear = spur();
        let mapper = AngleMapper::new(&gear);
        let rolls = [4.0, 5.0, 6.0, 7.0, 8.0];
        let left = mapper.synthesize_profile_angles(&rolls, 3, Side::Left);
        let right = mapper.synthesize_profile_angles(&rolls, 3, Side::Right);
        let tau = 3.0 * gear.pitch_angle();

        assert!((crate::math::mean(&left) - tau).abs() < 1e-12);
        assert!((left[2] - tau).abs() < 1e-12);
        // Left runs backwards, right forwards.
        assert!(left[0] > left[4]);
        assert!(right[0] < right[4]);
        assert!((left[0] - tau + (right[0] - tau)).abs() < 1e-12);
    }

    #[test]
    fn helix_angles_not_recentred() {
        let gear = GearGeometry::new(40, 2.0, 20.0, 18.0, None).unwrap();
        let mapper = AngleMapper::new(&gear);
        let range = EvaluationRange::new(0.0, 20.0, 0.0, 20.0);
        let z = [12.0, 16.0, 20.0];
        let angles = mapper.synthesize_helix_angles(&z, 0, &range, Side::Right);
        assert!(angles.iter().all(|&a| a > 0.0));
        assert!((angles[0] - mapper.axial_rotation_deg(12.0, 10.0)).abs() < 1e-12);
    }
}
