//! Gear geometry derived from the basic tooth parameters.
//!
//! All angle and roll-length conversions reference the base circle, so the
//! base diameter is either taken from the measurement header or derived from
//! the transverse pressure angle:
//!
//! ```text
//! d₀  = m · Z
//! α_t = atan(tan αₙ / cos β)
//! d_b = d₀ · cos α_t
//! τ₀  = 360° / Z
//! ```

use crate::error::{Result, RippleError};

/// Helix angles below this (radians) are treated as a spur gear.
const SPUR_HELIX_EPSILON: f64 = 1e-6;

/// Immutable gear geometry.
///
/// # Example
///
/// ```rust
/// use ripple_core::GearGeometry;
///
/// let gear = GearGeometry::new(25, 2.0, 20.0, 0.0, None).unwrap();
/// assert_eq!(gear.pitch_diameter(), 50.0);
/// assert!((gear.pitch_angle() - 14.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GearGeometry {
    teeth: u32,
    module: f64,
    pressure_angle: f64,
    helix_angle: f64,
    base_diameter: f64,
    pitch_diameter: f64,
    pitch_angle: f64,
}

impl GearGeometry {
    /// Build the geometry from teeth count, normal module (mm), normal
    /// pressure angle (degrees) and helix angle (degrees).
    ///
    /// `base_diameter` overrides the derived base diameter when it is given
    /// and positive; the measurement header usually carries the exact value.
    pub fn new(
        teeth: u32,
        module: f64,
        pressure_angle: f64,
        helix_angle: f64,
        base_diameter: Option<f64>,
    ) -> Result<Self> {
        if teeth == 0 {
            return Err(RippleError::InvalidGeometry(
                "teeth count must be positive".to_string(),
            ));
        }
        if !module.is_finite() || module <= 0.0 {
            return Err(RippleError::InvalidGeometry(format!(
                "module must be positive, got {module}"
            )));
        }

        let pitch_diameter = module * f64::from(teeth);
        let base_diameter = match base_diameter {
            Some(db) if db > 0.0 => db,
            _ => pitch_diameter * transverse_pressure_angle(pressure_angle, helix_angle).cos(),
        };

        Ok(Self {
            teeth,
            module,
            pressure_angle,
            helix_angle,
            base_diameter,
            pitch_diameter,
            pitch_angle: 360.0 / f64::from(teeth),
        })
    }

    /// Number of teeth Z.
    pub fn teeth(&self) -> u32 {
        self.teeth
    }

    /// Normal module in mm.
    pub fn module(&self) -> f64 {
        self.module
    }

    /// Normal pressure angle αₙ in degrees.
    pub fn pressure_angle(&self) -> f64 {
        self.pressure_angle
    }

    /// Helix angle β in degrees (sign gives the hand).
    pub fn helix_angle(&self) -> f64 {
        self.helix_angle
    }

    /// Transverse pressure angle α_t in degrees.
    pub fn transverse_pressure_angle(&self) -> f64 {
        transverse_pressure_angle(self.pressure_angle, self.helix_angle).to_degrees()
    }

    /// Base diameter d_b in mm.
    pub fn base_diameter(&self) -> f64 {
        self.base_diameter
    }

    /// Base radius r_b in mm.
    pub fn base_radius(&self) -> f64 {
        self.base_diameter / 2.0
    }

    /// Pitch diameter d₀ = m·Z in mm.
    pub fn pitch_diameter(&self) -> f64 {
        self.pitch_diameter
    }

    /// Pitch radius in mm.
    pub fn pitch_radius(&self) -> f64 {
        self.pitch_diameter / 2.0
    }

    /// Angular tooth spacing τ₀ = 360°/Z.
    pub fn pitch_angle(&self) -> f64 {
        self.pitch_angle
    }

    /// Base circle circumference π·d_b in mm.
    pub fn base_circumference(&self) -> f64 {
        std::f64::consts::PI * self.base_diameter
    }
}

/// Transverse pressure angle in radians.
fn transverse_pressure_angle(pressure_angle: f64, helix_angle: f64) -> f64 {
    let alpha_n = pressure_angle.to_radians();
    let beta = helix_angle.to_radians();
    if beta.abs() > SPUR_HELIX_EPSILON {
        (alpha_n.tan() / beta.cos()).atan()
    } else {
        alpha_n
    }
}
