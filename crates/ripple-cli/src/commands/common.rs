//! Shared CLI helpers used across multiple commands.

use ripple_config::MeasurementJob;
use ripple_core::GearGeometry;
use std::path::Path;

/// Load a job file, naming the path in the error.
pub fn load_job(path: &Path) -> anyhow::Result<MeasurementJob> {
    MeasurementJob::load(path).map_err(|e| anyhow::anyhow!("{}", e))
}

/// Print the gear parameters and derived diameters.
pub fn print_geometry(gear: &GearGeometry) {
    println!("Gear:");
    println!("  Teeth:             {}", gear.teeth());
    println!("  Module:            {:.4} mm", gear.module());
    println!("  Pressure angle:    {:.3}°", gear.pressure_angle());
    println!("  Helix angle:       {:.3}°", gear.helix_angle());
    println!("  Transverse α:      {:.3}°", gear.transverse_pressure_angle());
    println!("  Pitch diameter:    {:.4} mm", gear.pitch_diameter());
    println!("  Base diameter:     {:.4} mm", gear.base_diameter());
    println!("  Pitch angle:       {:.4}°", gear.pitch_angle());
}
