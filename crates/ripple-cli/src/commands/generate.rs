//! Synthetic measurement job generation.

use clap::Args;
use ripple_config::{GearSection, SyntheticGear};
use std::path::PathBuf;

/// Write a synthetic job with a known ripple order.
#[derive(Args)]
pub struct GenerateArgs {
    /// Output job file (.toml or .json)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Number of teeth
    #[arg(long, default_value = "25")]
    pub teeth: u32,

    /// Normal module in mm
    #[arg(long, default_value = "2.0")]
    pub module: f64,

    /// Normal pressure angle in degrees
    #[arg(long, default_value = "20.0")]
    pub pressure_angle: f64,

    /// Helix angle in degrees
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    pub helix_angle: f64,

    /// Ripple order (defaults to three times the tooth count)
    #[arg(long)]
    pub order: Option<u32>,

    /// Ripple amplitude in μm
    #[arg(long, default_value = "2.0")]
    pub amplitude: f64,

    /// Crown height in μm
    #[arg(long, default_value = "4.0")]
    pub crown: f64,

    /// Samples per trace
    #[arg(long, default_value = "200")]
    pub points: usize,
}

/// Run the generate command.
pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let synthetic = SyntheticGear {
        gear: GearSection {
            pressure_angle: args.pressure_angle,
            helix_angle: args.helix_angle,
            ..GearSection::new(args.teeth, args.module)
        },
        order: args.order.unwrap_or(3 * args.teeth),
        amplitude: args.amplitude,
        crown: args.crown,
        points: args.points,
    };

    tracing::debug!(
        teeth = args.teeth,
        order = synthetic.order,
        points = args.points,
        "building synthetic job"
    );

    let job = synthetic.build()?;
    job.save(&args.output)?;

    println!(
        "Wrote synthetic job (Z={}, order {}, {} μm) to {}",
        args.teeth,
        synthetic.order,
        args.amplitude,
        args.output.display()
    );

    Ok(())
}
