//! Display measurement job contents.

use clap::Args;
use ripple_config::DirectionData;
use std::path::PathBuf;

use super::common::{load_job, print_geometry};

/// Display measurement job information.
#[derive(Args)]
pub struct InfoArgs {
    /// Measurement job file (.toml or .json)
    #[arg(value_name = "JOB")]
    pub job: PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let job = load_job(&args.job)?;
    let geometry = job.geometry()?;

    println!("Job:         {}", args.job.display());
    if let Some(name) = &job.name {
        println!("Name:        {name}");
    }
    println!();
    print_geometry(&geometry);
    println!();

    let analysis = &job.analysis;
    println!("Analysis:");
    println!("  Components:        {}", analysis.component_count);
    println!("  Amplitude scale:   {}", analysis.amplitude_scale);
    println!(
        "  Max order:         {} ({}·Z)",
        analysis.max_order(geometry.teeth()),
        analysis.max_order_factor
    );
    println!("  Min curve points:  {}", analysis.min_curve_points);
    println!(
        "  Tolerance:         R={} N0={} K={}",
        job.tolerance.r, job.tolerance.n0, job.tolerance.k
    );
    println!();

    print_direction("Profile", job.profile.as_ref());
    print_direction("Helix", job.helix.as_ref());

    let unknown = job.unknown_teeth();
    if !unknown.is_empty() {
        println!();
        println!(
            "Warning: {} trace(s) with non-numeric tooth keys will be skipped: {}",
            unknown.len(),
            unknown.join(", ")
        );
    }

    Ok(())
}

fn print_direction(label: &str, data: Option<&DirectionData>) {
    let Some(data) = data else {
        println!("{label}: no traces");
        return;
    };

    let r = &data.range;
    println!(
        "{label}: {} traces (left {}, right {})",
        data.trace_count(),
        data.left.len(),
        data.right.len()
    );
    println!(
        "  Evaluation {:.3} – {:.3} mm, measured {:.3} – {:.3} mm",
        r.eval_start, r.eval_end, r.meas_start, r.meas_end
    );

    let lengths = data.left.values().chain(data.right.values()).map(Vec::len);
    if let (Some(min), Some(max)) = (lengths.clone().min(), lengths.max()) {
        println!("  Samples per trace: {min} – {max}");
    }
}
