//! Ripple analysis command.

use clap::Args;
use ripple_config::{GearSection, MeasurementJob};
use ripple_core::{
    AnalysisConfig, AnalysisKey, RippleAnalysisResult, RippleAnalyzer, RippleTolerance,
    ToleranceCheck,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::common::{load_job, print_geometry};

/// Analyze a measurement job.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Measurement job file (.toml or .json)
    #[arg(value_name = "JOB")]
    pub job: PathBuf,

    /// Number of sinusoids to extract (overrides the job)
    #[arg(short = 'n', long)]
    pub components: Option<usize>,

    /// Amplitude scale for high-order scoring (overrides the job)
    #[arg(long)]
    pub scale: Option<f64>,

    /// Write full results as JSON
    #[arg(long, value_name = "OUT")]
    pub json: Option<PathBuf>,

    /// Check components against the job's tolerance curve
    #[arg(long)]
    pub tolerance: bool,

    /// Fit the tolerance curve to each measured spectrum instead
    #[arg(long, requires = "tolerance")]
    pub auto_tolerance: bool,
}

/// JSON export layout.
#[derive(Serialize)]
struct Report<'a> {
    name: Option<&'a str>,
    gear: &'a GearSection,
    analysis: AnalysisConfig,
    results: BTreeMap<String, &'a RippleAnalysisResult>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    tolerance: BTreeMap<String, ToleranceReport>,
}

#[derive(Serialize)]
struct ToleranceReport {
    curve: RippleTolerance,
    checks: Vec<ToleranceCheck>,
}

/// Run the analyze command.
pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let job = load_job(&args.job)?;
    let config = effective_config(&job, &args);

    let geometry = job.geometry()?;
    let analyzer = RippleAnalyzer::new(geometry, config)?;

    println!("Analyzing {}...", args.job.display());
    if let Some(name) = &job.name {
        println!("  {name}");
    }
    println!();
    print_geometry(analyzer.geometry());
    println!();

    let results = analyzer.analyze_all_directions(
        &job.profile_traces(),
        &job.helix_traces(),
        &job.profile_range(),
        &job.helix_range(),
    )?;

    if results.is_empty() {
        anyhow::bail!(
            "No side/direction of '{}' has enough data for analysis.",
            args.job.display()
        );
    }

    let mut tolerance_reports = BTreeMap::new();
    for (key, result) in &results {
        print_result(*key, result, analyzer.geometry().teeth());

        if args.tolerance {
            let curve = if args.auto_tolerance {
                RippleTolerance::auto_fit(&result.spectrum.components, analyzer.geometry().teeth())
                    .unwrap_or(job.tolerance)
            } else {
                job.tolerance
            };
            let checks = curve.check(&result.spectrum.components);
            print_tolerance(&curve, &checks);
            tolerance_reports.insert(key.to_string(), ToleranceReport { curve, checks });
        }
        println!();
    }

    if let Some(path) = &args.json {
        let report = Report {
            name: job.name.as_deref(),
            gear: &job.gear,
            analysis: config,
            results: results.iter().map(|(k, r)| (k.to_string(), r)).collect(),
            tolerance: tolerance_reports,
        };
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)?;
        println!("Results written to {}", path.display());
    }

    Ok(())
}

fn effective_config(job: &MeasurementJob, args: &AnalyzeArgs) -> AnalysisConfig {
    let mut config = job.analysis;
    if let Some(components) = args.components {
        config = config.with_component_count(components);
    }
    if let Some(scale) = args.scale {
        config = config.with_amplitude_scale(scale);
    }
    config
}

fn print_result(key: AnalysisKey, result: &RippleAnalysisResult, teeth: u32) {
    println!(
        "{key}: {} curve points, {}-point grid",
        result.curve.len(),
        result.resampled.len()
    );
    println!("  {:>3}  {:>6}  {:>12}  {:>10}", "#", "Order", "Amplitude", "Phase");
    println!("  {:-<3}  {:-<6}  {:-<12}  {:-<10}", "", "", "", "");

    for (i, c) in result.spectrum.components.iter().enumerate() {
        let marker = if c.order >= teeth { "★" } else { " " };
        println!(
            "  {:>3}  {:>5}{marker}  {:>12.5}  {:>9.2}°",
            i + 1,
            c.order,
            c.amplitude,
            c.phase_deg()
        );
    }

    let high = &result.high_order;
    if high.is_empty() {
        println!("  High order (≥ {teeth}): none");
    } else {
        let list: Vec<String> = high
            .orders
            .iter()
            .zip(&high.amplitudes)
            .map(|(o, a)| format!("{o} ({a:.5})"))
            .collect();
        println!("  High order (≥ {teeth}): {}", list.join(", "));
    }
    println!(
        "  W = {:.5} μm   RMS = {:.5} μm   residual RMS = {:.5} μm",
        high.total_amplitude,
        high.rms,
        result.spectrum.residual_rms()
    );
}

fn print_tolerance(curve: &RippleTolerance, checks: &[ToleranceCheck]) {
    let exceeded: Vec<&ToleranceCheck> = checks.iter().filter(|c| c.exceeded).collect();
    println!(
        "  Tolerance R={:.4} N0={:.2} K={:.2}: {} of {} exceeded",
        curve.r,
        curve.n0,
        curve.k,
        exceeded.len(),
        checks.len()
    );
    for check in exceeded {
        println!(
            "    order {:>4}: {:.5} > {:.5}  EXCEEDED",
            check.order, check.amplitude, check.limit
        );
    }
}
