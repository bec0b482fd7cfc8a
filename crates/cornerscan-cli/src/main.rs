// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cornerscan — command-line document corner finder.
//
// Entry point. Initialises logging, parses arguments, runs the scanner and
// writes the JSON report and optional overlay image.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use cornerscan_core::ScanConfig;
use cornerscan_core::error::Result;
use cornerscan_core::human_errors::humanize_error;
use cornerscan_document::{DocumentScanner, ImageProcessor, render_overlay};
use image::DynamicImage;

#[derive(Parser)]
#[command(name = "cornerscan")]
#[command(about = "Locate the four corners of a photographed document")]
#[command(version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the document corners in an image.
    Scan(ScanArgs),

    /// Print the default configuration as JSON.
    DefaultConfig,
}

#[derive(Debug, Clone, Args)]
struct ScanArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to write the scan report (JSON). Printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Path to write a diagnostic overlay (PNG).
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Configuration file (JSON); missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Candidates kept per corner role.
    #[arg(long)]
    point_limit: Option<usize>,

    /// Probe radii tried around each edge midpoint.
    #[arg(long)]
    max_distance: Option<u32>,

    /// Edge luma threshold, percent of white (0-100).
    #[arg(long)]
    threshold: Option<u8>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Scan(args) => run_scan(&args),
        Commands::DefaultConfig => ScanConfig::default()
            .to_json_pretty()
            .map(|json| println!("{json}")),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "cornerscan failed");
            let human = humanize_error(&err);
            eprintln!("{}\n{}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run_scan(args: &ScanArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ScanConfig::from_json_file(path)?,
        None => ScanConfig::default(),
    };
    apply_overrides(&mut config, args);

    let scanner = DocumentScanner::new(config)?;
    let photo = ImageProcessor::open(&args.image)?;
    let report = scanner.scan_image(photo.as_dynamic())?;

    let [tl, tr, br, bl] = report.accepted.corners();
    eprintln!(
        "{:?}: {tl} {tr} {br} {bl} area={:.0} after {} attempt(s)",
        report.outcome,
        report.area,
        report.trace.len()
    );

    let json = serde_json::to_string_pretty(&report)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }

    if let Some(path) = &args.overlay {
        let overlay = render_overlay(&photo.to_rgba_image(), &report);
        ImageProcessor::from_dynamic(DynamicImage::ImageRgba8(overlay)).save(path)?;
        tracing::info!(path = %path.display(), "Overlay written");
    }
    Ok(())
}

/// Command-line flags take precedence over the configuration file.
fn apply_overrides(config: &mut ScanConfig, args: &ScanArgs) {
    if let Some(limit) = args.point_limit {
        config.search.point_limit_per_corner = limit;
    }
    if let Some(distance) = args.max_distance {
        config.search.max_distance = distance;
    }
    if let Some(threshold) = args.threshold {
        config.search.threshold_percent = threshold;
    }
}
