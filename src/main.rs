//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `whois_recon` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Reading labels from arguments or stdin
//! - Printing emitted nodes as JSON lines
//!
//! All core functionality is implemented in the library crate.

use std::io::BufRead;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use whois_recon::initialization::{init_logger_with, init_transform};
use whois_recon::{run_enrichment, EnrichmentStats, Opt, WhoisOptions, WhoisReportTransform};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    if opt.info {
        println!(
            "{}",
            serde_json::to_string_pretty(&WhoisReportTransform::INFO)
                .context("Failed to serialize transform info")?
        );
        return Ok(());
    }

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let options = WhoisOptions::from(&opt);
    options.validate().context("Invalid options")?;

    let labels = read_labels(&opt.labels).context("Failed to read labels")?;
    if labels.is_empty() {
        eprintln!("whois_recon error: no labels given");
        process::exit(2);
    }

    let stats = Arc::new(EnrichmentStats::new());
    let transform =
        init_transform(Arc::clone(&stats)).context("Failed to initialize whois client")?;
    let report = run_enrichment(&transform, labels, &options, opt.concurrency).await;

    for node in &report.nodes {
        println!(
            "{}",
            serde_json::to_string(node).context("Failed to serialize node")?
        );
    }
    stats.log_summary();

    if report.failed > 0 {
        eprintln!(
            "whois_recon error: {} of {} lookup(s) failed",
            report.failed, report.total_labels
        );
        process::exit(1);
    }
    Ok(())
}

/// Collects labels from the arguments, expanding `-` into stdin lines.
fn read_labels(args: &[String]) -> Result<Vec<String>> {
    let mut labels = Vec::new();
    for arg in args {
        if arg == "-" {
            for line in std::io::stdin().lock().lines() {
                let line = line.context("Failed to read stdin")?;
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    labels.push(trimmed.to_string());
                }
            }
        } else {
            let trimmed = arg.trim();
            if !trimmed.is_empty() {
                labels.push(trimmed.to_string());
            }
        }
    }
    Ok(labels)
}
