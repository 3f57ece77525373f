use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use balance_report_core::config::Config;
use balance_report_core::BalanceReporter;

/// Aggregate exchange and wallet holdings into one BTC-valued pie chart.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to the JSON configuration file (credentials, wallet, overrides).
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(fmt::layer())
        .init();

    let args = Args::parse();

    match generate_report(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("report failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn generate_report(args: &Args) -> Result<()> {
    let config = Config::load(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    let reporter = BalanceReporter::new(config)?;
    let (report, path) = reporter.run().await?;

    println!("{}", report.title());
    for (label, value) in report.labels.iter().zip(&report.values) {
        println!("  {label:>6}  {value}");
    }
    if !report.skipped.is_empty() {
        println!("Skipped (no BTC price resolvable): {}", report.skipped.join(", "));
    }
    println!("Chart written to {}", path.display());

    Ok(())
}
