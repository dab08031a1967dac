//! BuildCheck - PC build compatibility checker
//!
//! Command-line entry point.
//!
//! # Overview
//!
//! Reads one or more build files (YAML sequences of components), checks each
//! build and, unless `--check-only` is given, runs the auto-regeneration loop
//! against the component catalog. Each verdict is printed to stdout as a YAML
//! document.
//!
//! # Execution Flow
//!
//! 1. Load regeneration settings from `BuildCheck Data/` and `BUILDCHECK_*`
//! 2. Initialize logging → logs/buildcheck.<date>
//! 3. Load the component catalog (built-in when the file is missing)
//! 4. Check or regenerate every build, printing each verdict
//! 5. Log a metrics summary
//!
//! The process exits non-zero when any build is left incompatible.

use anyhow::{Context, Result};
use buildcheck::config::load_build;
use buildcheck::metrics::Metrics;
use buildcheck::services::picker_for;
use buildcheck::{APP_NAME, CompatibilityChecker, ConfigManager, RegenerationService, VERSION};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "buildcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Check PC builds for compatibility and repair them from a component catalog",
    long_about = None
)]
struct Cli {
    /// Build files to check (YAML lists of components)
    #[arg(required = true)]
    builds: Vec<Utf8PathBuf>,

    /// Directory holding the component catalog and settings
    #[arg(long, default_value = "BuildCheck Data", env = "BUILDCHECK_DATA_DIR")]
    data_dir: Utf8PathBuf,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    log_dir: Utf8PathBuf,

    /// Only check builds, never substitute components
    #[arg(long)]
    check_only: bool,

    /// Seed for random replacement picks (overrides settings)
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Also log to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.data_dir)?;
    let mut settings = config_manager.load_settings()?;
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    let _guard = buildcheck::logging::setup_logging(
        &cli.log_dir,
        APP_NAME,
        cli.debug || settings.debug_mode,
        cli.verbose,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::info!(
        "Settings - max_attempts: {}, strategy: {:?}, seed: {:?}",
        settings.max_attempts,
        settings.strategy,
        settings.seed
    );

    let metrics = Metrics::new();
    let mut all_compatible = true;

    if cli.check_only {
        let checker = CompatibilityChecker::new();
        for path in &cli.builds {
            let build = load_build(path)?;
            let result = checker.check(&build);
            metrics.record_check(&result);
            all_compatible &= result.is_compatible;

            tracing::info!("{}: compatible={}", path, result.is_compatible);
            print_document(path, &result)?;
        }
    } else {
        let catalog = config_manager.load_catalog()?;
        let service = RegenerationService::from_settings(catalog, &settings);
        let mut picker = picker_for(&settings);

        for path in &cli.builds {
            let build = load_build(path)?;
            let result = service.regenerate(&build, picker.as_mut());
            metrics.record_regeneration(&result);
            all_compatible &= result.is_fully_compatible;

            tracing::info!(
                "{}: compatible={} after {} attempts, replaced {:?}",
                path,
                result.is_fully_compatible,
                result.regeneration_attempts,
                result.regenerated_components
            );
            print_document(path, &result)?;
        }
    }

    metrics.log_summary();

    Ok(if all_compatible {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print a verdict as one YAML document, labelled with its build file
fn print_document<T: Serialize>(path: &Utf8Path, value: &T) -> Result<()> {
    let yaml = serde_yaml_ng::to_string(value)
        .with_context(|| format!("Failed to serialize verdict for {}", path))?;
    println!("--- # {}", path);
    print!("{}", yaml);
    Ok(())
}
