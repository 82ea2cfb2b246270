//! # SolarBooks CLI
//!
//! Command-line access to the SolarBooks business rules.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        solarbooks                                       │
//! │                                                                         │
//! │  args ──► clap ──► config (TOML + SOLARBOOKS__*) ──► command ──► core  │
//! │                                                          │              │
//! │                                      stdout ◄── JSON ────┘              │
//! │                                      stderr ◄── logs, ApiError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Examples
//! ```text
//! solarbooks invoice draft.json
//! solarbooks subsidy 2.5
//! solarbooks payment --total 1435 --paid 435 --amount 1000 --method bank
//! solarbooks next-number invoice --last INV-00041
//! RUST_LOG=debug solarbooks --config policy.toml report records.json
//! ```

mod commands;
mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::error::ApiError;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Parser)]
#[command(name = "solarbooks", author, version, about, long_about = None)]
struct Cli {
    /// Policy file (TOML)
    #[arg(long, global = true, env = "SOLARBOOKS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();

    match execute(cli) {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            warn!(code = ?err.code, reason = ?err.reason, "command failed");
            eprintln!("{}", serde_json::to_string_pretty(&err)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Loads the policy and runs the subcommand. Every failure, including an
/// unusable policy file, comes back as an [`ApiError`].
fn execute(cli: Cli) -> Result<String, ApiError> {
    let policy = config::load(cli.config.as_deref())?;
    info!(negative_total = ?policy.invoice.negative_total, "Configuration loaded");

    commands::run(cli.command, &policy)
}

/// Installs the stderr subscriber.
///
/// ## Log Levels
/// - Default: `info`
/// - `RUST_LOG=debug` shows computed totals and tiers
/// - `RUST_LOG=solarbooks_core=trace` shows every invoice line
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
