//! `cryptohelper` — command-line entry point.
//!
//! Startup sequence:
//! 1. Parse arguments.
//! 2. Load and validate [`Config`] from `CRYPTOHELPER_*` environment variables.
//! 3. Initialise structured JSON logging on stderr.
//! 4. Run the subcommand and write its result (or error) in the chosen format.

mod cli;
mod commands;
mod config;
mod telemetry;

use std::process::ExitCode;

use clap::Parser;
use cryptohelper::SecretboxCodec;
use tracing::debug;

use crate::cli::Cli;
use crate::config::Config;

fn main() -> ExitCode {
    // -----------------------------------------------------------------------
    // 1. Arguments
    // -----------------------------------------------------------------------
    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Telemetry is not yet up; write to stderr directly.
            eprintln!("ERROR: cryptohelper configuration invalid: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    if let Err(e) = telemetry::init(&cfg.log_level) {
        eprintln!("ERROR: {e:#}");
        return ExitCode::FAILURE;
    }
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        command = cli.command.name(),
        "cryptohelper starting"
    );

    // -----------------------------------------------------------------------
    // 4. Command
    // -----------------------------------------------------------------------
    let codec = SecretboxCodec::new();
    let result = commands::run(&codec, cli.command, &cfg, std::io::stdin().lock())
        .and_then(|output| output.write_to(cli.format, &mut std::io::stdout().lock()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", commands::report_error(&err, cli.format));
            ExitCode::from(err.exit_code())
        }
    }
}
