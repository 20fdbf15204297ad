//! treecmp CLI Binary
//!
//! Compares two directory trees and prints their differences on stdout.

use clap::Parser;
use std::process;
use treecmp::cli::{exit_code, map_error, Cli, RunContext, EXIT_TROUBLE};
use treecmp::logging::{init_logging, LoggingConfig};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let context = match RunContext::load(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_TROUBLE);
        }
    };

    let logging_config = build_logging_config(&cli, &context.config().logging);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(EXIT_TROUBLE);
    }

    info!("treecmp starting");

    match context.execute(&cli) {
        Ok(summary) => process::exit(exit_code(&summary)),
        Err(e) => {
            error!("Comparison failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_TROUBLE);
        }
    }
}

/// Build logging configuration from CLI args on top of the config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, base: &LoggingConfig) -> LoggingConfig {
    let mut config = base.clone();

    if cli.verbose {
        config.enabled = true;
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.enabled = true;
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if cli.quiet {
        config.enabled = false;
    }

    config
}
