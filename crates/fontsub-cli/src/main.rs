//! fontsub - subset a font to a character list and convert it to WOFF2

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use fontsub_core::{interrupt, Error};

use crate::cli::Cli;

/// Conventional exit status after SIGINT
const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(err) = ctrlc::set_handler(interrupt::request) {
        log::warn!("Could not install Ctrl-C handler: {err}");
    }

    match commands::subset::run(&cli) {
        Ok(summary) => {
            log::debug!(
                "Finished with {} output(s) and {} warning(s)",
                summary.outputs.len(),
                summary.warnings
            );
            ExitCode::SUCCESS
        },
        Err(err) => report_failure(&err, cli.verbose),
    }
}

/// Initialize logging based on verbosity flag.
fn init_logger(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Warn)
            .init();
    }
}

fn report_failure(err: &anyhow::Error, verbose: bool) -> ExitCode {
    match err.downcast_ref::<Error>() {
        Some(Error::Interrupted) => {
            eprintln!("\nInterrupted by user");
            ExitCode::from(EXIT_INTERRUPTED)
        },
        Some(Error::MissingInput(missing)) => {
            eprintln!("ERROR: {missing}");
            ExitCode::FAILURE
        },
        _ => {
            // Debug output already lists the causes, one per line
            if verbose {
                eprintln!("ERROR: {err:?}");
            } else {
                eprintln!("ERROR: {err:#}");
            }
            ExitCode::FAILURE
        },
    }
}
