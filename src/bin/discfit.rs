//! Discfit CLI Binary
//!
//! Scans the given paths and packs the files found into disc-sized sets.

use anyhow::Context;
use clap::Parser;
use discfit::error::ApiError;
use discfit::logging::init_logging;
use discfit::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = match e.downcast_ref::<ApiError>() {
                Some(ApiError::NoPathResolved(_)) => 2,
                _ => 1,
            };
            process::exit(code);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = CliContext::new(cli).context("Error initializing configuration")?;
    if !cli.print_config {
        init_logging(&context.config().logging, context.log_file())
            .context("Error initializing logging")?;
    }
    Ok(context.execute()?)
}
