//! # Storefront Console Entry Point
//!
//! ```text
//! storefront products list --name tea --page 2
//! storefront products create --name Oolong --price 12.50 --quantity 40
//! storefront shop browse --name tea
//! storefront cart add 7 --quantity 2
//! storefront cart update 31 0        # removes the line
//! ```
//!
//! The setup is in lib.rs so it can be driven from tests.

use std::process::ExitCode;

use clap::Parser;
use storefront_console::cli::Cli;
use storefront_console::error::ConsoleError;
use storefront_console::{init_tracing, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err @ ConsoleError::Api(_)) => {
            Err(anyhow::Error::new(err).context("storefront could not start"))
        }
        Err(err) => {
            if !err.already_reported() {
                eprintln!("error: {}", err);
            }
            Ok(err.into())
        }
    }
}
