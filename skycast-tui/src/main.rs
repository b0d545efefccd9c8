//! Binary crate for the `skycast` terminal weather viewer.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and routing to the weather view
//! - Interactive configuration
//! - Driving the view store and rendering it with ratatui

use clap::Parser;

mod cli;
#[cfg(test)]
mod fixtures;
mod input;
mod logging;
mod runtime;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
