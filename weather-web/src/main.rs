//! Binary crate for the `weather-web` server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and interactive configuration
//! - Logging setup
//! - Serving the city form and rendering lookup results

use clap::Parser;

mod cli;
mod server;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
