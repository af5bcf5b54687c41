mod catalog;
mod cli;
mod export;
mod model;
mod runner;
mod sim;
mod transcript;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    cli::run(args).await
}
