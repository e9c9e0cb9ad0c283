//! Binary crate for the `skycast` terminal weather viewer.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The view state machine and its interactive loop
//! - Human-friendly output formatting

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Quiet by default so the interactive view stays readable;
    // RUST_LOG=debug exposes fetch diagnostics.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
