use clap::{Parser, Subcommand};
use skycast_core::{Config, provider_from_config};

use crate::app;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather viewer")]
pub struct Cli {
    /// City shown on startup.
    #[arg(long, default_value = "Lahore")]
    pub city: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            None => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                app::run(provider.as_ref(), &self.city).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()?;

    let mut config = Config::load()?;
    config.set_api_key(api_key);
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}
