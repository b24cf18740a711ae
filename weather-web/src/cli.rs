use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use tracing_subscriber::EnvFilter;
use weather_core::{Config, WeatherLookupService};

use crate::{server, view};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-web", version, about = "City weather lookup web app")]
pub struct Cli {
    /// Config file to use instead of the one in the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web form server.
    Serve {
        /// Overrides both the config file and the PORT variable.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Look up the weather for one city and print it.
    Lookup {
        /// City name; prompted for when absent.
        city: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Interactively write the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command.unwrap_or(Command::Serve { port: None }) {
            Command::Serve { port } => {
                let mut config = Config::load_with_env(&path)?;
                if let Some(port) = port {
                    config.server.port = port;
                }
                init_tracing(&config)?;
                server::serve(config).await
            }
            Command::Lookup { city, json } => {
                let config = Config::load_with_env(&path)?;
                init_tracing(&config)?;
                lookup(&config, city, json).await
            }
            Command::Configure => configure(&path),
        }
    }
}

/// Log filter from `log_level` only; the environment is not consulted.
fn log_filter(config: &Config) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("Invalid log_level '{}'", config.log_level))
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(config)?)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn lookup(config: &Config, city: Option<String>, json: bool) -> anyhow::Result<()> {
    let city = match city {
        Some(city) => city,
        None => Text::new("City:").prompt().context("Failed to read city name")?,
    };

    let service = WeatherLookupService::from_config(&config.upstream)?;
    let weather = service.lookup(Some(city.as_str())).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&weather)?);
    } else {
        println!("{}", view::format_summary(&weather));
    }
    Ok(())
}

fn configure(path: &std::path::Path) -> anyhow::Result<()> {
    let mut config = Config::load_from(path)?;

    config.server.port = CustomType::<u16>::new("Listen port:")
        .with_default(config.server.port)
        .with_error_message("Please enter a port number (0-65535)")
        .prompt()
        .context("Failed to read port")?;

    config.upstream.timeout_secs = CustomType::<u64>::new("Upstream timeout (seconds):")
        .with_default(config.upstream.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read timeout")?;

    config.log_level = Text::new("Log level:")
        .with_default(&config.log_level)
        .prompt()
        .context("Failed to read log level")?;

    config.validate()?;
    config.save_to(path)?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
