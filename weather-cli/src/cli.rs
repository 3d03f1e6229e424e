use std::{
    io::{self, BufRead, IsTerminal, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::debug;
use weather_core::{Config, WeatherRequest, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather report from OpenWeather")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Defaults to `show` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather for a location.
    Show {
        /// City or location name; prompted for when absent.
        location: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command.unwrap_or(Command::Show { location: None }) {
            Command::Configure => configure(&config_path),
            Command::Show { location } => show(&config_path, location).await,
        }
    }
}

fn configure(config_path: &Path) -> anyhow::Result<()> {
    let mut cfg = Config::load_from(config_path)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    cfg.set_api_key(api_key.to_string());
    cfg.save_to(config_path)?;

    println!("Saved API key to {}", config_path.display());
    Ok(())
}

async fn show(config_path: &Path, location: Option<String>) -> anyhow::Result<()> {
    let cfg = Config::load_from(config_path)?.with_env_overrides();

    // Fail on a missing key before asking for input.
    let provider = provider_from_config(&cfg)?;

    let location = match location {
        Some(location) => location,
        None => prompt_location()?,
    };
    debug!(%location, "looking up weather");

    let report = provider.current_weather(&WeatherRequest::new(location)).await?;
    print!("{}", report.render_now());

    Ok(())
}

const LOCATION_PROMPT: &str = "Enter the city name:";

fn prompt_location() -> anyhow::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Text::new(LOCATION_PROMPT)
            .prompt()
            .context("Failed to read city name");
    }

    print!("{LOCATION_PROMPT} ");
    io::stdout().flush().context("Failed to write prompt")?;
    read_location(stdin.lock())
}

/// Read one line from piped input, without its line terminator.
fn read_location(mut input: impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read city name")?;
    if read == 0 {
        bail!("No city name given on standard input");
    }

    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(trimmed.to_string())
}
