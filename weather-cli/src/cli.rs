use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::Password;
use tracing::info;
use weather_sdk::{Config, DEFAULT_BASE_URL, DEFAULT_FORECAST_DAYS, WeatherClient};

use crate::{menu, report};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather reports from WeatherAPI.com")]
pub struct Cli {
    #[command(flatten)]
    pub client: ClientArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that talks to the weather service.
#[derive(Debug, Args)]
pub struct ClientArgs {
    /// Serve fixed placeholder data instead of calling the API.
    #[arg(long, global = true)]
    pub synthetic: bool,

    /// API key; overrides the config file and WEATHER_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Service base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key in the config file.
    Configure,

    /// Show current conditions for a location.
    Current {
        /// Place name or "lat,lon".
        location: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a multi-day forecast.
    Forecast {
        /// Place name or "lat,lon".
        location: String,

        /// Number of days (1-14).
        #[arg(long, default_value_t = DEFAULT_FORECAST_DAYS)]
        days: u32,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Current conditions plus forecast in one report.
    Report {
        /// Place name or "lat,lon".
        location: String,

        #[arg(long, default_value_t = menu::REPORT_DAYS)]
        days: u32,
    },

    /// Re-print the current conditions periodically.
    Monitor {
        /// Place name or "lat,lon".
        location: String,

        /// Seconds between refreshes.
        #[arg(long, default_value_t = menu::MONITOR_INTERVAL_SECS)]
        interval: u64,

        /// Stop after this many refreshes.
        #[arg(long, default_value_t = 10)]
        count: u32,
    },

    /// Interactive menu.
    Menu,
}

impl ClientArgs {
    /// Flags win over the config file; the SDK falls back to the environment.
    pub fn build_client(&self, config: &Config) -> anyhow::Result<WeatherClient> {
        let mut builder = WeatherClient::builder().synthetic(self.synthetic).base_url(
            self.base_url
                .clone()
                .or_else(|| config.base_url.clone())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        );

        let api_key = self
            .api_key
            .clone()
            .or_else(|| config.api_key().map(str::to_owned));
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }

        let timeout = self.timeout.map(Duration::from_secs).or(config.timeout());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;
        if client.is_synthetic() {
            info!("using synthetic weather data");
        }
        Ok(client)
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let client = || self.client.build_client(&config);

        match self.command {
            Command::Configure => configure(config.clone())?,
            Command::Current { location, json } => {
                let weather = client()?.current_weather(&location).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&weather)?);
                } else {
                    print!("{}", report::render_current(&weather));
                }
            }
            Command::Forecast { location, days, json } => {
                let forecast = client()?.forecast(&location, days).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&forecast)?);
                } else {
                    print!("{}", report::render_forecast(&forecast));
                }
            }
            Command::Report { location, days } => {
                menu::print_report(&client()?, &location, days).await?;
            }
            Command::Monitor { location, interval, count } => {
                menu::monitor(&client()?, &location, Duration::from_secs(interval), count).await?;
            }
            Command::Menu => menu::run(&client()?).await?,
        }

        Ok(())
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let key = Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(key);
    if config.api_key().is_none() {
        anyhow::bail!("No API key entered; config left unchanged");
    }
    config.save()?;

    println!(
        "API key saved to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}
