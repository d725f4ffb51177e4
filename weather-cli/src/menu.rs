//! Interactive menu and the periodic monitor.

use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use inquire::{CustomType, Select, Text};
use tracing::warn;
use weather_sdk::WeatherClient;

use crate::report;

pub const REPORT_DAYS: u32 = 5;
pub const MONITOR_INTERVAL_SECS: u64 = 30;

pub const CITIES: &[&str] = &[
    "London",
    "New York",
    "Tokyo",
    "Mumbai",
    "Sydney",
    "Dubai",
    "Singapore",
    "Paris",
    "Berlin",
    "Toronto",
];

const SINGLE: &str = "View single city report";
const ALL: &str = "View all cities report";
const MONITOR: &str = "Monitor live updates (30s interval)";
const EXIT: &str = "Exit";

pub async fn print_report(client: &WeatherClient, location: &str, days: u32) -> anyhow::Result<()> {
    let weather = client.current_weather(location).await?;
    let forecast = client.forecast(location, days).await?;
    print!("{}", report::render_report(&weather, &forecast));
    Ok(())
}

/// Print current conditions `count` times, `interval` apart. Ctrl-C stops early.
pub async fn monitor(
    client: &WeatherClient,
    location: &str,
    interval: Duration,
    count: u32,
) -> anyhow::Result<()> {
    for round in 1..=count {
        let weather = client.current_weather(location).await?;
        println!(
            "[{}] update {round}/{count}",
            Local::now().format("%H:%M:%S")
        );
        print!("{}", report::render_current(&weather));

        if round == count {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                println!("Monitoring stopped.");
                break;
            }
        }
    }
    Ok(())
}

pub async fn run(client: &WeatherClient) -> anyhow::Result<()> {
    loop {
        let choice = Select::new("Weather Reporting System", vec![SINGLE, ALL, MONITOR, EXIT])
            .prompt()
            .context("Failed to read menu choice")?;

        match choice {
            SINGLE => {
                let city = Text::new("City:").prompt()?;
                report_or_warn(client, &city).await;
            }
            ALL => {
                for city in CITIES {
                    report_or_warn(client, city).await;
                }
            }
            MONITOR => {
                let city = Text::new("City:").prompt()?;
                let count = CustomType::<u32>::new("Number of updates:")
                    .with_default(10)
                    .prompt()?;
                monitor(client, &city, Duration::from_secs(MONITOR_INTERVAL_SECS), count).await?;
            }
            _ => return Ok(()),
        }
    }
}

/// One failing city should not end the menu session.
async fn report_or_warn(client: &WeatherClient, city: &str) {
    if let Err(err) = print_report(client, city, REPORT_DAYS).await {
        warn!(city, "report failed");
        eprintln!("Error for {city}: {}", report::describe_error(&err));
    }
}
