//! Plain-text rendering of SDK results.

use std::fmt::Write;

use weather_sdk::{CurrentWeather, ErrorKind, Forecast, ForecastDay, WeatherError, WeatherResponse};

const RULE_WIDTH: usize = 60;

pub fn render_current(weather: &WeatherResponse) -> String {
    let mut out = String::new();
    let loc = &weather.location;

    let _ = writeln!(out, "{}, {}, {}", loc.name, loc.region, loc.country);
    let _ = writeln!(out, "Local time: {}", loc.localtime);
    let _ = writeln!(out, "{}", "-".repeat(40));
    write_conditions(&mut out, &weather.current);
    out
}

pub fn render_forecast(forecast: &Forecast) -> String {
    let mut out = String::new();
    let loc = &forecast.location;

    let _ = writeln!(
        out,
        "{}-day forecast for {}, {}",
        forecast.forecast.len(),
        loc.name,
        loc.country
    );
    let _ = writeln!(out, "{}", "-".repeat(40));
    for day in &forecast.forecast {
        write_day(&mut out, day);
    }
    out
}

/// Current conditions followed by the forecast, framed like a printed report.
pub fn render_report(weather: &WeatherResponse, forecast: &Forecast) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Weather Report for {}", weather.location.name);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);
    let _ = writeln!(out, "CURRENT CONDITIONS at {}", weather.location.localtime);
    let _ = writeln!(out, "{}", "-".repeat(40));
    write_conditions(&mut out, &weather.current);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}-DAY FORECAST", forecast.forecast.len());
    let _ = writeln!(out, "{}", "-".repeat(40));
    for day in &forecast.forecast {
        write_day(&mut out, day);
    }
    let _ = writeln!(out, "{rule}");
    out
}

fn write_conditions(out: &mut String, current: &CurrentWeather) {
    let _ = writeln!(
        out,
        "Temperature: {}°C ({}°F)",
        current.temp_c, current.temp_f
    );
    if let (Some(c), Some(f)) = (current.feelslike_c, current.feelslike_f) {
        let _ = writeln!(out, "Feels like:  {c}°C ({f}°F)");
    }
    let _ = writeln!(out, "Condition:   {}", current.condition.text);
    let _ = writeln!(out, "Humidity:    {}%", current.humidity);
    let _ = writeln!(
        out,
        "Wind:        {} km/h {} ({}°)",
        current.wind_kph, current.wind_dir, current.wind_degree
    );
    if let Some(gust) = current.gust_kph {
        let _ = writeln!(out, "Gusts:       {gust} km/h");
    }
    let _ = writeln!(
        out,
        "Pressure:    {} mb ({} in)",
        current.pressure_mb, current.pressure_in
    );
    let _ = writeln!(out, "Precip:      {} mm", current.precip_mm);
    let _ = writeln!(out, "Cloud cover: {}%", current.cloud);
    let _ = writeln!(out, "Visibility:  {} km", current.vis_km);
    let _ = writeln!(out, "UV index:    {}", current.uv);
}

fn write_day(out: &mut String, day: &ForecastDay) {
    let _ = writeln!(out, "Date: {}", day.date);
    let _ = writeln!(out, "  Max: {}°C ({}°F)", day.day.maxtemp_c, day.day.maxtemp_f);
    let _ = writeln!(out, "  Min: {}°C ({}°F)", day.day.mintemp_c, day.day.mintemp_f);
    let _ = writeln!(out, "  Condition: {}", day.day.condition.text);
}

/// User-facing text for a failed command, with a hint where one helps.
pub fn describe_error(err: &anyhow::Error) -> String {
    let Some(weather) = err.downcast_ref::<WeatherError>() else {
        return format!("{err:#}");
    };

    let hint = match weather.kind() {
        ErrorKind::InvalidCredential => Some(
            "run `weather configure`, set WEATHER_API_KEY, or pass --synthetic for offline data",
        ),
        ErrorKind::InvalidArgument => Some("forecasts cover 1 to 14 days"),
        ErrorKind::LocationNotFound => Some("check the spelling or pass coordinates as `lat,lon`"),
        ErrorKind::RateLimited => Some("the API quota is exhausted; try again later"),
        ErrorKind::Upstream | ErrorKind::MalformedResponse => None,
    };

    match hint {
        Some(hint) => format!("{weather}\nHint: {hint}"),
        None => weather.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_sdk::WeatherClient;

    #[tokio::test]
    async fn current_report_lists_conditions() {
        let weather = WeatherClient::synthetic()
            .current_weather("London")
            .await
            .unwrap();

        let text = render_current(&weather);

        assert!(text.starts_with("London, Test Region, Test Country\n"));
        assert!(text.contains("Temperature: 22°C (71.6°F)"));
        assert!(text.contains("Condition:   Partly cloudy"));
        assert!(text.contains("Humidity:    65%"));
        assert!(text.contains("Wind:        13 km/h SW (220°)"));
    }

    #[tokio::test]
    async fn full_report_has_one_block_per_day() {
        let client = WeatherClient::synthetic();
        let weather = client.current_weather("Tokyo").await.unwrap();
        let forecast = client.forecast("Tokyo", 5).await.unwrap();

        let text = render_report(&weather, &forecast);

        assert!(text.contains("Weather Report for Tokyo"));
        assert!(text.contains("5-DAY FORECAST"));
        assert_eq!(text.matches("Date: ").count(), 5);
        assert_eq!(text.matches("  Condition: Sunny").count(), 5);
    }

    #[test]
    fn weather_errors_get_hints() {
        let err = anyhow::Error::new(WeatherError::LocationNotFound("Atlantis".into()));
        let text = describe_error(&err);

        assert!(text.starts_with("location not found: Atlantis"));
        assert!(text.contains("Hint: check the spelling"));
    }

    #[test]
    fn upstream_errors_have_no_hint() {
        let err = anyhow::Error::new(WeatherError::Upstream {
            status: Some(503),
            message: "Service Unavailable".into(),
        });

        assert_eq!(
            describe_error(&err),
            "upstream error (status 503): Service Unavailable"
        );
    }

    #[test]
    fn other_errors_keep_their_context_chain() {
        let err = anyhow::anyhow!("disk full").context("Failed to write config file");
        assert_eq!(describe_error(&err), "Failed to write config file: disk full");
    }
}
