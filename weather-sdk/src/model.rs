//! Typed records returned by [`WeatherClient`](crate::WeatherClient).
//!
//! Values are built only by the validator in [`crate::validate`]; paired unit
//! fields (C/F, mph/kph, ...) are taken independently from the payload and
//! never derived from one another.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    /// Local time as reported upstream, e.g. `2024-05-01 14:30`.
    pub localtime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub text: String,
    /// Often protocol-relative, e.g. `//cdn.weatherapi.com/...`.
    pub icon: String,
    pub code: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition: Condition,
    pub wind_mph: f64,
    pub wind_kph: f64,
    pub wind_degree: i64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub precip_mm: f64,
    pub precip_in: f64,
    /// Relative humidity, percent.
    pub humidity: u8,
    /// Cloud cover, percent.
    pub cloud: u8,
    pub feelslike_c: Option<f64>,
    pub feelslike_f: Option<f64>,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub uv: f64,
    pub gust_mph: Option<f64>,
    pub gust_kph: Option<f64>,
}

/// Aggregate figures for a single forecast day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    /// Date string exactly as the payload carried it.
    pub date: String,
    pub day: DaySummary,
}

/// Result of a current-conditions query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherResponse {
    pub location: Location,
    pub current: CurrentWeather,
}

/// Result of a forecast query. Days are in the order the service sent them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub location: Location,
    pub current: CurrentWeather,
    pub forecast: Vec<ForecastDay>,
}
