//! Offline payload generator.
//!
//! Produces JSON trees shaped exactly like the service's own, so synthetic
//! results go through the same validator as live ones. Every value except the
//! location name and the timestamps is fixed.

use chrono::{Duration, Local, NaiveDateTime};
use serde_json::{Value, json};

use crate::dispatch::{Endpoint, Query};

pub const REGION: &str = "Test Region";
pub const COUNTRY: &str = "Test Country";
pub const LAT: f64 = 51.52;
pub const LON: f64 = -0.11;

const LOCALTIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const FORECAST_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Clone, Copy, Default)]
pub struct Synthesizer;

impl Synthesizer {
    /// Payload for `endpoint`, stamped with the local wall clock.
    pub fn payload(&self, endpoint: Endpoint, query: &Query) -> Value {
        self.payload_at(endpoint, query, Local::now().naive_local())
    }

    /// Payload for `endpoint` as if generated at `now`.
    pub fn payload_at(&self, endpoint: Endpoint, query: &Query, now: NaiveDateTime) -> Value {
        let mut payload = json!({
            "location": {
                "name": query.q,
                "region": REGION,
                "country": COUNTRY,
                "lat": LAT,
                "lon": LON,
                "localtime": now.format(LOCALTIME_FORMAT).to_string(),
            },
            "current": {
                "temp_c": 22.0,
                "temp_f": 71.6,
                "condition": {
                    "text": "Partly cloudy",
                    "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png",
                    "code": 1003
                },
                "wind_mph": 8.1,
                "wind_kph": 13.0,
                "wind_degree": 220,
                "wind_dir": "SW",
                "pressure_mb": 1013.0,
                "pressure_in": 29.91,
                "precip_mm": 0.0,
                "precip_in": 0.0,
                "humidity": 65,
                "cloud": 40,
                "feelslike_c": 22.0,
                "feelslike_f": 71.6,
                "vis_km": 10.0,
                "vis_miles": 6.2,
                "uv": 4.0,
                "gust_mph": 10.5,
                "gust_kph": 16.9
            }
        });

        if endpoint == Endpoint::Forecast {
            let days = query.days.unwrap_or(1);
            let forecastday: Vec<Value> = (0..days)
                .map(|i| forecast_day(now + Duration::days(i64::from(i))))
                .collect();
            payload["forecast"] = json!({ "forecastday": forecastday });
        }

        payload
    }
}

fn forecast_day(at: NaiveDateTime) -> Value {
    json!({
        "date": at.format(FORECAST_DATE_FORMAT).to_string(),
        "day": {
            "maxtemp_c": 25.0,
            "maxtemp_f": 77.0,
            "mintemp_c": 15.0,
            "mintemp_f": 59.0,
            "condition": {
                "text": "Sunny",
                "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png",
                "code": 1000
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 30)
            .unwrap()
            .and_hms_opt(12, 5, 9)
            .unwrap()
    }

    #[test]
    fn current_payload_echoes_query_and_stamps_localtime() {
        let query = Query::current("51.5,-0.11");
        let payload = Synthesizer.payload_at(Endpoint::Current, &query, noon());

        assert_eq!(payload["location"]["name"], "51.5,-0.11");
        assert_eq!(payload["location"]["localtime"], "2024-12-30 12:05");
        assert_eq!(payload["current"]["humidity"], 65);
        assert!(payload.get("forecast").is_none());
    }

    #[test]
    fn forecast_dates_cross_year_boundary() {
        let query = Query::forecast("London", 3);
        let payload = Synthesizer.payload_at(Endpoint::Forecast, &query, noon());

        let dates: Vec<_> = payload["forecast"]["forecastday"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["date"].as_str().unwrap().to_owned())
            .collect();

        assert_eq!(
            dates,
            [
                "2024-12-30T12:05:09.000000",
                "2024-12-31T12:05:09.000000",
                "2025-01-01T12:05:09.000000",
            ]
        );
    }
}
