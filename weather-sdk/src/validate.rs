//! Conversion of an untyped JSON payload into the records of [`crate::model`].
//!
//! Each record lists its fields explicitly as either required or defaulted.
//! A missing required field, or any field of the wrong type, fails with
//! [`WeatherError::MalformedResponse`] carrying the dotted path of the field.
//! Unknown keys are ignored.

use serde_json::{Map, Value};

use crate::{
    error::WeatherError,
    model::{
        Condition, CurrentWeather, DaySummary, Forecast, ForecastDay, Location, WeatherResponse,
    },
};

pub const DEFAULT_CONDITION_CODE: i64 = 1000;

/// Records that can be built from a JSON payload node.
pub trait FromPayload: Sized {
    /// `path` locates `value` inside the whole payload, used in error reports.
    fn from_payload(value: &Value, path: &str) -> Result<Self, WeatherError>;
}

/// Parse a complete current-conditions payload.
pub fn weather_response(payload: &Value) -> Result<WeatherResponse, WeatherError> {
    WeatherResponse::from_payload(payload, "")
}

/// Parse a complete forecast payload.
pub fn forecast(payload: &Value) -> Result<Forecast, WeatherError> {
    Forecast::from_payload(payload, "")
}

/// A JSON object together with its position in the payload.
struct Record<'a> {
    path: &'a str,
    fields: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    fn new(value: &'a Value, path: &'a str) -> Result<Self, WeatherError> {
        match value {
            Value::Object(fields) => Ok(Self { path, fields }),
            other => Err(WeatherError::malformed(
                display_path(path),
                "an object",
                describe(Some(other)),
            )),
        }
    }

    fn field_path(&self, key: &str) -> String {
        join(self.path, key)
    }

    /// Present and non-null value for `key`.
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    fn mismatch(&self, key: &str, expected: &'static str) -> WeatherError {
        WeatherError::malformed(self.field_path(key), expected, describe(self.get(key)))
    }

    fn required_str(&self, key: &str) -> Result<String, WeatherError> {
        self.get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| self.mismatch(key, "a string"))
    }

    fn required_f64(&self, key: &str) -> Result<f64, WeatherError> {
        self.get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| self.mismatch(key, "a number"))
    }

    fn optional_f64(&self, key: &str) -> Result<Option<f64>, WeatherError> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.mismatch(key, "a number")),
        }
    }

    fn f64_or(&self, key: &str, default: f64) -> Result<f64, WeatherError> {
        Ok(self.optional_f64(key)?.unwrap_or(default))
    }

    fn i64_or(&self, key: &str, default: i64) -> Result<i64, WeatherError> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => as_integer(v).ok_or_else(|| self.mismatch(key, "an integer")),
        }
    }

    fn percent_or(&self, key: &str, default: u8) -> Result<u8, WeatherError> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => as_integer(v)
                .filter(|n| (0..=100).contains(n))
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| self.mismatch(key, "an integer between 0 and 100")),
        }
    }

    fn str_or(&self, key: &str, default: &str) -> Result<String, WeatherError> {
        match self.get(key) {
            None => Ok(default.to_owned()),
            Some(v) => v
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| self.mismatch(key, "a string")),
        }
    }

    fn required<T: FromPayload>(&self, key: &str) -> Result<T, WeatherError> {
        let path = self.field_path(key);
        match self.get(key) {
            Some(v) => T::from_payload(v, &path),
            None => Err(WeatherError::malformed(path, "an object", "missing")),
        }
    }

    fn required_list<T: FromPayload>(&self, key: &str) -> Result<Vec<T>, WeatherError> {
        let items = self
            .get(key)
            .and_then(Value::as_array)
            .ok_or_else(|| self.mismatch(key, "an array"))?;

        let path = self.field_path(key);
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_payload(item, &format!("{path}[{i}]")))
            .collect()
    }
}

/// Integer view of a JSON number; floats are accepted when they have no
/// fractional part.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_owned()
    } else {
        format!("{parent}.{key}")
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "$" } else { path }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_owned(),
        Some(Value::Null) => "null".to_owned(),
        Some(Value::Bool(b)) => format!("boolean {b}"),
        Some(Value::Number(n)) => format!("number {n}"),
        Some(Value::String(s)) => format!("string {s:?}"),
        Some(Value::Array(_)) => "an array".to_owned(),
        Some(Value::Object(_)) => "an object".to_owned(),
    }
}

impl FromPayload for Location {
    fn from_payload(value: &Value, path: &str) -> Result<Self, WeatherError> {
        let r = Record::new(value, path)?;
        Ok(Location {
            name: r.required_str("name")?,
            region: r.required_str("region")?,
            country: r.required_str("country")?,
            lat: r.required_f64("lat")?,
            lon: r.required_f64("lon")?,
            localtime: r.required_str("localtime")?,
        })
    }
}

impl FromPayload for Condition {
    fn from_payload(value: &Value, path: &str) -> Result<Self, WeatherError> {
        let r = Record::new(value, path)?;
        Ok(Condition {
            text: r.required_str("text")?,
            icon: r.required_str("icon")?,
            code: r.i64_or("code", DEFAULT_CONDITION_CODE)?,
        })
    }
}

impl FromPayload for CurrentWeather {
    fn from_payload(value: &Value, path: &str) -> Result<Self, WeatherError> {
        let r = Record::new(value, path)?;
        Ok(CurrentWeather {
            temp_c: r.required_f64("temp_c")?,
            temp_f: r.required_f64("temp_f")?,
            condition: r.required("condition")?,
            wind_mph: r.required_f64("wind_mph")?,
            wind_kph: r.required_f64("wind_kph")?,
            wind_degree: r.i64_or("wind_degree", 0)?,
            wind_dir: r.str_or("wind_dir", "N")?,
            pressure_mb: r.f64_or("pressure_mb", 1013.0)?,
            pressure_in: r.f64_or("pressure_in", 29.92)?,
            precip_mm: r.f64_or("precip_mm", 0.0)?,
            precip_in: r.f64_or("precip_in", 0.0)?,
            humidity: r.percent_or("humidity", 50)?,
            cloud: r.percent_or("cloud", 0)?,
            feelslike_c: r.optional_f64("feelslike_c")?,
            feelslike_f: r.optional_f64("feelslike_f")?,
            vis_km: r.f64_or("vis_km", 10.0)?,
            vis_miles: r.f64_or("vis_miles", 6.2)?,
            uv: r.f64_or("uv", 1.0)?,
            gust_mph: r.optional_f64("gust_mph")?,
            gust_kph: r.optional_f64("gust_kph")?,
        })
    }
}

impl FromPayload for DaySummary {
    fn from_payload(value: &Value, path: &str) -> Result<Self, WeatherError> {
        let r = Record::new(value, path)?;
        Ok(DaySummary {
            maxtemp_c: r.required_f64("maxtemp_c")?,
            maxtemp_f: r.required_f64("maxtemp_f")?,
            mintemp_c: r.required_f64("mintemp_c")?,
            mintemp_f: r.required_f64("mintemp_f")?,
            condition: r.required("condition")?,
        })
    }
}

impl FromPayload for ForecastDay {
    fn from_payload(value: &Value, path: &str) -> Result<Self, WeatherError> {
        let r = Record::new(value, path)?;
        Ok(ForecastDay {
            date: r.required_str("date")?,
            day: r.required("day")?,
        })
    }
}

impl FromPayload for WeatherResponse {
    fn from_payload(value: &Value, path: &str) -> Result<Self, WeatherError> {
        let r = Record::new(value, path)?;
        Ok(WeatherResponse {
            location: r.required("location")?,
            current: r.required("current")?,
        })
    }
}

impl FromPayload for Forecast {
    fn from_payload(value: &Value, path: &str) -> Result<Self, WeatherError> {
        let r = Record::new(value, path)?;
        let container_path = r.field_path("forecast");
        let container = r
            .get("forecast")
            .ok_or_else(|| WeatherError::malformed(container_path.as_str(), "an object", "missing"))?;
        let days = Record::new(container, &container_path)?;

        Ok(Forecast {
            location: r.required("location")?,
            current: r.required("current")?,
            forecast: days.required_list("forecastday")?,
        })
    }
}
