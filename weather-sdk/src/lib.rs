//! Client library for WeatherAPI.com.
//!
//! This crate defines:
//! - [`WeatherClient`], the only entry point callers need
//! - The typed records in [`model`] and the validator that builds them
//! - A closed error taxonomy, [`WeatherError`]
//! - A synthetic mode that serves fixed placeholder data without network I/O
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.
//!
//! ```no_run
//! # async fn demo() -> Result<(), weather_sdk::WeatherError> {
//! let client = weather_sdk::WeatherClient::synthetic();
//! let weather = client.current_weather("London").await?;
//! assert_eq!(weather.location.name, "London");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod synthetic;
pub mod transport;
pub mod validate;

pub use client::{
    DEFAULT_FORECAST_DAYS, MAX_FORECAST_DAYS, MIN_FORECAST_DAYS, WeatherClient,
    WeatherClientBuilder,
};
pub use config::{API_KEY_ENV, Config, DEFAULT_BASE_URL};
pub use dispatch::{Endpoint, Query};
pub use error::{ErrorKind, WeatherError};
pub use model::{
    Condition, CurrentWeather, DaySummary, Forecast, ForecastDay, Location, WeatherResponse,
};
pub use transport::{HttpTransport, OutboundRequest, RawResponse, Transport, TransportError};
