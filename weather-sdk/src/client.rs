//! The public facade: [`WeatherClient`] and its builder.

use std::{fmt, sync::Arc, time::Duration};

use tracing::debug;

use crate::{
    config::{API_KEY_ENV, DEFAULT_BASE_URL, resolve_api_key},
    dispatch::{Dispatcher, Endpoint, Query},
    error::WeatherError,
    model::{Forecast, WeatherResponse},
    synthetic::Synthesizer,
    transport::{HttpTransport, Transport},
    validate,
};

pub const DEFAULT_FORECAST_DAYS: u32 = 3;
pub const MIN_FORECAST_DAYS: u32 = 1;
pub const MAX_FORECAST_DAYS: u32 = 14;

/// Client for current conditions and forecasts.
///
/// Holds no per-call state; share one instance freely.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    dispatcher: Dispatcher,
}

impl WeatherClient {
    pub fn builder() -> WeatherClientBuilder {
        WeatherClientBuilder::default()
    }

    /// Live client; `api_key` falls back to `WEATHER_API_KEY`.
    pub fn new(api_key: Option<String>) -> Result<Self, WeatherError> {
        let mut builder = Self::builder();
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        builder.build()
    }

    /// Client that never touches the network.
    pub fn synthetic() -> Self {
        Self {
            dispatcher: Dispatcher::Synthetic(Synthesizer),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self.dispatcher, Dispatcher::Synthetic(_))
    }

    /// Current conditions for a place name or a `lat,lon` pair.
    ///
    /// The query is sent as-is.
    pub async fn current_weather(&self, query: &str) -> Result<WeatherResponse, WeatherError> {
        let payload = self
            .dispatcher
            .dispatch(Endpoint::Current, &Query::current(query))
            .await?;
        validate::weather_response(&payload)
    }

    /// Forecast for `days` days, which must be within 1..=14.
    ///
    /// An out-of-range `days` fails with [`WeatherError::InvalidArgument`]
    /// before anything is dispatched.
    pub async fn forecast(&self, query: &str, days: u32) -> Result<Forecast, WeatherError> {
        if !(MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(&days) {
            return Err(WeatherError::InvalidArgument {
                name: "days",
                value: i64::from(days),
                expected: "a value between 1 and 14",
            });
        }

        let payload = self
            .dispatcher
            .dispatch(Endpoint::Forecast, &Query::forecast(query, days))
            .await?;
        validate::forecast(&payload)
    }

    /// [`forecast`](Self::forecast) with [`DEFAULT_FORECAST_DAYS`].
    pub async fn forecast_default(&self, query: &str) -> Result<Forecast, WeatherError> {
        self.forecast(query, DEFAULT_FORECAST_DAYS).await
    }
}

/// Resolves configuration once, at [`build`](Self::build).
pub struct WeatherClientBuilder {
    api_key: Option<String>,
    synthetic: bool,
    base_url: String,
    timeout: Option<Duration>,
    env_var: String,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for WeatherClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            synthetic: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            env_var: API_KEY_ENV.to_string(),
            transport: None,
        }
    }
}

impl fmt::Debug for WeatherClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherClientBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("synthetic", &self.synthetic)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("env_var", &self.env_var)
            .field("transport", &self.transport)
            .finish()
    }
}

impl WeatherClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn synthetic(mut self, synthetic: bool) -> Self {
        self.synthetic = synthetic;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whole-request timeout; without one the transport default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Environment variable read when no explicit key is given.
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    /// Replace the HTTP transport, e.g. with a scripted one in tests.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<WeatherClient, WeatherError> {
        if self.synthetic {
            debug!("building synthetic weather client");
            return Ok(WeatherClient::synthetic());
        }

        let api_key = resolve_api_key(self.api_key, &self.env_var, |name| {
            std::env::var(name).ok()
        })
        .ok_or(WeatherError::InvalidCredential)?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.timeout).map_err(|e| {
                WeatherError::Upstream {
                    status: None,
                    message: e.message,
                }
            })?),
        };

        debug!(base_url = %self.base_url, "building live weather client");

        Ok(WeatherClient {
            dispatcher: Dispatcher::Live {
                transport,
                base_url: self.base_url,
                api_key,
            },
        })
    }
}
