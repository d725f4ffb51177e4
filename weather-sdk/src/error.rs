use thiserror::Error;

/// Every failure a [`WeatherClient`](crate::WeatherClient) call can return.
///
/// The variants are mutually exclusive; nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    /// No credential available in live mode, or the service rejected it (401).
    #[error("API key is invalid or missing")]
    InvalidCredential,

    /// A caller-supplied argument is out of range; nothing was dispatched.
    #[error("invalid argument `{name}`: {value} (expected {expected})")]
    InvalidArgument {
        name: &'static str,
        value: i64,
        expected: &'static str,
    },

    /// The service could not resolve the location query (404).
    #[error("location not found: {0}")]
    LocationNotFound(String),

    /// The service signalled that the request quota is exhausted (429).
    #[error("API rate limit exceeded")]
    RateLimited,

    /// Any other non-success status; `status` is `None` when the request never
    /// produced an HTTP response at all.
    #[error("upstream error ({}): {message}", describe_status(.status))]
    Upstream { status: Option<u16>, message: String },

    /// The payload did not have the shape of the expected record.
    #[error("malformed response at `{path}`: expected {expected}, found {actual}")]
    MalformedResponse {
        path: String,
        expected: &'static str,
        actual: String,
    },
}

/// Discriminant of [`WeatherError`] for callers that only branch on the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCredential,
    InvalidArgument,
    LocationNotFound,
    RateLimited,
    Upstream,
    MalformedResponse,
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::InvalidCredential => ErrorKind::InvalidCredential,
            WeatherError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            WeatherError::LocationNotFound(_) => ErrorKind::LocationNotFound,
            WeatherError::RateLimited => ErrorKind::RateLimited,
            WeatherError::Upstream { .. } => ErrorKind::Upstream,
            WeatherError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
        }
    }

    pub(crate) fn malformed(
        path: impl Into<String>,
        expected: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        WeatherError::MalformedResponse {
            path: path.into(),
            expected,
            actual: actual.into(),
        }
    }
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "transport failure".to_string(),
    }
}
