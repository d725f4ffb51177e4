//! Turns a logical `(endpoint, query)` pair into a JSON payload or a
//! classified [`WeatherError`].

use std::{fmt, sync::Arc};

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::WeatherError,
    synthetic::Synthesizer,
    transport::{OutboundRequest, RawResponse, Transport, TransportError},
};

pub const USER_AGENT: &str = "WeatherSDK/2.0";

const MAX_MESSAGE_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "current.json",
            Endpoint::Forecast => "forecast.json",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Logical request parameters, before the credential is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Place name or `lat,lon`; never interpreted.
    pub q: String,
    pub days: Option<u32>,
}

impl Query {
    pub fn current(q: impl Into<String>) -> Self {
        Self { q: q.into(), days: None }
    }

    pub fn forecast(q: impl Into<String>, days: u32) -> Self {
        Self { q: q.into(), days: Some(days) }
    }
}

#[derive(Clone)]
pub(crate) enum Dispatcher {
    Live {
        transport: Arc<dyn Transport>,
        base_url: String,
        api_key: String,
    },
    Synthetic(Synthesizer),
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatcher::Live { transport, base_url, .. } => f
                .debug_struct("Live")
                .field("transport", transport)
                .field("base_url", base_url)
                .field("api_key", &"<redacted>")
                .finish(),
            Dispatcher::Synthetic(_) => f.write_str("Synthetic"),
        }
    }
}

impl Dispatcher {
    pub(crate) async fn dispatch(
        &self,
        endpoint: Endpoint,
        query: &Query,
    ) -> Result<Value, WeatherError> {
        match self {
            Dispatcher::Synthetic(synth) => {
                debug!(%endpoint, q = %query.q, "synthesizing payload");
                Ok(synth.payload(endpoint, query))
            }
            Dispatcher::Live { transport, base_url, api_key } => {
                let request = build_request(base_url, api_key, endpoint, query);
                debug!(%endpoint, q = %query.q, url = %request.url, "dispatching request");

                let outcome = transport.execute(&request).await;
                let result = classify(outcome, &query.q);
                if let Err(err) = &result {
                    warn!(%endpoint, q = %query.q, kind = ?err.kind(), "request failed: {err}");
                }
                result
            }
        }
    }
}

pub(crate) fn build_request(
    base_url: &str,
    api_key: &str,
    endpoint: Endpoint,
    query: &Query,
) -> OutboundRequest {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), endpoint.path());

    let mut params = vec![("q", query.q.clone())];
    if let Some(days) = query.days {
        params.push(("days", days.to_string()));
    }
    params.push(("key", api_key.to_owned()));

    OutboundRequest {
        url,
        query: params,
        headers: vec![("User-Agent", USER_AGENT), ("Accept", "application/json")],
    }
}

/// Map a transport outcome onto a payload or exactly one error kind.
pub(crate) fn classify(
    outcome: Result<RawResponse, TransportError>,
    q: &str,
) -> Result<Value, WeatherError> {
    let RawResponse { status, body } = match outcome {
        Ok(res) => res,
        Err(e) => {
            return Err(WeatherError::Upstream {
                status: None,
                message: e.message,
            });
        }
    };

    match status {
        200..=299 => serde_json::from_str(&body).map_err(|e| {
            WeatherError::malformed("$", "a JSON document", format!("unparsable body ({e})"))
        }),
        401 => Err(WeatherError::InvalidCredential),
        404 => Err(WeatherError::LocationNotFound(q.to_owned())),
        429 => Err(WeatherError::RateLimited),
        _ => Err(WeatherError::Upstream {
            status: Some(status),
            message: upstream_message(status, &body),
        }),
    }
}

/// Prefer the service's own `{"error": {"message": ...}}`, then the raw body,
/// then the reason phrase.
fn upstream_message(status: u16, body: &str) -> String {
    let structured = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_owned)
    });
    if let Some(message) = structured {
        return message;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return truncate_body(trimmed);
    }

    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("unknown status")
        .to_owned()
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_MESSAGE_LEN {
        return body.to_owned();
    }
    let mut end = MAX_MESSAGE_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn response(status: u16, body: &str) -> Result<RawResponse, TransportError> {
        Ok(RawResponse { status, body: body.to_owned() })
    }

    #[test]
    fn forecast_request_carries_days_key_and_headers() {
        let request = build_request(
            "https://api.weatherapi.com/v1/",
            "secret",
            Endpoint::Forecast,
            &Query::forecast("New York", 5),
        );

        assert_eq!(request.url, "https://api.weatherapi.com/v1/forecast.json");
        assert_eq!(
            request.query,
            vec![
                ("q", "New York".to_string()),
                ("days", "5".to_string()),
                ("key", "secret".to_string()),
            ]
        );
        assert!(request.headers.contains(&("User-Agent", "WeatherSDK/2.0")));
        assert!(request.headers.contains(&("Accept", "application/json")));
    }

    #[test]
    fn current_request_has_no_days() {
        let request = build_request("http://x", "k", Endpoint::Current, &Query::current("Oslo"));
        assert_eq!(request.url, "http://x/current.json");
        assert_eq!(request.query_value("days"), None);
    }

    #[test]
    fn success_body_is_parsed() {
        let value = classify(response(200, r#"{"location":{}}"#), "Oslo").unwrap();
        assert!(value.get("location").is_some());
    }

    #[test]
    fn unparsable_success_body_is_malformed() {
        let err = classify(response(200, "<html>"), "Oslo").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn status_codes_map_to_kinds() {
        assert_eq!(
            classify(response(401, ""), "Oslo").unwrap_err(),
            WeatherError::InvalidCredential
        );
        assert_eq!(
            classify(response(404, ""), "NonexistentCity").unwrap_err(),
            WeatherError::LocationNotFound("NonexistentCity".into())
        );
        assert_eq!(
            classify(response(429, ""), "Oslo").unwrap_err(),
            WeatherError::RateLimited
        );
    }

    #[test]
    fn other_statuses_are_upstream_errors() {
        for status in [300, 400, 403, 500, 503] {
            let err = classify(response(status, ""), "Oslo").unwrap_err();
            assert!(
                matches!(err, WeatherError::Upstream { status: Some(s), .. } if s == status),
                "status {status} gave {err:?}"
            );
        }
    }

    #[test]
    fn upstream_message_prefers_service_error() {
        let body = r#"{"error":{"code":1006,"message":"No matching location found."}}"#;
        let err = classify(response(400, body), "Oslo").unwrap_err();
        assert_eq!(
            err,
            WeatherError::Upstream {
                status: Some(400),
                message: "No matching location found.".into(),
            }
        );
    }

    #[test]
    fn empty_body_falls_back_to_reason_phrase() {
        let err = classify(response(500, ""), "Oslo").unwrap_err();
        assert_eq!(
            err,
            WeatherError::Upstream {
                status: Some(500),
                message: "Internal Server Error".into(),
            }
        );
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        let err = classify(response(502, &body), "Oslo").unwrap_err();
        match err {
            WeatherError::Upstream { message, .. } => {
                assert_eq!(message.len(), MAX_MESSAGE_LEN + 3);
                assert!(message.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn transport_failure_has_no_status() {
        let err = classify(Err(TransportError::new("connection refused")), "Oslo").unwrap_err();
        assert_eq!(
            err,
            WeatherError::Upstream {
                status: None,
                message: "connection refused".into(),
            }
        );
    }
}
