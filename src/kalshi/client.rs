//! Kalshi REST API client.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use strum::{Display, EnumString};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::config::KalshiConfig;
use crate::error::KalshiError;
use crate::metrics;

use super::types::EventsResponse;

/// Total per-request timeout applied by the HTTP transport.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const EVENTS_ENDPOINT: &str = "/events";

/// Kalshi API environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum KalshiEnvironment {
    /// Sandboxed environment without real funds.
    Demo,
    /// Live trading environment.
    Production,
}

impl KalshiEnvironment {
    /// Pick the environment from the config's `is_demo` flag.
    pub fn from_demo_flag(is_demo: bool) -> Self {
        if is_demo {
            KalshiEnvironment::Demo
        } else {
            KalshiEnvironment::Production
        }
    }

    /// Base URL of the trade API for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            KalshiEnvironment::Demo => "https://demo-api.kalshi.co/trade-api/v2",
            KalshiEnvironment::Production => "https://trading-api.kalshi.com/v2",
        }
    }
}

/// Kalshi trade API client.
///
/// Holds no per-request state; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct KalshiClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Environment the base URL was derived from.
    environment: KalshiEnvironment,
    /// Base URL, without a trailing slash.
    base_url: String,
    /// Total per-request timeout of `http`.
    request_timeout: Duration,
    /// Static API key; `None` sends anonymous requests.
    api_key: Option<String>,
}

impl KalshiClient {
    /// Create a client. Pass an empty `api_key` for unauthenticated requests.
    ///
    /// No network I/O happens here.
    pub fn new(api_key: &str, is_demo: bool) -> Result<Self, KalshiError> {
        Self::with_request_timeout(api_key, is_demo, REQUEST_TIMEOUT)
    }

    /// Like [`new`](Self::new), with a custom transport timeout.
    pub fn with_request_timeout(
        api_key: &str,
        is_demo: bool,
        request_timeout: Duration,
    ) -> Result<Self, KalshiError> {
        let environment = KalshiEnvironment::from_demo_flag(is_demo);

        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(KalshiError::Build)?;

        Ok(Self {
            http,
            environment,
            base_url: environment.base_url().to_string(),
            request_timeout,
            api_key: (!api_key.is_empty()).then(|| api_key.to_string()),
        })
    }

    /// Create a client from the `kalshi` config section.
    pub fn from_config(config: &KalshiConfig) -> Result<Self, KalshiError> {
        Self::new(&config.api_key, config.is_demo)
    }

    /// Point this client at a different host, e.g. a local test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the environment.
    pub fn environment(&self) -> KalshiEnvironment {
        self.environment
    }

    /// Get the transport timeout.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Whether requests carry an `Authorization` header.
    pub fn is_authenticated(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch the first page of events (`GET /events`).
    ///
    /// Returns [`KalshiError::Cancelled`] without sending anything if `cancel`
    /// has already fired, and aborts the in-flight request if it fires later.
    #[instrument(skip(self, cancel), fields(base_url = %self.base_url))]
    pub async fn list_events(
        &self,
        cancel: &CancellationToken,
    ) -> Result<EventsResponse, KalshiError> {
        if cancel.is_cancelled() {
            debug!("Cancelled before sending request");
            metrics::inc_http_requests(EVENTS_ENDPOINT, "cancelled");
            return Err(KalshiError::Cancelled {
                endpoint: EVENTS_ENDPOINT,
            });
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(KalshiError::Cancelled { endpoint: EVENTS_ENDPOINT }),
            result = self.get_json::<EventsResponse>(EVENTS_ENDPOINT) => result,
        };

        match &result {
            Ok(response) => {
                debug!(count = response.len(), "Decoded events response");
                metrics::add_events_fetched(response.len());
                metrics::inc_http_requests(EVENTS_ENDPOINT, "ok");
            }
            Err(e) => {
                warn!(error = %e, "List events request failed");
                metrics::inc_http_requests(EVENTS_ENDPOINT, outcome_label(e));
            }
        }

        result
    }

    /// [`list_events`](Self::list_events) bounded by `deadline`.
    ///
    /// Whichever of `deadline` and the transport timeout is shorter governs.
    pub async fn list_events_within(
        &self,
        deadline: Duration,
        cancel: &CancellationToken,
    ) -> Result<EventsResponse, KalshiError> {
        match tokio::time::timeout(deadline, self.list_events(cancel)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(deadline_ms = deadline.as_millis() as u64, "List events deadline exceeded");
                metrics::inc_http_requests(EVENTS_ENDPOINT, "deadline");
                Err(KalshiError::DeadlineExceeded {
                    endpoint: EVENTS_ENDPOINT,
                    deadline,
                })
            }
        }
    }

    /// GET `endpoint` and decode a 200 body as JSON.
    ///
    /// The response is owned here and dropped on every return path, so the
    /// connection is always released.
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, KalshiError> {
        let _timer = metrics::LatencyTimer::new(endpoint);
        let url = format!("{}{}", self.base_url, endpoint);

        let mut request = self.http.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("Api-Key {key}"));
        }

        let response = request
            .send()
            .await
            .map_err(|source| KalshiError::Transport { endpoint, source })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(KalshiError::UnexpectedStatus { endpoint, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| KalshiError::Transport { endpoint, source })?;

        debug!(bytes = body.len(), "Received response body");

        serde_json::from_slice(&body).map_err(|source| KalshiError::Decode { endpoint, source })
    }
}

fn outcome_label(err: &KalshiError) -> &'static str {
    match err {
        KalshiError::Build(_) | KalshiError::Transport { .. } => "transport",
        KalshiError::Cancelled { .. } => "cancelled",
        KalshiError::DeadlineExceeded { .. } => "deadline",
        KalshiError::UnexpectedStatus { .. } => "status",
        KalshiError::Decode { .. } => "decode",
    }
}
