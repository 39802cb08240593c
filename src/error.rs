//! Unified error types for the arbitrage bot.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Unified error type for the arbitrage bot.
#[derive(Error, Debug)]
pub enum BotError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Kalshi API error.
    #[error("kalshi error: {0}")]
    Kalshi(#[from] KalshiError),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be opened or read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML or does not match the config shape.
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        /// Path that was being parsed.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Kalshi REST client errors.
#[derive(Error, Debug)]
pub enum KalshiError {
    /// The HTTP transport could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// DNS, connect, TLS, timeout or body read failure.
    #[error("failed to execute GET {endpoint}: {source}")]
    Transport {
        /// Endpoint path, e.g. `/events`.
        endpoint: &'static str,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The caller cancelled the request.
    #[error("GET {endpoint} cancelled")]
    Cancelled {
        /// Endpoint path.
        endpoint: &'static str,
    },

    /// The caller-supplied deadline elapsed first.
    #[error("GET {endpoint} exceeded deadline of {}s", deadline.as_secs_f64())]
    DeadlineExceeded {
        /// Endpoint path.
        endpoint: &'static str,
        /// The deadline that elapsed.
        deadline: Duration,
    },

    /// Any status other than 200 OK.
    #[error("GET {endpoint} failed with status: {status}")]
    UnexpectedStatus {
        /// Endpoint path.
        endpoint: &'static str,
        /// Status line returned by the server.
        status: reqwest::StatusCode,
    },

    /// The 200 body was not the expected JSON shape.
    #[error("failed to decode GET {endpoint} response: {source}")]
    Decode {
        /// Endpoint path.
        endpoint: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl KalshiError {
    /// True for failures that happened before a response was available:
    /// transport faults, cancellation and deadline expiry.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            KalshiError::Transport { .. }
                | KalshiError::Cancelled { .. }
                | KalshiError::DeadlineExceeded { .. }
        )
    }

    /// HTTP status, if the server answered with a non-200.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            KalshiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_status_line() {
        let err = KalshiError::UnexpectedStatus {
            endpoint: "/events",
            status: reqwest::StatusCode::NOT_FOUND,
        };

        assert_eq!(err.to_string(), "GET /events failed with status: 404 Not Found");
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
        assert!(!err.is_transport());
    }

    #[test]
    fn cancellation_and_deadline_are_transport_class() {
        let cancelled = KalshiError::Cancelled { endpoint: "/events" };
        let deadline = KalshiError::DeadlineExceeded {
            endpoint: "/events",
            deadline: Duration::from_secs(30),
        };

        assert!(cancelled.is_transport());
        assert!(deadline.is_transport());
        assert_eq!(deadline.to_string(), "GET /events exceeded deadline of 30s");
    }

    #[test]
    fn bot_error_wraps_both_layers() {
        let config: BotError = ConfigError::Read {
            path: PathBuf::from("config.yaml"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        }
        .into();
        let kalshi: BotError = KalshiError::Cancelled { endpoint: "/events" }.into();

        assert!(matches!(config, BotError::Config(ConfigError::Read { .. })));
        assert!(config.to_string().starts_with("configuration error: failed to read config file config.yaml"));
        assert!(matches!(kalshi, BotError::Kalshi(KalshiError::Cancelled { .. })));
        assert_eq!(kalshi.to_string(), "kalshi error: GET /events cancelled");
    }

    #[test]
    fn config_error_names_the_path() {
        let err = ConfigError::Read {
            path: PathBuf::from("missing.yaml"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };

        assert!(err.to_string().starts_with("failed to read config file missing.yaml"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
