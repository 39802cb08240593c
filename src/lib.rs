//! Kalshi/Polymarket prediction-market arbitrage bot skeleton.
//!
//! The crate currently covers the plumbing a cross-venue arbitrage bot is
//! built around: loading credentials and risk parameters from YAML, and a
//! Kalshi REST client that can list events. Spread detection, order
//! execution and the Polymarket client are not implemented yet.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from `config.yaml`
//! - [`error`]: Unified error types
//! - [`fetch`]: One-shot config-to-events startup flow
//! - [`kalshi`]: Kalshi environments, REST client and wire types
//! - [`metrics`]: Request latency and outcome metrics

pub mod config;
pub mod error;
pub mod fetch;
pub mod kalshi;
pub mod metrics;

pub use config::Config;
pub use error::{BotError, ConfigError, KalshiError, Result};
