//! Application configuration loaded from a YAML file.

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;
use crate::kalshi::KalshiEnvironment;

/// Application configuration loaded from `config.yaml`.
///
/// Every section and field is optional; anything absent (or explicitly null)
/// takes its zero value. No range or consistency checks are applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Kalshi credentials and environment.
    #[serde(deserialize_with = "null_as_default")]
    pub kalshi: KalshiConfig,

    /// Polymarket credentials.
    #[serde(deserialize_with = "null_as_default")]
    pub polymarket: PolymarketConfig,

    /// Bot risk parameters.
    #[serde(deserialize_with = "null_as_default")]
    pub bot: BotConfig,
}

/// Kalshi API settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct KalshiConfig {
    /// Static API key. Empty means anonymous requests.
    #[serde(deserialize_with = "null_as_default")]
    pub api_key: String,

    /// Use the demo environment instead of production.
    #[serde(deserialize_with = "null_as_default")]
    pub is_demo: bool,
}

impl KalshiConfig {
    /// Environment selected by `is_demo`.
    pub fn environment(&self) -> KalshiEnvironment {
        KalshiEnvironment::from_demo_flag(self.is_demo)
    }

    /// The API key, or `None` when it is empty.
    pub fn api_key(&self) -> Option<&str> {
        if self.api_key.is_empty() {
            None
        } else {
            Some(&self.api_key)
        }
    }
}

/// Polymarket settings. Not consumed by any client yet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PolymarketConfig {
    /// Wallet private key.
    #[serde(deserialize_with = "null_as_default")]
    pub private_key: String,
}

/// Bot risk parameters. Not consumed by any logic yet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Minimum profit required before acting on a spread.
    #[serde(deserialize_with = "null_as_default")]
    pub min_profit_threshold: f64,

    /// Maximum notional value of a single trade.
    #[serde(deserialize_with = "null_as_default")]
    pub max_trade_value: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Config {
    /// Path used when none is given on the command line.
    pub const DEFAULT_PATH: &'static str = "config.yaml";

    /// Read and parse the YAML file at `path`.
    ///
    /// The file is re-read on every call.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let contents = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml_slice(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from YAML text.
    ///
    /// An empty document (or one holding only comments) yields the default
    /// configuration.
    pub fn from_yaml_str(contents: &str) -> Result<Self, serde_yaml::Error> {
        Self::from_yaml_slice(contents.as_bytes())
    }

    /// Parse configuration from raw YAML bytes.
    ///
    /// Bytes that are not valid UTF-8 fail as a YAML error.
    pub fn from_yaml_slice(contents: &[u8]) -> Result<Self, serde_yaml::Error> {
        let value: serde_yaml::Value = serde_yaml::from_slice(contents)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(value)
    }
}
