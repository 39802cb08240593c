//! One-shot startup flow: load config, build the Kalshi client, fetch events.

use std::path::Path;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::kalshi::{Event, KalshiClient, KalshiEnvironment};

/// Deadline for the startup events fetch.
pub const FETCH_DEADLINE: Duration = Duration::from_secs(30);

/// Outcome of a single events fetch.
#[derive(Debug, Clone)]
pub struct FetchSummary {
    /// Environment the events came from.
    pub environment: KalshiEnvironment,
    /// Number of events on the page.
    pub event_count: usize,
    /// First event, if the page was not empty.
    pub first: Option<Event>,
}

impl FetchSummary {
    /// Human-readable confirmation line for the first event.
    pub fn example_line(&self) -> Option<String> {
        self.first
            .as_ref()
            .map(|event| format!("→ Example Event: {} ({})", event.title, event.ticker))
    }
}

/// Load the config file at `path` and build a Kalshi client from it.
pub fn client_from_config_file(path: &Path) -> Result<KalshiClient> {
    info!("Loading configuration from {}...", path.display());
    let config = Config::load(path)?;
    info!("Configuration loaded successfully");

    let client = KalshiClient::from_config(&config.kalshi)?;
    info!(
        "Initialized Kalshi client in {} mode",
        client.environment().to_string().to_uppercase()
    );

    Ok(client)
}

/// Fetch one page of events within `deadline` and summarise it.
#[instrument(skip(client, cancel), fields(environment = %client.environment()))]
pub async fn fetch_summary(
    client: &KalshiClient,
    deadline: Duration,
    cancel: &CancellationToken,
) -> Result<FetchSummary> {
    info!("Fetching events from Kalshi API...");
    let response = client.list_events_within(deadline, cancel).await?;
    info!("Successfully fetched {} events from Kalshi", response.len());

    let event_count = response.len();
    let first = response.events.into_iter().next();

    if let Some(event) = &first {
        debug!(
            markets = event.markets.len(),
            status = %event.status,
            expires_at = ?event.expires_at(),
            "First event details"
        );
    }

    Ok(FetchSummary {
        environment: client.environment(),
        event_count,
        first,
    })
}
