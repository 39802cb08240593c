//! Wire types for the Kalshi trade API.

use serde::{Deserialize, Deserializer};
use time::OffsetDateTime;

/// Response envelope of `GET /events`.
///
/// Only the first page is modeled; the upstream cursor is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EventsResponse {
    /// Events in the order the server returned them.
    #[serde(deserialize_with = "null_as_empty")]
    pub events: Vec<Event>,
}

impl EventsResponse {
    /// Number of events in this page.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the page holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// First event, if any.
    pub fn first(&self) -> Option<&Event> {
        self.events.first()
    }
}

/// A group of markets sharing one real-world outcome question.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Unique event ticker (e.g., "KXFEDDECISION-25DEC").
    pub ticker: String,
    /// Parent series ticker.
    pub series_ticker: String,
    /// Human-readable title.
    pub title: String,
    /// Event status as reported by Kalshi.
    pub status: String,
    /// Expiration as Unix seconds.
    pub expiration_ts: i64,
    /// Nested markets, if the server included them.
    #[serde(deserialize_with = "null_as_empty")]
    pub markets: Vec<Market>,
    /// Sources used to settle the event.
    #[serde(deserialize_with = "null_as_empty")]
    pub settlement_sources: Vec<SettlementSource>,
}

impl Event {
    /// Expiration time, or `None` if unset or out of range.
    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        if self.expiration_ts <= 0 {
            return None;
        }
        OffsetDateTime::from_unix_timestamp(self.expiration_ts).ok()
    }
}

/// A named settlement source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SettlementSource {
    /// Source name.
    pub name: String,
    /// Source URL.
    pub url: String,
}

/// A single binary contract. All prices are in cents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Market {
    /// Market ticker.
    pub ticker: String,
    /// Market title.
    pub title: String,
    /// Best YES bid.
    pub yes_bid: i64,
    /// Best YES ask.
    pub yes_ask: i64,
    /// Best NO bid.
    pub no_bid: i64,
    /// Best NO ask.
    pub no_ask: i64,
    /// Last traded price.
    pub last_price: i64,
    /// Previous reference price.
    pub previous_price: i64,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
