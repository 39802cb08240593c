//! Kalshi venue integration.
//!
//! This module handles:
//! - API environment selection (demo vs production)
//! - The REST client and its `GET /events` call
//! - Wire types for events and markets

pub mod client;
pub mod types;

pub use client::{KalshiClient, KalshiEnvironment, REQUEST_TIMEOUT};
pub use types::{Event, EventsResponse, Market, SettlementSource};
