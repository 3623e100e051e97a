//! Typed client for the Odds-API sports-odds service.
//!
//! This crate wraps the Odds-API REST endpoints with typed request
//! builders and status-classified errors, and provides a real-time
//! odds feed consumer with reconnect, keepalive and snapshot
//! reconciliation.
//!
//! # Example
//!
//! ```no_run
//! use odds_api_client::{GetEventsParams, OddsApiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), odds_api_client::Error> {
//!     let client = OddsApiClient::with_api_key("your-api-key")?;
//!
//!     let events = client
//!         .list_events(&GetEventsParams {
//!             sport: "basketball".into(),
//!             league: Some("usa-nba".into()),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("{} events found", events.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! See [`OddsFeed`] for the streaming side.

mod client;
mod error;
mod feed;
mod types;

pub use client::{ClientConfig, OddsApiClient};
pub use error::Error;
pub use feed::{
    FeedConfig, FeedMessage, FeedState, FeedStatus, OddsFeed, OddsUpdate, ReconnectPolicy,
    SnapshotLoader, SnapshotStore, Welcome, decode_frame,
};
pub use types::*;
