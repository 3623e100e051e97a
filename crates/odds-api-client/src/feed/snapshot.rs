//! Initial snapshot loading from the REST API.

use super::config::{FeedConfig, FeedStatus};
use super::store::SnapshotStore;
use crate::client::OddsApiClient;
use crate::types::{EventStatus, GetEventsParams, GetOddsParams};
use tracing::{debug, info, warn};

/// Populates a [`SnapshotStore`] from the REST API before streaming
/// starts, so nothing is missed in the window between snapshot and
/// stream.
///
/// Events are fetched one at a time to bound load on the API. A
/// failing event is logged and skipped as a unit; the rest of the
/// snapshot still loads. A total API outage yields an empty snapshot,
/// not an error.
pub struct SnapshotLoader<'a> {
    client: &'a OddsApiClient,
    bookmakers: String,
}

impl<'a> SnapshotLoader<'a> {
    /// Creates a loader that fetches odds quoted by the given
    /// bookmakers.
    #[must_use]
    pub fn new(client: &'a OddsApiClient, bookmakers: &[String]) -> Self {
        Self {
            client,
            bookmakers: bookmakers.join(","),
        }
    }

    /// Loads current odds for every event matching the feed filters,
    /// writing them exactly as streamed `created` messages would.
    ///
    /// Returns the number of events whose odds were stored.
    pub async fn load(&self, config: &FeedConfig, store: &SnapshotStore) -> usize {
        let mut loaded = 0;

        for event_id in self.list_event_ids(config).await {
            let params = GetOddsParams {
                event_id: event_id.clone(),
                bookmakers: self.bookmakers.clone(),
            };
            match self.client.get_event_odds(&params).await {
                Ok(odds) => {
                    for (bookmaker, markets) in odds.bookmakers {
                        store.upsert(event_id.clone(), bookmaker, markets);
                    }
                    loaded += 1;
                }
                Err(e) => {
                    warn!(event = %event_id, error = %e, "skipping event in initial snapshot");
                }
            }
        }

        info!(events = loaded, "initial snapshot loaded");
        loaded
    }

    /// Enumerates event ids for the configured sport/league/status
    /// filters. A failing query is logged and skipped.
    async fn list_event_ids(&self, config: &FeedConfig) -> Vec<String> {
        if config.sports.is_empty() {
            debug!("no sport filter configured, nothing to preload");
            return Vec::new();
        }

        // The feed says "prematch"; the REST vocabulary says "upcoming".
        let status = config.status.map(|s| match s {
            FeedStatus::Live => EventStatus::Live,
            FeedStatus::Prematch => EventStatus::Upcoming,
        });

        let mut queries = Vec::new();
        for sport in &config.sports {
            if config.leagues.is_empty() {
                queries.push((sport.clone(), None));
            } else {
                for league in &config.leagues {
                    queries.push((sport.clone(), Some(league.clone())));
                }
            }
        }

        let mut ids = Vec::new();
        for (sport, league) in queries {
            let params = GetEventsParams {
                sport,
                league,
                status,
                ..Default::default()
            };
            match self.client.list_events(&params).await {
                Ok(events) => ids.extend(events.into_iter().map(|e| e.id)),
                Err(e) => {
                    warn!(error = %e, "skipping event query in initial snapshot");
                }
            }
        }

        ids.sort();
        ids.dedup();
        ids
    }
}
