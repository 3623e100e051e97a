//! Real-time odds feed: a WebSocket consumer with reconnect and
//! snapshot reconciliation.
//!
//! The feed owns a single connection to the streaming endpoint. Every
//! decoded `created`/`updated`/`deleted` record mutates a shared
//! [`SnapshotStore`]; unexpected closes are retried with bounded
//! exponential backoff until the attempt budget is spent, at which
//! point the task resolves with [`Error::ReconnectExhausted`].
//!
//! # Example
//!
//! ```no_run
//! use odds_api_client::{FeedConfig, OddsFeed};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), odds_api_client::Error> {
//!     let mut config = FeedConfig::new("your-api-key", ["ML", "Spread"]);
//!     config.sports = vec!["football".to_string()];
//!
//!     let feed = OddsFeed::new(config)?;
//!     let store = feed.store();
//!     let done = feed.start()?;
//!
//!     // ... read `store` while the feed runs, then:
//!     feed.stop();
//!     done.await.expect("feed task panicked")?;
//!     Ok(())
//! }
//! ```

mod config;
mod message;
mod reconnect;
mod snapshot;
mod store;

pub use config::{FeedConfig, FeedStatus};
pub use message::{FeedMessage, OddsUpdate, Welcome, decode_frame};
pub use reconnect::ReconnectPolicy;
pub use snapshot::SnapshotLoader;
pub use store::SnapshotStore;

use crate::client::OddsApiClient;
use crate::error::Error;
use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use url::Url;

/// Lifecycle state of the feed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    /// No connection and none being established.
    Disconnected,
    /// Connection attempt in progress.
    Connecting,
    /// Connected and streaming.
    Open,
    /// `stop()` was called and the connection is being torn down.
    Closing,
}

/// Real-time odds feed client.
///
/// Owns exactly one active connection at a time. [`start`](Self::start)
/// spawns the connection task; [`stop`](Self::stop) tears everything
/// down deterministically from any state.
pub struct OddsFeed {
    config: FeedConfig,
    store: Arc<SnapshotStore>,
    state: Arc<RwLock<FeedState>>,
    welcome: Arc<RwLock<Option<Welcome>>>,
    shutdown: CancellationToken,
    started: AtomicBool,
}

impl OddsFeed {
    /// Creates a feed for the given connection parameters.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFilter`] if a filter is out of range.
    pub fn new(config: FeedConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config,
            store: Arc::new(SnapshotStore::new()),
            state: Arc::new(RwLock::new(FeedState::Disconnected)),
            welcome: Arc::new(RwLock::new(None)),
            shutdown: CancellationToken::new(),
            started: AtomicBool::new(false),
        })
    }

    /// The shared snapshot of current odds.
    #[must_use]
    pub fn store(&self) -> Arc<SnapshotStore> {
        Arc::clone(&self.store)
    }

    /// Current connection state.
    #[must_use]
    pub fn state(&self) -> FeedState {
        *self.state.read()
    }

    /// The most recent `welcome` message recorded on this feed, if any.
    /// Diagnostic only; the server replays one on every fresh session.
    #[must_use]
    pub fn welcome(&self) -> Option<Welcome> {
        self.welcome.read().clone()
    }

    /// Populates the store over REST before streaming starts, so no
    /// update is missed during connection setup. Call before
    /// [`start`](Self::start); per-event failures are logged and
    /// skipped. Returns the number of events loaded.
    pub async fn preload(&self, client: &OddsApiClient, bookmakers: &[String]) -> usize {
        SnapshotLoader::new(client, bookmakers)
            .load(&self.config, &self.store)
            .await
    }

    /// Connects and streams in a background task.
    ///
    /// The returned handle resolves to `Ok(())` once [`stop`](Self::stop)
    /// completes the shutdown, or to [`Error::ReconnectExhausted`] when
    /// the reconnect budget is spent. That error is the terminal
    /// give-up signal for whoever owns the feed lifecycle.
    ///
    /// # Errors
    /// Returns [`Error::FeedAlreadyStarted`] on a second call.
    pub fn start(&self) -> Result<JoinHandle<Result<(), Error>>, Error> {
        let url = self.config.feed_url()?;
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(Error::FeedAlreadyStarted);
        }

        let config = self.config.clone();
        let store = Arc::clone(&self.store);
        let state = Arc::clone(&self.state);
        let welcome = Arc::clone(&self.welcome);
        let shutdown = self.shutdown.clone();

        Ok(tokio::spawn(async move {
            let result = run_feed(&config, &url, &store, &state, &welcome, &shutdown).await;
            *state.write() = FeedState::Disconnected;
            result
        }))
    }

    /// Stops the feed: cancels a pending reconnect timer, stops the
    /// keepalive prober and closes the connection if one is open.
    /// Idempotent and safe to call in any state.
    pub fn stop(&self) {
        {
            let mut state = self.state.write();
            if matches!(*state, FeedState::Connecting | FeedState::Open) {
                *state = FeedState::Closing;
            }
        }
        self.shutdown.cancel();
    }
}

/// Connection loop: connect, stream until close, then ask the
/// reconnect policy for the next action.
async fn run_feed(
    config: &FeedConfig,
    url: &Url,
    store: &Arc<SnapshotStore>,
    state: &Arc<RwLock<FeedState>>,
    welcome: &Arc<RwLock<Option<Welcome>>>,
    shutdown: &CancellationToken,
) -> Result<(), Error> {
    let mut reconnect = ReconnectPolicy::new(
        config.reconnect_base_delay,
        config.reconnect_max_delay,
        config.max_reconnect_attempts,
    );

    loop {
        if shutdown.is_cancelled() {
            return Ok(());
        }

        *state.write() = FeedState::Connecting;

        match connect_and_stream(config, url, store, state, welcome, &mut reconnect, shutdown)
            .await
        {
            Ok(()) => {
                info!("odds feed stopped");
                return Ok(());
            }
            Err(e) => {
                warn!(error = %e, "odds feed connection lost");
                *state.write() = FeedState::Disconnected;

                // stop() may have raced the close; never reconnect past it.
                if shutdown.is_cancelled() {
                    return Ok(());
                }

                match reconnect.next_delay() {
                    Some(delay) => {
                        info!(
                            delay_ms = delay.as_millis() as u64,
                            attempt = reconnect.current_attempt(),
                            "scheduling reconnect"
                        );
                        tokio::select! {
                            () = tokio::time::sleep(delay) => {}
                            () = shutdown.cancelled() => {
                                info!("stop requested during reconnect backoff");
                                return Ok(());
                            }
                        }
                    }
                    None => {
                        let attempts = reconnect.max_attempts();
                        error!(attempts, "reconnect attempts exhausted, giving up");
                        return Err(Error::ReconnectExhausted { attempts });
                    }
                }
            }
        }
    }
}

/// Runs a single connection: decode frames, probe liveness, honor
/// cancellation. Returns `Ok` only on a requested stop.
async fn connect_and_stream(
    config: &FeedConfig,
    url: &Url,
    store: &Arc<SnapshotStore>,
    state: &Arc<RwLock<FeedState>>,
    welcome: &Arc<RwLock<Option<Welcome>>>,
    reconnect: &mut ReconnectPolicy,
    shutdown: &CancellationToken,
) -> Result<(), Error> {
    debug!(endpoint = %config.url, "connecting to odds feed");

    let (ws_stream, _) = connect_async(url.as_str()).await.map_err(Box::new)?;

    *state.write() = FeedState::Open;
    reconnect.reset();
    info!("odds feed connected");

    let (mut write, mut read) = ws_stream.split();

    // First ping one interval after open, not immediately.
    let mut keepalive = tokio::time::interval_at(
        tokio::time::Instant::now() + config.keepalive_interval,
        config.keepalive_interval,
    );

    loop {
        tokio::select! {
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        for message in decode_frame(text.as_str()) {
                            apply_message(message, store, welcome);
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = write.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let reason = frame
                            .map(|f| f.reason.to_string())
                            .unwrap_or_else(|| "close frame".to_string());
                        return Err(Error::ConnectionClosed(reason));
                    }
                    Some(Err(e)) => {
                        return Err(Error::ConnectionClosed(e.to_string()));
                    }
                    None => {
                        return Err(Error::ConnectionClosed("stream ended".to_string()));
                    }
                    Some(Ok(_)) => {}
                }
            }
            _ = keepalive.tick() => {
                // A failed probe is not fatal in itself; the close it
                // provokes goes through the normal reconnect path.
                write
                    .send(Message::Ping(Vec::new().into()))
                    .await
                    .map_err(|e| Error::ConnectionClosed(e.to_string()))?;
            }
            () = shutdown.cancelled() => {
                *state.write() = FeedState::Closing;
                let _ = write.send(Message::Close(None)).await;
                return Ok(());
            }
        }
    }
}

/// Routes one decoded message into the store.
fn apply_message(
    message: FeedMessage,
    store: &SnapshotStore,
    welcome: &RwLock<Option<Welcome>>,
) {
    match message {
        FeedMessage::Welcome(w) => {
            info!(message = w.message.as_deref().unwrap_or(""), "feed session established");
            *welcome.write() = Some(w);
        }
        FeedMessage::Created(update) | FeedMessage::Updated(update) => {
            store.upsert(update.id, update.bookie, update.markets);
        }
        FeedMessage::Deleted { id, bookie, .. } => {
            store.remove(&id, &bookie);
        }
        FeedMessage::NoMarkets { id, .. } => {
            debug!(event = %id, "no markets for event");
        }
        FeedMessage::Unknown => {}
    }
}
