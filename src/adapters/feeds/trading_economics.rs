//! TradingEconomics WebSocket Feed - Live EUR/USD Price Source
//!
//! Connects to the TradingEconomics guest stream, subscribes to a single
//! currency topic, and keeps the latest `FeedSnapshot` current through a
//! watch channel. Owns the entire connect/subscribe/retry lifecycle:
//!
//! - explicit `start()` / `stop()`, both idempotent
//! - fixed-delay reconnect with at most one pending retry timer
//! - defensive frame normalization; a malformed frame never reaches the UI
//!
//! Event-driven via tokio::select! (never polling). The whole manager is
//! one logical task, so inbound messages are handled strictly in receipt
//! order.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, instrument, warn};

use crate::config::FeedConfig;
use crate::domain::normalize::normalize_frame;
use crate::domain::snapshot::{FeedSnapshot, FeedStatus};
use crate::ports::ticker_feed::TickerFeed;

/// Advisory shown when a socket cannot be opened at all. Some sandboxed
/// environments block plain ws:// connections entirely, and the user
/// should know the demo is degraded rather than broken.
pub const WS_BLOCKED_ADVISORY: &str = "WebSocket error (some environments block ws:// \
     connections). Try running from a local server or a different network.";

/// Subscribe request sent as a text frame right after the socket opens.
#[derive(Serialize)]
struct SubscribeMsg<'a> {
    topic: &'a str,
    to: &'a str,
}

/// How a single WebSocket session ended.
enum SessionEnd {
    /// Shutdown signal received while the session was live.
    Shutdown,
    /// Peer closed, the stream ended, or it errored after being open.
    Closed,
}

/// State shared between the feed handle and its connect-loop task.
struct Shared {
    /// Endpoint, topic, and retry settings.
    config: FeedConfig,
    /// Latest snapshot, readable by any number of consumers.
    snapshot_tx: watch::Sender<FeedSnapshot>,
    /// True between construction and `stop()`; gates every publish.
    alive: AtomicBool,
    /// Serializes the liveness check with publication so `stop()` wins
    /// races against connection events already in flight.
    publish_gate: Mutex<()>,
    /// Shutdown broadcaster for the connect loop.
    shutdown_tx: broadcast::Sender<()>,
}

impl Shared {
    /// Liveness-checked snapshot publication. After `stop()` this is a
    /// no-op, so a late event cannot mutate observable state.
    fn publish<F>(&self, transition: F)
    where
        F: FnOnce(&FeedSnapshot) -> FeedSnapshot,
    {
        let _gate = self
            .publish_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !self.alive.load(Ordering::SeqCst) {
            return;
        }
        let next = transition(&self.snapshot_tx.borrow().clone());
        self.snapshot_tx.send_replace(next);
    }

    /// Connect loop: one iteration per session attempt.
    ///
    /// The single retry sleep at the bottom is the only reconnect timer,
    /// so an error and a close reported for the same failed attempt can
    /// never schedule two retries. Retries continue until `stop()`;
    /// there is no attempt cap.
    #[instrument(skip(self), fields(url = %self.config.ws_url, topic = %self.config.topic))]
    async fn run(&self) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            if !self.alive.load(Ordering::SeqCst) {
                return;
            }

            self.publish(FeedSnapshot::connecting);

            match self.connect_and_stream(&mut shutdown_rx).await {
                Ok(SessionEnd::Shutdown) => return,
                Ok(SessionEnd::Closed) => {
                    self.publish(FeedSnapshot::disconnected);
                    debug!(
                        delay_ms = self.config.retry_delay_ms,
                        "ticker stream closed, reconnect scheduled"
                    );
                }
                Err(e) => {
                    warn!(error = %e, "could not open ticker stream");
                    self.publish(|s| s.erroring(WS_BLOCKED_ADVISORY));
                }
            }

            tokio::select! {
                _ = shutdown_rx.recv() => return,
                () = tokio::time::sleep(self.config.retry_delay()) => {}
            }
        }
    }

    /// Single session: connect, subscribe, stream until close or shutdown.
    ///
    /// `Err` strictly means the socket never opened; every post-open
    /// failure maps to `SessionEnd::Closed` so the caller applies the
    /// plain disconnect-and-retry path.
    async fn connect_and_stream(
        &self,
        shutdown_rx: &mut broadcast::Receiver<()>,
    ) -> Result<SessionEnd> {
        let (ws_stream, _) = connect_async(&self.config.ws_url)
            .await
            .context("ticker WebSocket connection failed")?;

        let (mut write, mut read) = ws_stream.split();

        let subscribe = serde_json::to_string(&SubscribeMsg {
            topic: "subscribe",
            to: &self.config.topic,
        })
        .context("failed to encode subscribe request")?;

        if let Err(e) = write.send(Message::Text(subscribe)).await {
            debug!(error = %e, "subscribe send failed, treating as close");
            return Ok(SessionEnd::Closed);
        }

        self.publish(FeedSnapshot::connected);
        info!(topic = %self.config.topic, "ticker stream connected");

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    return Ok(SessionEnd::Shutdown);
                }
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => self.handle_frame(&text),
                        Some(Ok(Message::Ping(data))) => {
                            // Pong is handled automatically by tungstenite
                            debug!(len = data.len(), "ticker ping received");
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            return Ok(SessionEnd::Closed);
                        }
                        Some(Err(e)) => {
                            debug!(error = %e, "ticker stream errored");
                            return Ok(SessionEnd::Closed);
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    /// Normalize one inbound text frame and fold it into the snapshot.
    /// Unrecognizable frames are dropped without touching state.
    fn handle_frame(&self, text: &str) {
        match normalize_frame(text) {
            Some(update) => {
                debug!(price = ?update.price, "tick applied");
                self.publish(|s| s.apply(&update));
            }
            None => debug!("unrecognized ticker frame ignored"),
        }
    }
}

/// TradingEconomics feed adapter implementing the `TickerFeed` port.
///
/// One instance owns one upstream connection. `start()` spawns the
/// connect loop; `stop()` tears it down and freezes the snapshot. Both
/// are safe to call repeatedly and from any state.
pub struct TradingEconomicsFeed {
    shared: Arc<Shared>,
    /// Guards against a second `start()` spawning a second loop.
    started: AtomicBool,
}

impl TradingEconomicsFeed {
    /// Create a new feed for the configured endpoint and topic. The
    /// initial snapshot is Disconnected with no data.
    pub fn new(config: FeedConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(FeedSnapshot::new(config.topic.clone()));
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            shared: Arc::new(Shared {
                config,
                snapshot_tx,
                alive: AtomicBool::new(true),
                publish_gate: Mutex::new(()),
                shutdown_tx,
            }),
            started: AtomicBool::new(false),
        }
    }

    /// Begin the connect loop. Idempotent: only the first call spawns
    /// the task. Failures surface through snapshots, never here.
    pub fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            shared.run().await;
            debug!("ticker connect loop exited");
        });
    }

    /// Stop the feed: cancel any pending retry, close any open
    /// connection, and suppress all further snapshot updates. The
    /// terminal state is Disconnected. Safe to call multiple times.
    pub fn stop(&self) {
        let terminal = {
            let _gate = self
                .shared
                .publish_gate
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            if !self.shared.alive.swap(false, Ordering::SeqCst) {
                return;
            }
            self.shared.snapshot_tx.borrow().disconnected()
        };

        self.shared.snapshot_tx.send_replace(terminal);
        let _ = self.shared.shutdown_tx.send(());
        info!("ticker feed stopped");
    }
}

#[async_trait]
impl TickerFeed for TradingEconomicsFeed {
    fn snapshot(&self) -> FeedSnapshot {
        self.shared.snapshot_tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    async fn is_healthy(&self) -> bool {
        self.snapshot().status == FeedStatus::Connected
    }
}
