//! FX Ticker Demo — Entry Point
//!
//! A login-page demo for the terminal with a live EUR/USD ticker
//! streamed from the TradingEconomics guest WebSocket. Initializes
//! configuration, logging, and the feed connection manager, then runs
//! the interactive session until Ctrl-C or `quit`.
//!
//! Wiring sequence:
//! 1. Load config.toml (built-in defaults when absent) + validate
//! 2. Init tracing (stderr, so the panel owns stdout)
//! 3. Create and start the TradingEconomics feed (auto-reconnect)
//! 4. Spawn the interactive ticker session
//! 5. Wait for SIGINT or session exit → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

mod adapters;
mod config;
mod domain;
mod ports;
mod ui;

use adapters::feeds::TradingEconomicsFeed;
use ui::TickerSession;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize logging on stderr ─────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.app.log_level)
                }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        topic = %config.feed.topic,
        "Starting FX ticker demo"
    );

    // ── 3. Shutdown signal channel ──────────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);

    // ── 4. Create and start the live feed ───────────────────
    let feed = Arc::new(TradingEconomicsFeed::new(config.feed.clone()));
    feed.start();

    // ── 5. Spawn the interactive session ────────────────────
    let session_feed = Arc::clone(&feed);
    let session_ui = config.ui.clone();
    let session_shutdown = shutdown_tx.subscribe();
    let mut session_handle = tokio::spawn(async move {
        let mut session = TickerSession::new(session_feed, session_ui);
        if let Err(e) = session.run(session_shutdown).await {
            error!(error = %e, "ticker session failed");
        }
    });

    // ── 6. Wait for SIGINT or a local quit ──────────────────
    let session_done = tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
            false
        }
        _ = &mut session_handle => true,
    };

    // ── Graceful shutdown: freeze the feed, then the session ──
    feed.stop();
    let _ = shutdown_tx.send(());

    if !session_done {
        let _ = tokio::time::timeout(Duration::from_secs(5), session_handle).await;
    }

    info!("Shutdown complete");
    Ok(())
}
