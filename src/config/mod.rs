//! Configuration Module - TOML-based Demo Configuration
//!
//! Loads configuration from `config.toml`. Every field carries a serde
//! default so a partial file (or no file at all) still yields a runnable
//! demo. The endpoint URL, subscription topic, retry delay, and UI timer
//! durations are all externalized here - nothing is hardcoded in the
//! domain layer.

pub mod loader;

use std::time::Duration;

use serde::Deserialize;

/// Top-level demo configuration.
///
/// Loaded from `config.toml` at startup, validated before the feed
/// connects. Falls back to built-in defaults when the file is absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Application identity and logging.
  #[serde(default)]
  pub app: DemoConfig,
  /// Streaming feed endpoint and retry settings.
  #[serde(default)]
  pub feed: FeedConfig,
  /// Presentation-layer timer durations.
  #[serde(default)]
  pub ui: UiConfig,
}

/// Application identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
  /// Human-readable application name.
  #[serde(default = "default_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

impl Default for DemoConfig {
  fn default() -> Self {
    Self {
      name: default_name(),
      log_level: default_log_level(),
    }
  }
}

/// Streaming feed configuration.
///
/// The guest endpoint and the single subscribed topic mirror the demo's
/// fixed upstream; they are configurable so tests can point the feed at
/// an in-process server.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
  /// WebSocket endpoint with guest credentials in the query string.
  #[serde(default = "default_ws_url")]
  pub ws_url: String,
  /// Symbol topic subscribed to right after the socket opens.
  #[serde(default = "default_topic")]
  pub topic: String,
  /// Fixed reconnect delay in milliseconds. No backoff, no jitter.
  #[serde(default = "default_retry_delay_ms")]
  pub retry_delay_ms: u64,
}

impl Default for FeedConfig {
  fn default() -> Self {
    Self {
      ws_url: default_ws_url(),
      topic: default_topic(),
      retry_delay_ms: default_retry_delay_ms(),
    }
  }
}

impl FeedConfig {
  /// Reconnect delay as a `Duration`.
  pub fn retry_delay(&self) -> Duration {
    Duration::from_millis(self.retry_delay_ms)
  }
}

/// Presentation-layer timer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
  /// Delay before the reset dialog auto-closes after an accepted submit.
  #[serde(default = "default_reset_close_ms")]
  pub reset_close_ms: u64,
  /// Lifetime of transient toast messages.
  #[serde(default = "default_toast_ttl_ms")]
  pub toast_ttl_ms: u64,
}

impl Default for UiConfig {
  fn default() -> Self {
    Self {
      reset_close_ms: default_reset_close_ms(),
      toast_ttl_ms: default_toast_ttl_ms(),
    }
  }
}

impl UiConfig {
  /// Reset dialog auto-close delay as a `Duration`.
  pub fn reset_close(&self) -> Duration {
    Duration::from_millis(self.reset_close_ms)
  }

  /// Transient toast lifetime as a `Duration`.
  pub fn toast_ttl(&self) -> Duration {
    Duration::from_millis(self.toast_ttl_ms)
  }
}

// Default value functions for serde

fn default_name() -> String {
  "fx-ticker-demo".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_ws_url() -> String {
  "ws://stream.tradingeconomics.com/?client=guest:guest".to_string()
}

fn default_topic() -> String {
  "EURUSD:CUR".to_string()
}

fn default_retry_delay_ms() -> u64 {
  1200
}

fn default_reset_close_ms() -> u64 {
  900
}

fn default_toast_ttl_ms() -> u64 {
  1600
}
