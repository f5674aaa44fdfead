//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.
//! A missing file is not an error: the demo runs on built-in
//! defaults so it works out of the box.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - The file exists but can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let config = if path.exists() {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content).with_context(|| "Failed to parse config.toml")?
  } else {
    AppConfig::default()
  };

  validate_config(&config)?;

  info!(
    url = %config.feed.ws_url,
    topic = %config.feed.topic,
    retry_ms = config.feed.retry_delay_ms,
    "Configuration loaded"
  );

  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - A ws:// or wss:// feed endpoint
/// - A non-empty subscription topic
/// - Positive timer durations
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    config.feed.ws_url.starts_with("ws://") || config.feed.ws_url.starts_with("wss://"),
    "Feed URL must use the ws:// or wss:// scheme, got {:?}",
    config.feed.ws_url
  );
  anyhow::ensure!(
    !config.feed.topic.is_empty(),
    "Feed subscription topic must not be empty"
  );
  anyhow::ensure!(
    config.feed.retry_delay_ms > 0,
    "Feed retry_delay_ms must be positive"
  );

  anyhow::ensure!(
    config.ui.reset_close_ms > 0,
    "UI reset_close_ms must be positive"
  );
  anyhow::ensure!(
    config.ui.toast_ttl_ms > 0,
    "UI toast_ttl_ms must be positive"
  );

  anyhow::ensure!(
    !config.app.log_level.is_empty(),
    "Log level must not be empty"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_file_falls_back_to_defaults() {
    let config = load_config("nonexistent.toml").unwrap();
    assert_eq!(config.feed.topic, "EURUSD:CUR");
    assert_eq!(config.feed.retry_delay_ms, 1200);
  }

  #[test]
  fn test_defaults_pass_validation() {
    assert!(validate_config(&AppConfig::default()).is_ok());
  }

  #[test]
  fn test_rejects_non_websocket_scheme() {
    let mut config = AppConfig::default();
    config.feed.ws_url = "https://example.com/stream".to_string();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_rejects_zero_retry_delay() {
    let mut config = AppConfig::default();
    config.feed.retry_delay_ms = 0;
    assert!(validate_config(&config).is_err());
  }
}
