//! Ticker Feed Port - Read-only Feed State Interface
//!
//! Defines the trait through which the presentation layer observes the
//! live feed. Consumers get immutable snapshots and change notifications;
//! nothing here lets a consumer drive the connection lifecycle.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::snapshot::FeedSnapshot;

/// Trait for live ticker state providers.
///
/// Implementors own the streaming connection and publish every state
/// transition as a fresh snapshot. The hexagonal architecture ensures
/// the presentation layer never depends on transport details.
#[async_trait]
pub trait TickerFeed: Send + Sync + 'static {
  /// Current point-in-time snapshot of the feed state.
  fn snapshot(&self) -> FeedSnapshot;

  /// Subscribe to state changes.
  ///
  /// Returns a watch receiver whose value is replaced on every
  /// transition; slow consumers simply observe the latest state.
  fn subscribe(&self) -> watch::Receiver<FeedSnapshot>;

  /// Whether the streaming connection is currently established.
  async fn is_healthy(&self) -> bool;
}
