//! Feed connection state as immutable snapshots.
//!
//! The feed manager owns a single `FeedSnapshot` and replaces it wholesale
//! on every transition; consumers only ever see point-in-time copies.
//! Each combinator below produces the next snapshot from the previous one
//! plus a delta, so state transitions stay easy to assert in tests.

use serde::{Deserialize, Serialize};

/// Connection status of the ticker feed. Mutually exclusive states,
/// driven only by the feed manager's connect loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedStatus {
    /// No connection and no attempt in progress.
    Disconnected,
    /// A connection attempt is in flight.
    Connecting,
    /// Socket open and subscribed.
    Connected,
    /// The last attempt could not open a socket at all.
    Erroring,
}

impl std::fmt::Display for FeedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
            Self::Erroring => write!(f, "erroring"),
        }
    }
}

/// Upstream timestamp stored verbatim.
///
/// The source emits either a numeric epoch in milliseconds or an
/// ISO-like string; conversion to calendar time happens at display
/// time, never at storage time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimestampValue {
    /// Numeric epoch milliseconds, as sent by the source.
    Epoch(f64),
    /// String timestamp, as sent by the source.
    Text(String),
}

/// Delta extracted from one inbound frame.
///
/// Price and timestamp update independently: a frame carrying only one
/// of them leaves the other field of the snapshot untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickUpdate {
    /// New price, already coerced to a finite f64.
    pub price: Option<f64>,
    /// New timestamp, stored verbatim.
    pub timestamp: Option<TimestampValue>,
}

impl TickUpdate {
    /// True when the frame contributed neither field.
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.timestamp.is_none()
    }
}

/// Immutable point-in-time state of the feed connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSnapshot {
    /// Current connection status.
    pub status: FeedStatus,
    /// Advisory message from the last transport failure. Cleared on a
    /// successful connect or message.
    pub last_error: Option<String>,
    /// Latest known price. Replaced, never merged.
    pub latest_price: Option<f64>,
    /// Latest known upstream timestamp, verbatim.
    pub latest_timestamp: Option<TimestampValue>,
    /// The symbol this feed is subscribed to.
    pub topic: String,
}

impl FeedSnapshot {
    /// Initial state for a freshly constructed feed.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            status: FeedStatus::Disconnected,
            last_error: None,
            latest_price: None,
            latest_timestamp: None,
            topic: topic.into(),
        }
    }

    /// A connection attempt is starting; any stale error is cleared.
    #[must_use]
    pub fn connecting(&self) -> Self {
        Self {
            status: FeedStatus::Connecting,
            last_error: None,
            ..self.clone()
        }
    }

    /// The socket opened and the subscribe request went out.
    #[must_use]
    pub fn connected(&self) -> Self {
        Self {
            status: FeedStatus::Connected,
            last_error: None,
            ..self.clone()
        }
    }

    /// The peer or the network closed the connection. Keeps any advisory
    /// from an earlier failed open so the user still sees it during the
    /// retry wait.
    #[must_use]
    pub fn disconnected(&self) -> Self {
        Self {
            status: FeedStatus::Disconnected,
            ..self.clone()
        }
    }

    /// The socket could not be opened at all.
    #[must_use]
    pub fn erroring(&self, advisory: &str) -> Self {
        Self {
            status: FeedStatus::Erroring,
            last_error: Some(advisory.to_string()),
            ..self.clone()
        }
    }

    /// Apply a normalized tick. Fields present in the delta replace the
    /// stored values; absent fields are left untouched. A successful
    /// receive always clears the error.
    #[must_use]
    pub fn apply(&self, update: &TickUpdate) -> Self {
        Self {
            last_error: None,
            latest_price: update.price.or(self.latest_price),
            latest_timestamp: update
                .timestamp
                .clone()
                .or_else(|| self.latest_timestamp.clone()),
            ..self.clone()
        }
    }

    /// Three-way badge shown next to the ticker, matching the status dot:
    /// a failed open reads "Error", an open socket "Connected", and both
    /// the in-flight and the between-retries states read "Connecting".
    pub fn badge(&self) -> &'static str {
        match self.status {
            FeedStatus::Erroring => "Error",
            FeedStatus::Connected => "Connected",
            FeedStatus::Connecting | FeedStatus::Disconnected => "Connecting",
        }
    }
}
