//! Transient user-facing messages.

use std::time::Duration;

use tokio::time::Instant;

/// A short status message shown below the form area.
///
/// Transient toasts carry an expiry deadline and disappear on their own;
/// sticky toasts stay until replaced.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Message text.
    pub text: String,
    /// When the toast should disappear, if ever.
    pub expires_at: Option<Instant>,
}

impl Toast {
    /// A toast that clears itself after `ttl`.
    pub fn transient(text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: Some(Instant::now() + ttl),
        }
    }

    /// A toast that stays until replaced.
    pub fn sticky(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expires_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sticky_toast_has_no_deadline() {
        assert!(Toast::sticky("hello").expires_at.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn transient_toast_deadline_is_in_the_future() {
        let toast = Toast::transient("hello", Duration::from_millis(1600));
        let deadline = toast.expires_at.unwrap();
        assert!(deadline > Instant::now());
        tokio::time::advance(Duration::from_millis(1601)).await;
        assert!(deadline <= Instant::now());
    }
}
