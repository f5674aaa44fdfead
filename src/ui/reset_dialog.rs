//! Password-reset dialog.
//!
//! Submission is simulated locally: no request leaves the process. A
//! submit with neither identity field is a validation failure; anything
//! else gets the deliberately vague acknowledgment and the dialog closes
//! itself shortly after.

use std::time::Duration;

use thiserror::Error;

/// Acknowledgment shown for any non-empty submission. Intentionally
/// does not reveal whether the account exists.
pub const RESET_ACK_MESSAGE: &str =
    "If an account exists for those details, a reset link will be sent shortly.";

/// Validation failure for the reset form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResetFormError {
    /// Neither email nor username was provided.
    #[error("Please enter your email or username to reset your password.")]
    MissingIdentity,
}

/// Accepted submission: acknowledgment text plus the auto-close delay
/// the caller should schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetAck {
    /// Toast text to show.
    pub message: &'static str,
    /// Close the dialog this long after the acknowledgment.
    pub close_after: Duration,
}

/// Password-reset dialog state.
#[derive(Debug, Clone)]
pub struct ResetDialog {
    is_open: bool,
    email: String,
    username: String,
    close_after: Duration,
}

impl ResetDialog {
    /// New closed dialog with the configured auto-close delay.
    pub fn new(close_after: Duration) -> Self {
        Self {
            is_open: false,
            email: String::new(),
            username: String::new(),
            close_after,
        }
    }

    /// Whether the dialog is currently shown.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Show the dialog.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Hide the dialog without clearing the fields (cancel / escape).
    /// Safe to call when already closed.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Email field.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Username field.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    /// Simulate a submit of the current fields.
    ///
    /// # Errors
    /// `ResetFormError::MissingIdentity` when both fields are blank; the
    /// error's display text is the exact message shown to the user.
    pub fn submit(&self) -> Result<ResetAck, ResetFormError> {
        if self.email.trim().is_empty() && self.username.trim().is_empty() {
            return Err(ResetFormError::MissingIdentity);
        }
        Ok(ResetAck {
            message: RESET_ACK_MESSAGE,
            close_after: self.close_after,
        })
    }

    /// Finish an accepted submission: close the dialog and clear both
    /// fields, the same cleanup the page performs on its delayed close.
    pub fn complete(&mut self) {
        self.is_open = false;
        self.email.clear();
        self.username.clear();
    }
}
