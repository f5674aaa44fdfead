//! Login form model.
//!
//! The demo has no authentication backend; submitting the form goes
//! nowhere by design. The model exists so the shell can mirror the
//! page's behavior: required-field prompts and a cosmetic acknowledgment.

/// Login form fields.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Username field.
    pub username: String,
    /// Password field.
    pub password: String,
    /// "Remember me" checkbox.
    pub remember_me: bool,
}

/// Outcome of a simulated login submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Both fields present; the demo acknowledges and does nothing else.
    Submitted {
        /// Username echoed back in the acknowledgment.
        username: String,
    },
    /// One or both required fields were empty.
    MissingCredentials,
}

impl LoginForm {
    /// Simulate a submit. Mirrors the page's `required` inputs: empty
    /// fields never "post".
    pub fn submit(&self) -> LoginOutcome {
        if self.username.trim().is_empty() || self.password.is_empty() {
            LoginOutcome::MissingCredentials
        } else {
            LoginOutcome::Submitted {
                username: self.username.trim().to_string(),
            }
        }
    }

    /// Toast text for the cosmetic SSO button.
    pub fn sso_toast_text() -> &'static str {
        "Demo: SSO button clicked."
    }
}
