//! Interactive terminal session.
//!
//! The main presentation loop: renders the ticker panel whenever the
//! feed publishes a new snapshot, and simulates the login surface from
//! stdin commands. Event-driven via tokio::select!; the loop never
//! blocks the runtime while waiting for network or input events.
//!
//! Commands:
//! - `login <username> <password>` - cosmetic submit of the login form
//! - `sso`                         - cosmetic SSO button
//! - `reset [email] [username]`    - open and submit the reset dialog
//! - `cancel`                      - close the reset dialog
//! - `status`                      - show connection health
//! - `quit`                        - leave the session

use std::io::Write as _;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, watch};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::config::UiConfig;
use crate::domain::snapshot::FeedSnapshot;
use crate::ports::ticker_feed::TickerFeed;

use super::login::{LoginForm, LoginOutcome};
use super::reset_dialog::ResetDialog;
use super::ticker_panel;
use super::toast::Toast;

/// Terminal session over any ticker feed implementation.
pub struct TickerSession<F: TickerFeed> {
    /// Feed snapshots, read-only.
    feed: Arc<F>,
    /// Presentation timer durations.
    ui: UiConfig,
    /// Login form state.
    login: LoginForm,
    /// Password-reset dialog state.
    dialog: ResetDialog,
    /// Pending auto-close for an accepted reset submission.
    dialog_close_at: Option<Instant>,
    /// Current toast, if any.
    toast: Option<Toast>,
}

impl<F: TickerFeed> TickerSession<F> {
    /// Create a session bound to a feed.
    pub fn new(feed: Arc<F>, ui: UiConfig) -> Self {
        let dialog = ResetDialog::new(ui.reset_close());
        Self {
            feed,
            ui,
            login: LoginForm::default(),
            dialog,
            dialog_close_at: None,
            toast: None,
        }
    }

    /// Run the session until `quit`, stdin EOF, or shutdown.
    pub async fn run(&mut self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let mut snapshots = self.feed.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        info!("ticker session started");
        self.render();

        loop {
            let toast_deadline = self.toast.as_ref().and_then(|t| t.expires_at);
            let dialog_deadline = self.dialog_close_at;

            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    info!("shutdown signal in ticker session");
                    return Ok(());
                }
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        debug!("feed snapshot channel closed");
                        return Ok(());
                    }
                    self.render();
                }
                line = lines.next_line() => {
                    match line? {
                        Some(input) => {
                            if !self.handle_command(input.trim()) {
                                return Ok(());
                            }
                            self.render();
                        }
                        // stdin closed; keep rendering feed updates
                        None => {
                            debug!("stdin closed, session continues read-only");
                            self.render_only(&mut snapshots, &mut shutdown_rx).await;
                            return Ok(());
                        }
                    }
                }
                () = sleep_until_opt(toast_deadline) => {
                    self.toast = None;
                    self.render();
                }
                () = sleep_until_opt(dialog_deadline) => {
                    self.dialog.complete();
                    self.dialog_close_at = None;
                    self.render();
                }
            }
        }
    }

    /// Keep re-rendering on snapshot changes once stdin is gone. Returns
    /// on shutdown or when the feed drops its channel.
    async fn render_only(
        &mut self,
        snapshots: &mut watch::Receiver<FeedSnapshot>,
        shutdown_rx: &mut broadcast::Receiver<()>,
    ) {
        loop {
            let toast_deadline = self.toast.as_ref().and_then(|t| t.expires_at);
            let dialog_deadline = self.dialog_close_at;

            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => return,
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    self.render();
                }
                () = sleep_until_opt(toast_deadline) => {
                    self.toast = None;
                    self.render();
                }
                () = sleep_until_opt(dialog_deadline) => {
                    self.dialog.complete();
                    self.dialog_close_at = None;
                    self.render();
                }
            }
        }
    }

    /// Apply one command line. Returns false when the session should end.
    fn handle_command(&mut self, input: &str) -> bool {
        let mut parts = input.split_whitespace();
        let Some(command) = parts.next() else {
            return true;
        };

        match command {
            "quit" | "exit" => return false,
            "login" => {
                self.login.username = parts.next().unwrap_or_default().to_string();
                self.login.password = parts.next().unwrap_or_default().to_string();
                match self.login.submit() {
                    LoginOutcome::Submitted { username } => {
                        self.toast = Some(Toast::transient(
                            format!("Demo: login submitted for {username}. No backend is wired up."),
                            self.ui.toast_ttl(),
                        ));
                    }
                    LoginOutcome::MissingCredentials => {
                        self.toast =
                            Some(Toast::sticky("Enter both a username and a password."));
                    }
                }
            }
            "sso" => {
                self.toast = Some(Toast::transient(
                    LoginForm::sso_toast_text(),
                    self.ui.toast_ttl(),
                ));
            }
            "reset" => {
                self.dialog.open();
                for arg in parts {
                    if arg.contains('@') {
                        self.dialog.set_email(arg);
                    } else {
                        self.dialog.set_username(arg);
                    }
                }
                match self.dialog.submit() {
                    Ok(ack) => {
                        self.toast = Some(Toast::sticky(ack.message));
                        self.dialog_close_at = Some(Instant::now() + ack.close_after);
                    }
                    Err(e) => {
                        self.toast = Some(Toast::sticky(e.to_string()));
                    }
                }
            }
            "cancel" => {
                self.dialog.close();
                self.dialog_close_at = None;
            }
            "status" => {
                let snapshot = self.feed.snapshot();
                self.toast = Some(Toast::sticky(format!(
                    "Feed is {} ({})",
                    snapshot.status,
                    snapshot.badge()
                )));
            }
            "help" => {
                self.toast = Some(Toast::sticky(
                    "Commands: login <user> <pass> | sso | reset [email] [username] | \
                     cancel | status | quit",
                ));
            }
            other => {
                debug!(command = other, "unknown command");
                self.toast = Some(Toast::sticky(format!(
                    "Unknown command {other:?}; try 'help'."
                )));
            }
        }

        true
    }

    /// Redraw the whole shell onto stdout.
    fn render(&self) {
        let snapshot = self.feed.snapshot();

        let mut out = String::new();
        out.push_str("\n------------------------------------------------------------\n");
        out.push_str(&ticker_panel::render(&snapshot));

        if self.dialog.is_open() {
            out.push_str("\n[ Reset password: 'reset <email-or-username>' to submit, 'cancel' to close ]\n");
        }
        if let Some(toast) = &self.toast {
            out.push_str(&format!("\n>> {}\n", toast.text));
        }
        out.push_str("> ");

        print!("{out}");
        let _ = std::io::stdout().flush();
    }
}

/// Sleep until an optional deadline; pend forever when there is none so
/// the select arm simply never fires.
async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
