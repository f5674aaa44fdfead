//! Presentation Layer - Passive Renderers and Simulated Login Surface
//!
//! Reads feed snapshots through the `TickerFeed` port and renders them;
//! independently hosts the login shell whose submissions are simulated
//! locally (no network calls anywhere in this layer). Nothing here
//! mutates feed state.

pub mod login;
pub mod reset_dialog;
pub mod session;
pub mod ticker_panel;
pub mod toast;

pub use session::TickerSession;
