//! Ticker Feed Adapters - Real-time Price Streaming
//!
//! Provides the WebSocket-based price feed behind the `TickerFeed` port:
//! - TradingEconomics: guest EUR/USD stream with auto-reconnect

pub mod trading_economics;

pub use trading_economics::{TradingEconomicsFeed, WS_BLOCKED_ADVISORY};
