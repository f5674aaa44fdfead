//! Ticker panel renderer.
//!
//! Pure snapshot-to-text formatting: the same snapshot always renders
//! the same panel (up to the viewer's time zone). No I/O here.

use crate::domain::format::{format_price, format_timestamp, PLACEHOLDER};
use crate::domain::snapshot::FeedSnapshot;

/// Render the ticker card for the terminal.
pub fn render(snapshot: &FeedSnapshot) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} (Live)  [{}]\n",
        pair_label(&snapshot.topic),
        snapshot.badge()
    ));
    out.push_str("Source: TradingEconomics WebSocket feed\n");
    out.push_str(&format!(
        "Latest price:             {}\n",
        format_price(snapshot.latest_price)
    ));

    let local_time = snapshot
        .latest_timestamp
        .as_ref()
        .map_or_else(|| PLACEHOLDER.to_string(), format_timestamp);
    out.push_str(&format!("Latest timestamp (local): {local_time}\n"));

    if let Some(advisory) = &snapshot.last_error {
        out.push_str(&format!("\nHeads-up: {advisory}\n"));
    }

    out
}

/// Display label for a subscription topic. A six-letter pair symbol such
/// as `EURUSD:CUR` renders as `EUR/USD`; anything else is shown verbatim
/// minus the channel suffix.
fn pair_label(topic: &str) -> String {
    let symbol = topic.split(':').next().unwrap_or(topic);

    if symbol.len() == 6 && symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        format!("{}/{}", &symbol[..3], &symbol[3..])
    } else {
        symbol.to_string()
    }
}
