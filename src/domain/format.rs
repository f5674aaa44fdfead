//! Display formatting helpers.
//!
//! Pure functions consumed by the presentation layer. Anything that
//! cannot be rendered falls back to a single placeholder glyph rather
//! than an error; a bad value from upstream must never break the panel.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::domain::snapshot::TimestampValue;

/// Shown wherever a value is absent or unrenderable.
pub const PLACEHOLDER: &str = "—";

/// Human-readable layout: abbreviated month, 2-digit day, year, then
/// 2-digit hour/minute/second.
const LAYOUT: &str = "%b %d, %Y, %H:%M:%S";

/// String timestamp layouts accepted besides RFC 3339 / RFC 2822.
const NAIVE_LAYOUTS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

/// Render a price with exactly 5 digits after the decimal point, or the
/// placeholder when absent or not a number.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() => format!("{p:.5}"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Render an upstream timestamp in the viewer's local time zone.
pub fn format_timestamp(value: &TimestampValue) -> String {
    format_timestamp_in(value, &Local)
}

/// Render an upstream timestamp in an explicit time zone.
///
/// Deterministic given a fixed zone, which is what the tests pin down.
pub fn format_timestamp_in<Tz: TimeZone>(value: &TimestampValue, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    parse_instant(value).map_or_else(
        || PLACEHOLDER.to_string(),
        |instant| instant.with_timezone(tz).format(LAYOUT).to_string(),
    )
}

/// Interpret the stored value as a UTC instant, or nothing at all.
fn parse_instant(value: &TimestampValue) -> Option<DateTime<Utc>> {
    match value {
        TimestampValue::Epoch(ms) if ms.is_finite() => {
            // f64 casts saturate, and the saturated value falls outside
            // chrono's representable range, which maps to the placeholder.
            #[allow(clippy::cast_possible_truncation)]
            let millis = *ms as i64;
            Utc.timestamp_millis_opt(millis).single()
        }
        TimestampValue::Epoch(_) => None,
        TimestampValue::Text(s) => parse_text(s),
    }
}

fn parse_text(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    // Zone-less strings from the source are taken as UTC.
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_renders_five_decimals() {
        assert_eq!(format_price(Some(1.23456789)), "1.23457");
        assert_eq!(format_price(Some(1.0)), "1.00000");
    }

    #[test]
    fn price_placeholder_for_absent_and_nan() {
        assert_eq!(format_price(None), PLACEHOLDER);
        assert_eq!(format_price(Some(f64::NAN)), PLACEHOLDER);
        assert_eq!(format_price(Some(f64::INFINITY)), PLACEHOLDER);
    }

    #[test]
    fn epoch_millis_render_in_requested_zone() {
        let value = TimestampValue::Epoch(1_700_000_000_000.0);
        assert_eq!(format_timestamp_in(&value, &Utc), "Nov 14, 2023, 22:13:20");
    }

    #[test]
    fn rfc3339_string_renders() {
        let value = TimestampValue::Text("2023-11-14T22:13:20Z".to_string());
        assert_eq!(format_timestamp_in(&value, &Utc), "Nov 14, 2023, 22:13:20");
    }

    #[test]
    fn zoneless_string_is_taken_as_utc() {
        let value = TimestampValue::Text("2023-11-14 22:13:20".to_string());
        assert_eq!(format_timestamp_in(&value, &Utc), "Nov 14, 2023, 22:13:20");
    }

    #[test]
    fn bare_date_renders_midnight() {
        let value = TimestampValue::Text("2023-11-14".to_string());
        assert_eq!(format_timestamp_in(&value, &Utc), "Nov 14, 2023, 00:00:00");
    }

    #[test]
    fn unparsable_values_fall_back_to_placeholder() {
        let garbage = TimestampValue::Text("tomorrow-ish".to_string());
        assert_eq!(format_timestamp_in(&garbage, &Utc), PLACEHOLDER);

        let absurd = TimestampValue::Epoch(f64::NAN);
        assert_eq!(format_timestamp_in(&absurd, &Utc), PLACEHOLDER);

        let too_far = TimestampValue::Epoch(1.0e300);
        assert_eq!(format_timestamp_in(&too_far, &Utc), PLACEHOLDER);
    }
}
