//! Inbound frame normalization.
//!
//! The upstream stream is loose about shape: a tick may arrive as a bare
//! object, as a list whose first element is the tick, or wrapped in a
//! `{"data": [...]}` envelope. Field names vary in case as well. This
//! module resolves all of that into a `TickUpdate` through a fixed,
//! ordered list of shape matchers; anything unrecognizable maps to `None`
//! and is dropped upstream without touching state.

use serde_json::Value;

use crate::domain::snapshot::{TickUpdate, TimestampValue};

/// Price field, in the two casings the source is known to emit.
const PRICE_KEYS: [&str; 2] = ["price", "Price"];

/// Timestamp field variants, tried in order.
const TIMESTAMP_KEYS: [&str; 3] = ["dt", "DT", "date"];

/// Normalize one raw text frame into a tick delta.
///
/// Returns `None` for anything that contributes no state change: invalid
/// JSON, an unrecognized shape, or a recognized shape with neither a
/// usable price nor a usable timestamp. Callers treat `None` as "ignore
/// this frame"; it must never be reported as an error.
pub fn normalize_frame(raw: &str) -> Option<TickUpdate> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let tick = candidate(&value)?;

    let update = TickUpdate {
        price: first_present(tick, &PRICE_KEYS).and_then(coerce_price),
        timestamp: first_present(tick, &TIMESTAMP_KEYS).and_then(coerce_timestamp),
    };

    (!update.is_empty()).then_some(update)
}

/// Resolve the object of interest from a payload.
///
/// Matchers are tried in sequence and the first match wins:
/// 1. bare list: take the first element
/// 2. envelope object with a `data` list: take its first element
/// 3. anything else: the value itself
fn candidate(value: &Value) -> Option<&Value> {
    const MATCHERS: [fn(&Value) -> Option<&Value>; 3] =
        [match_list, match_envelope, match_bare];

    MATCHERS.iter().find_map(|matcher| matcher(value))
}

/// Bare list: the tick is the first element.
fn match_list(value: &Value) -> Option<&Value> {
    value.as_array().and_then(|items| items.first())
}

/// Envelope object carrying a `data` list.
fn match_envelope(value: &Value) -> Option<&Value> {
    value
        .get("data")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
}

/// Fallback: treat the value itself as the tick.
fn match_bare(value: &Value) -> Option<&Value> {
    Some(value)
}

/// First key that is present with a non-null value. A key holding
/// explicit `null` falls through to the next variant, exactly like the
/// source's own field fallbacks.
fn first_present<'a>(tick: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| tick.get(key))
        .find(|value| !value.is_null())
}

/// Coerce a JSON value to a finite price. Numeric strings are accepted;
/// a failed coercion yields `None` so a stored price is never replaced
/// by garbage.
fn coerce_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|p| p.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|p| p.is_finite()),
        _ => None,
    }
}

/// Keep the timestamp in whatever form the source sent it.
fn coerce_timestamp(value: &Value) -> Option<TimestampValue> {
    match value {
        Value::Number(n) => n.as_f64().map(TimestampValue::Epoch),
        Value::String(s) => Some(TimestampValue::Text(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_object_with_lowercase_keys() {
        let update = normalize_frame(r#"{"price": 1.0850, "dt": 1700000000000}"#).unwrap();
        assert_eq!(update.price, Some(1.0850));
        assert_eq!(
            update.timestamp,
            Some(TimestampValue::Epoch(1_700_000_000_000.0))
        );
    }

    #[test]
    fn list_shape_takes_first_element() {
        let update =
            normalize_frame(r#"[{"Price": "1.0901"}, {"Price": "9.9999"}]"#).unwrap();
        assert_eq!(update.price, Some(1.0901));
        assert_eq!(update.timestamp, None);
    }

    #[test]
    fn envelope_shape_resolves_data_list() {
        let update =
            normalize_frame(r#"{"data":[{"Price": "1.0850", "DT": 1700000000000}]}"#)
                .unwrap();
        assert_eq!(update.price, Some(1.0850));
        assert_eq!(
            update.timestamp,
            Some(TimestampValue::Epoch(1_700_000_000_000.0))
        );
    }

    #[test]
    fn date_key_is_third_timestamp_variant() {
        let update = normalize_frame(r#"{"date": "2023-11-14T22:13:20Z"}"#).unwrap();
        assert_eq!(
            update.timestamp,
            Some(TimestampValue::Text("2023-11-14T22:13:20Z".to_string()))
        );
        assert_eq!(update.price, None);
    }

    #[test]
    fn null_key_falls_through_to_next_variant() {
        let update = normalize_frame(r#"{"dt": null, "DT": 1700000000000}"#).unwrap();
        assert_eq!(
            update.timestamp,
            Some(TimestampValue::Epoch(1_700_000_000_000.0))
        );
    }

    #[test]
    fn unparsable_price_does_not_produce_nan() {
        assert_eq!(normalize_frame(r#"{"price": "not-a-number"}"#), None);

        let update = normalize_frame(r#"{"price": "garbage", "dt": 5}"#).unwrap();
        assert_eq!(update.price, None);
        assert_eq!(update.timestamp, Some(TimestampValue::Epoch(5.0)));
    }

    #[test]
    fn unrecognized_payloads_are_ignored() {
        assert_eq!(normalize_frame("not json at all"), None);
        assert_eq!(normalize_frame("{}"), None);
        assert_eq!(normalize_frame("[]"), None);
        assert_eq!(normalize_frame(r#"{"data": {}}"#), None);
        assert_eq!(normalize_frame(r#"{"volume": 120}"#), None);
        assert_eq!(normalize_frame("42"), None);
    }

    #[test]
    fn empty_data_envelope_is_ignored() {
        assert_eq!(normalize_frame(r#"{"data": []}"#), None);
    }
}
