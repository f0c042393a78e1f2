//! JSON row encoding and tolerant decoding for the event log.
//!
//! Decoding is lossy by policy, never failing: the rows come from a URL the
//! user can hand-edit, so every malformed fragment degrades instead of
//! aborting the whole decode.
//!
//! - A row that is not an array, is empty, or carries an unknown tag is
//!   skipped with a `tracing` warning (forward compatibility: new event
//!   tags may appear without breaking old readers).
//! - A non-string where text is expected decodes as `""`.
//! - A non-integer (or negative) where an index is expected is dropped.
//!
//! Both tag generations decode through the same path: a legacy singular row
//! is simply a batch of size one.

use serde_json::{Value, json};
use tracing::{debug, warn};

use super::Event;
use super::tags::EventTag;

// ---------------------------------------------------------------------------
// Encoding (current generation only)
// ---------------------------------------------------------------------------

/// Encode events as the current-generation JSON rows.
#[must_use]
pub fn encode_rows(events: &[Event]) -> Value {
    Value::Array(events.iter().map(event_row).collect())
}

fn event_row(event: &Event) -> Value {
    let mut row = vec![json!(event.tag().code())];
    match event {
        Event::AddEntries(texts) => {
            row.extend(texts.iter().map(|text| Value::String(text.clone())));
        }
        Event::CheckEntries(indices) => {
            row.extend(indices.iter().map(|index| json!(index)));
        }
        Event::EndEdit => {}
    }
    Value::Array(row)
}

// ---------------------------------------------------------------------------
// Decoding (both generations, lossy)
// ---------------------------------------------------------------------------

/// Decode JSON rows into events, skipping whatever cannot be understood.
#[must_use]
pub fn decode_rows(rows: &[Value]) -> Vec<Event> {
    rows.iter().filter_map(decode_row).collect()
}

fn decode_row(row: &Value) -> Option<Event> {
    let Value::Array(fields) = row else {
        warn!(?row, "skipping non-array event row");
        return None;
    };
    let Some(tag_field) = fields.first() else {
        warn!("skipping empty event row");
        return None;
    };

    let tag = match tag_field {
        Value::Number(code) => code.as_u64().and_then(EventTag::from_code),
        Value::String(name) => EventTag::from_legacy_name(name),
        _ => None,
    };
    let Some(tag) = tag else {
        warn!(tag = %tag_field, "skipping event row with unknown tag");
        return None;
    };

    let payload = &fields[1..];
    Some(match tag {
        EventTag::Add => Event::AddEntries(payload.iter().map(text_value).collect()),
        EventTag::Check => Event::CheckEntries(payload.iter().filter_map(index_value).collect()),
        EventTag::End => Event::EndEdit,
    })
}

/// Read a text payload value; anything that is not a string decodes as `""`.
fn text_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => {
            debug!(?other, "non-string text payload, substituting empty string");
            String::new()
        }
    }
}

/// Read an index payload value; non-integers and negatives are dropped.
fn index_value(value: &Value) -> Option<usize> {
    let index = value.as_u64().and_then(|raw| usize::try_from(raw).ok());
    if index.is_none() {
        debug!(?value, "dropping invalid index payload");
    }
    index
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
