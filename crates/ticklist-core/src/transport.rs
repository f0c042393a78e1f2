//! Link transport: event log ⇄ URL-safe fragment string.
//!
//! The encode chain is fixed: events → JSON text → UTF-8 bytes → raw
//! deflate (no zlib header) → URL-safe base64. The decode chain is the
//! inverse, but tolerant of every format generation that ever shipped:
//!
//! 1. **Current**: base64 → raw inflate → JSON event rows.
//! 2. **Uncompressed event log**: base64 → JSON event rows directly.
//! 3. **Snapshot**: base64 → JSON `{"editing", "entries"}` object — the
//!    oldest links stored the state itself, before the event log existed.
//!
//! Old links used the standard base64 alphabet with padding; current links
//! use the URL-safe alphabet without. [`deserialize`] accepts both.
//!
//! No failure escapes [`deserialize`]: every malformed input collapses to
//! `None` (the caller substitutes the empty state), with the failure stage
//! recorded as a `tracing` diagnostic via [`DecodeError`].

use std::io::{Read, Write};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use serde_json::Value;
use tracing::debug;

use crate::event::{decode_rows, encode_rows, record, replay};
use crate::model::{ChecklistState, Entry};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a fragment failed to decode. Internal: the public surface collapses
/// every variant to `None`, but logs and tests want the stage that failed.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The fragment is empty or whitespace.
    #[error("empty fragment")]
    Empty,
    /// The fragment is not base64 in any accepted alphabet.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The bytes are neither a raw-deflate JSON stream nor legacy plain JSON.
    #[error("payload is neither raw-deflate JSON nor legacy JSON")]
    UnknownPayload,
    /// The JSON is neither an event-log array nor a snapshot object.
    #[error("JSON is neither an event log nor a snapshot")]
    UnknownShape,
}

// ---------------------------------------------------------------------------
// Serialize
// ---------------------------------------------------------------------------

/// Serialize a state into the current-generation fragment string.
#[must_use]
pub fn serialize(state: &ChecklistState) -> String {
    let json = encode_rows(&record(state)).to_string();
    let Some(compressed) = deflate(json.as_bytes()) else {
        // Compressing an in-memory buffer cannot fail in practice; degrade
        // to the empty fragment rather than surface an error nobody can act on.
        debug!("deflate failed, writing empty fragment");
        return String::new();
    };
    URL_SAFE_NO_PAD.encode(compressed)
}

fn deflate(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).ok()?;
    encoder.finish().ok()
}

// ---------------------------------------------------------------------------
// Deserialize
// ---------------------------------------------------------------------------

/// Decode a fragment string from any shipped generation.
///
/// Returns `None` — never panics, never errors — when the fragment is
/// empty, not base64, not inflatable-or-legacy-JSON, or JSON of the wrong
/// shape. Event-log payloads are normalized by replay; snapshot payloads
/// get their draft row restored here.
#[must_use]
pub fn deserialize(fragment: &str) -> Option<ChecklistState> {
    match try_deserialize(fragment) {
        Ok(state) => Some(state),
        Err(error) => {
            debug!(%error, "discarding undecodable fragment");
            None
        }
    }
}

fn try_deserialize(fragment: &str) -> Result<ChecklistState, DecodeError> {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return Err(DecodeError::Empty);
    }

    let bytes = decode_base64(fragment)?;
    // Raw deflate has no header, so "inflates and parses as JSON" is the
    // whole test for the compressed generation. Legacy links stored plain
    // JSON; garbage bytes can inflate successfully into non-JSON.
    let json: Value = match inflate(&bytes).and_then(|inflated| json_value(&inflated)) {
        Some(json) => json,
        None => json_value(&bytes).ok_or(DecodeError::UnknownPayload)?,
    };

    match json {
        Value::Array(rows) => Ok(replay(&decode_rows(&rows))),
        Value::Object(fields) => Ok(snapshot_state(&fields)),
        _ => Err(DecodeError::UnknownShape),
    }
}

/// Decode base64 accepting both alphabets and optional padding.
fn decode_base64(fragment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let normalized: String = fragment
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect();
    URL_SAFE_NO_PAD.decode(normalized)
}

fn inflate(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(bytes);
    let mut inflated = Vec::new();
    decoder.read_to_end(&mut inflated).ok()?;
    Some(inflated)
}

fn json_value(bytes: &[u8]) -> Option<Value> {
    serde_json::from_slice(bytes).ok()
}

/// Read the oldest link format: a direct `{editing, entries}` snapshot.
///
/// Fields are read tolerantly — a wrong-typed field gets its default — and
/// the draft row is restored, since snapshot links predate replay-side
/// normalization.
fn snapshot_state(fields: &serde_json::Map<String, Value>) -> ChecklistState {
    let editing = fields
        .get("editing")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let entries = fields
        .get("entries")
        .and_then(Value::as_array)
        .map(|rows| rows.iter().map(snapshot_entry).collect())
        .unwrap_or_default();
    ChecklistState { editing, entries }.ensure_draft_entry()
}

fn snapshot_entry(row: &Value) -> Entry {
    Entry {
        text: row
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        checked: row
            .get("checked")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
