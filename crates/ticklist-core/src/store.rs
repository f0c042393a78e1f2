//! Storage-slot binding for the serialized checklist.
//!
//! The URL fragment is process-wide mutable state with a trivial lifecycle:
//! read once at startup, overwritten on every change, no history appended.
//! It is modeled as an injected [`Slot`] capability instead of an ambient
//! global so the core runs and tests without a browser; the embedding view
//! layer supplies the real fragment-backed implementation.

use crate::model::ChecklistState;
use crate::transport;

/// A single string-valued storage slot.
///
/// Writes are a pure key replace. `read` returns `None` when the slot has
/// never been written (a page opened without a fragment).
pub trait Slot {
    /// Read the current slot value, if any.
    fn read(&self) -> Option<String>;
    /// Replace the slot value.
    fn write(&mut self, value: &str);
}

/// In-memory [`Slot`] for tests and headless embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Option<String>,
}

impl MemorySlot {
    /// An empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// The raw stored fragment, if any. Test hook.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl Slot for MemorySlot {
    fn read(&self) -> Option<String> {
        self.value.clone()
    }

    fn write(&mut self, value: &str) {
        self.value = Some(value.to_string());
    }
}

/// Binds the transport codec to a [`Slot`].
///
/// `commit` couples normalization and persistence in one hook on purpose:
/// the persisted form and the in-memory form must never diverge, so the
/// state that gets written is the state that gets returned.
#[derive(Debug)]
pub struct Store<S> {
    slot: S,
}

impl<S: Slot> Store<S> {
    /// Wrap a slot.
    #[must_use]
    pub const fn new(slot: S) -> Self {
        Self { slot }
    }

    /// Read and decode the slot, falling back to the empty state on any
    /// failure — a missing, truncated, or hand-mangled fragment opens an
    /// empty checklist rather than crashing the page.
    #[must_use]
    pub fn load(&self) -> ChecklistState {
        self.slot
            .read()
            .as_deref()
            .and_then(transport::deserialize)
            .unwrap_or_else(ChecklistState::empty)
    }

    /// Normalize, persist, and return the new authoritative state.
    #[must_use]
    pub fn commit(&mut self, state: ChecklistState) -> ChecklistState {
        let state = state.ensure_draft_entry();
        self.slot.write(&transport::serialize(&state));
        state
    }

    /// Access the underlying slot. Test hook.
    pub const fn slot(&self) -> &S {
        &self.slot
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
