//! Checklist state and its transforms.
//!
//! # Draft-Row Invariant
//!
//! While `editing` is true, the last entry — if any — may be blank: that is
//! the draft row the user types the next item into. After every structural
//! mutation performed while editing, [`ChecklistState::ensure_draft_entry`]
//! must hold: exactly one trailing blank entry, created if missing, never
//! duplicated. `ensure_draft_entry` is the single authority for this
//! invariant; no other transform appends blanks.
//!
//! # Finishing
//!
//! The `editing: true -> false` transition drops every blank entry and trims
//! the rest. Applying it twice equals applying it once.
//!
//! # Index Handling
//!
//! Index-taking transforms treat out-of-range indices as no-ops. Indices
//! arrive from decoded links the user can hand-edit, so they are untrusted
//! input, not programmer errors.

use serde::{Deserialize, Serialize};

use super::entry::Entry;

/// The whole checklist: edit-mode flag plus ordered entries.
///
/// Entry order is significant — it is the display and check order — and is
/// preserved by every transform except [`swap_entries`](Self::swap_entries).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistState {
    /// Whether the checklist is in editing mode.
    pub editing: bool,
    /// Ordered entries.
    pub entries: Vec<Entry>,
}

impl ChecklistState {
    /// The empty, finished checklist. This is the fallback state when a
    /// link fails to decode.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            editing: false,
            entries: Vec::new(),
        }
    }

    /// True iff the last entry exists and is blank.
    #[must_use]
    pub fn has_draft_entry(&self) -> bool {
        self.entries.last().is_some_and(Entry::is_blank)
    }

    /// Append an unchecked entry with the given text.
    #[must_use]
    pub fn add_entry(mut self, text: impl Into<String>) -> Self {
        self.entries.push(Entry::new(text));
        self
    }

    /// Set the checked flag of the entry at `index`. Out of range: no-op.
    #[must_use]
    pub fn check_entry(mut self, index: usize, checked: bool) -> Self {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.checked = checked;
        }
        self
    }

    /// Replace the text of the entry at `index`. Out of range: no-op.
    #[must_use]
    pub fn set_entry_text(mut self, index: usize, text: impl Into<String>) -> Self {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.text = text.into();
        }
        self
    }

    /// Remove the entry at `index`. Out of range: no-op.
    #[must_use]
    pub fn remove_entry(mut self, index: usize) -> Self {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
        self
    }

    /// Swap the entries at `first` and `second`.
    ///
    /// Fails closed: if either index is out of range the state is returned
    /// unchanged. Callers expressing "move up" pass a checked decrement, so
    /// moving the first entry up (or the last entry down) lands here as an
    /// out-of-range pair and no-ops.
    #[must_use]
    pub fn swap_entries(mut self, first: usize, second: usize) -> Self {
        if first >= self.entries.len() || second >= self.entries.len() {
            return self;
        }
        self.entries.swap(first, second);
        self
    }

    /// Enter editing mode. Draft-row maintenance is the caller's next step.
    #[must_use]
    pub const fn begin_editing(mut self) -> Self {
        self.editing = true;
        self
    }

    /// Leave editing mode: drop blank entries, trim the rest.
    ///
    /// No-op when not editing, which makes the transform idempotent.
    #[must_use]
    pub fn finish_editing(self) -> Self {
        if !self.editing {
            return self;
        }
        Self {
            editing: false,
            entries: self
                .entries
                .into_iter()
                .filter(|entry| !entry.is_blank())
                .map(|entry| Entry {
                    text: entry.text.trim().to_string(),
                    checked: entry.checked,
                })
                .collect(),
        }
    }

    /// Restore the draft-row invariant: while editing, append a blank entry
    /// unless the last entry is already blank. Outside editing mode this is
    /// a no-op — a finished checklist never grows a stray blank row.
    #[must_use]
    pub fn ensure_draft_entry(self) -> Self {
        if self.editing && !self.has_draft_entry() {
            self.add_entry("")
        } else {
            self
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
