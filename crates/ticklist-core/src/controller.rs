//! Intent dispatch: user actions to model transforms to the commit hook.
//!
//! The controller owns the one mutable resource in the system — the current
//! state plus its storage slot — and handles each intent to completion
//! (transform, normalize, persist) before the next one. The view layer only
//! ever sees the state the store committed.

use crate::model::ChecklistState;
use crate::store::{Slot, Store};

/// A discrete user action on the checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Toggle edit mode; leaving it finishes the checklist.
    ToggleEditing,
    /// Replace the text of the entry at `index`.
    SetEntryText {
        /// Position of the edited entry.
        index: usize,
        /// New (untrimmed) text.
        text: String,
    },
    /// Set the checked flag of the entry at `index`.
    CheckEntry {
        /// Position of the toggled entry.
        index: usize,
        /// New checked value.
        checked: bool,
    },
    /// Remove the entry at `index`.
    RemoveEntry {
        /// Position of the removed entry.
        index: usize,
    },
    /// Swap the entry at `index` with the one above it.
    MoveEntryUp {
        /// Position of the moved entry.
        index: usize,
    },
    /// Swap the entry at `index` with the one below it.
    MoveEntryDown {
        /// Position of the moved entry.
        index: usize,
    },
}

/// Apply one intent to a state snapshot. Pure — persistence and draft-row
/// normalization are [`Controller::dispatch`]'s job.
#[must_use]
pub fn step(state: ChecklistState, intent: Intent) -> ChecklistState {
    match intent {
        Intent::ToggleEditing => {
            if state.editing {
                state.finish_editing()
            } else {
                state.begin_editing()
            }
        }
        Intent::SetEntryText { index, text } => state.set_entry_text(index, text),
        Intent::CheckEntry { index, checked } => state.check_entry(index, checked),
        Intent::RemoveEntry { index } => state.remove_entry(index),
        Intent::MoveEntryUp { index } => match index.checked_sub(1) {
            Some(above) if !is_draft_position(&state, index) => state.swap_entries(above, index),
            // The first entry cannot move up, and the draft row stays pinned.
            _ => state,
        },
        Intent::MoveEntryDown { index } => {
            let below = index.saturating_add(1);
            if is_draft_position(&state, below) {
                // Nothing moves below the draft row.
                state
            } else {
                state.swap_entries(index, below)
            }
        }
    }
}

/// True when `position` is the trailing draft row.
///
/// Reorders never involve the draft row: it is the "next row to fill in",
/// pinned to the bottom so a swap cannot strand a blank mid-list.
fn is_draft_position(state: &ChecklistState, position: usize) -> bool {
    state.editing
        && state.has_draft_entry()
        && position.saturating_add(1) == state.entries.len()
}

/// Owns the authoritative state and routes every intent through the store.
#[derive(Debug)]
pub struct Controller<S> {
    store: Store<S>,
    state: ChecklistState,
}

impl<S: Slot> Controller<S> {
    /// Load the initial state from the slot.
    #[must_use]
    pub fn new(slot: S) -> Self {
        let store = Store::new(slot);
        let state = store.load();
        Self { store, state }
    }

    /// The current authoritative state.
    pub const fn state(&self) -> &ChecklistState {
        &self.state
    }

    /// Handle one intent to completion and return the committed state.
    pub fn dispatch(&mut self, intent: Intent) -> &ChecklistState {
        let next = step(self.state.clone(), intent);
        self.state = self.store.commit(next);
        &self.state
    }

    /// Access the store. Test hook.
    pub const fn store(&self) -> &Store<S> {
        &self.store
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySlot;

    fn controller() -> Controller<MemorySlot> {
        Controller::new(MemorySlot::new())
    }

    fn texts(state: &ChecklistState) -> Vec<&str> {
        state.entries.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn starts_empty_from_empty_slot() {
        let controller = controller();
        assert_eq!(*controller.state(), ChecklistState::empty());
    }

    #[test]
    fn toggle_editing_on_creates_draft_row() {
        let mut controller = controller();
        let state = controller.dispatch(Intent::ToggleEditing);
        assert!(state.editing);
        assert_eq!(state.entries.len(), 1);
        assert!(state.has_draft_entry());
    }

    #[test]
    fn typing_into_draft_grows_a_new_draft() {
        let mut controller = controller();
        let _ = controller.dispatch(Intent::ToggleEditing);
        let state = controller.dispatch(Intent::SetEntryText {
            index: 0,
            text: "Buy milk".into(),
        });
        // The filled row is no longer blank, so commit appended a new draft.
        assert_eq!(texts(state), ["Buy milk", ""]);
    }

    #[test]
    fn toggle_editing_off_finishes_and_persists() {
        let mut controller = controller();
        let _ = controller.dispatch(Intent::ToggleEditing);
        let _ = controller.dispatch(Intent::SetEntryText {
            index: 0,
            text: "  Buy milk ".into(),
        });
        let state = controller.dispatch(Intent::ToggleEditing);
        assert!(!state.editing);
        assert_eq!(texts(state), ["Buy milk"]);

        // Reloading from the slot reproduces the committed state.
        let reloaded = controller.store().load();
        assert_eq!(reloaded, *controller.state());
    }

    #[test]
    fn check_entry_on_finished_list() {
        let mut controller = controller();
        let _ = controller.dispatch(Intent::ToggleEditing);
        let _ = controller.dispatch(Intent::SetEntryText {
            index: 0,
            text: "a".into(),
        });
        let _ = controller.dispatch(Intent::ToggleEditing);
        let state = controller.dispatch(Intent::CheckEntry {
            index: 0,
            checked: true,
        });
        assert!(state.entries[0].checked);
    }

    #[test]
    fn remove_entry_keeps_draft_invariant() {
        let mut controller = controller();
        let _ = controller.dispatch(Intent::ToggleEditing);
        let _ = controller.dispatch(Intent::SetEntryText {
            index: 0,
            text: "a".into(),
        });
        let state = controller.dispatch(Intent::RemoveEntry { index: 0 });
        assert_eq!(texts(state), [""]);
        assert!(state.has_draft_entry());
    }

    #[test]
    fn move_first_entry_up_is_noop() {
        // There is no row above index 0 to swap with.
        let mut controller = controller();
        let _ = controller.dispatch(Intent::ToggleEditing);
        let _ = controller.dispatch(Intent::SetEntryText {
            index: 0,
            text: "a".into(),
        });
        let before = controller.state().clone();
        let after = controller.dispatch(Intent::MoveEntryUp { index: 0 });
        assert_eq!(*after, before);
    }

    #[test]
    fn move_last_entry_down_is_noop() {
        let mut controller = controller();
        let _ = controller.dispatch(Intent::ToggleEditing);
        let _ = controller.dispatch(Intent::SetEntryText {
            index: 0,
            text: "a".into(),
        });
        let last = controller.state().entries.len() - 1;
        let before = controller.state().clone();
        let after = controller.dispatch(Intent::MoveEntryDown { index: last });
        assert_eq!(*after, before);
    }

    #[test]
    fn move_entry_down_swaps_rows() {
        let mut controller = controller();
        let _ = controller.dispatch(Intent::ToggleEditing);
        let _ = controller.dispatch(Intent::SetEntryText {
            index: 0,
            text: "a".into(),
        });
        let _ = controller.dispatch(Intent::SetEntryText {
            index: 1,
            text: "b".into(),
        });
        let state = controller.dispatch(Intent::MoveEntryDown { index: 0 });
        assert_eq!(texts(state), ["b", "a", ""]);
    }

    #[test]
    fn draft_row_cannot_be_reordered() {
        let mut controller = controller();
        let _ = controller.dispatch(Intent::ToggleEditing);
        let _ = controller.dispatch(Intent::SetEntryText {
            index: 0,
            text: "a".into(),
        });
        let _ = controller.dispatch(Intent::SetEntryText {
            index: 1,
            text: "b".into(),
        });
        // State is ["a", "b", ""] with the draft pinned last.
        let before = controller.state().clone();

        let draft = before.entries.len() - 1;
        let after = controller.dispatch(Intent::MoveEntryUp { index: draft });
        assert_eq!(*after, before);

        let after = controller.dispatch(Intent::MoveEntryDown { index: draft - 1 });
        assert_eq!(*after, before);
    }

    #[test]
    fn every_dispatch_persists_before_returning() {
        let mut controller = controller();
        let _ = controller.dispatch(Intent::ToggleEditing);
        let _ = controller.dispatch(Intent::SetEntryText {
            index: 0,
            text: "a".into(),
        });
        // At any point, a fresh load from the slot matches the live state.
        assert_eq!(controller.store().load(), *controller.state());
    }

    #[test]
    fn out_of_range_intents_leave_entries_unchanged() {
        let mut controller = controller();
        let _ = controller.dispatch(Intent::ToggleEditing);
        let before = controller.state().clone();
        for intent in [
            Intent::CheckEntry {
                index: 9,
                checked: true,
            },
            Intent::RemoveEntry { index: 9 },
            Intent::MoveEntryUp { index: 9 },
            Intent::MoveEntryDown { index: 9 },
            Intent::SetEntryText {
                index: 9,
                text: "x".into(),
            },
        ] {
            let after = controller.dispatch(intent);
            assert_eq!(*after, before);
        }
    }
}
