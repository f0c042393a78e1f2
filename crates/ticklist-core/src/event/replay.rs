//! State ⇄ event-log mapping.
//!
//! [`replay`] rebuilds a state by applying events in order against the
//! model's own transforms, so whatever defensive behavior the model has
//! (out-of-range checks are no-ops) applies to decoded input for free.
//! [`record`] is its inverse for the current generation: one batched add,
//! one batched check, and an end-edit marker iff the checklist is finished.

use crate::model::ChecklistState;

use super::Event;

/// Rebuild a state by replaying events in order.
///
/// Replay starts from an empty state *in editing mode* — the log describes
/// an editing session, and a final [`Event::EndEdit`] is what finishes it.
/// The trailing-draft invariant is restored once at the end, not after
/// every event.
#[must_use]
pub fn replay(events: &[Event]) -> ChecklistState {
    let mut state = ChecklistState::empty().begin_editing();
    for event in events {
        state = match event {
            Event::AddEntries(texts) => texts
                .iter()
                .fold(state, |state, text| state.add_entry(text.clone())),
            Event::CheckEntries(indices) => indices
                .iter()
                .fold(state, |state, &index| state.check_entry(index, true)),
            Event::EndEdit => state.finish_editing(),
        };
    }
    state.ensure_draft_entry()
}

/// Record a state as a current-generation event log.
///
/// Emits the entries exactly as they are — blank filtering is
/// `finish_editing`'s job and has already happened for finished states.
/// Checked indices come out in ascending order, which together with the
/// fixed add/check/end layout makes recording deterministic.
#[must_use]
pub fn record(state: &ChecklistState) -> Vec<Event> {
    let texts = state
        .entries
        .iter()
        .map(|entry| entry.text.clone())
        .collect();
    let checked = state
        .entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.checked)
        .map(|(index, _)| index)
        .collect();

    let mut events = vec![Event::AddEntries(texts), Event::CheckEntries(checked)];
    if !state.editing {
        events.push(Event::EndEdit);
    }
    events
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
