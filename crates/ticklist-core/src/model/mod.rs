//! Pure checklist data shapes and their invariant-preserving transforms.
//!
//! Everything here is snapshot-in, snapshot-out: a transform consumes a
//! [`ChecklistState`], returns a new one, and never errors. Indices arrive
//! from untrusted decoded links, so out-of-range operations are defensive
//! no-ops rather than panics.

pub mod checklist;
pub mod entry;

pub use checklist::ChecklistState;
pub use entry::Entry;
