//! ticklist-core library.
//!
//! A checklist whose entire durable state lives in the URL fragment. The
//! fragment holds a serialized *event log*, not a state snapshot: replaying
//! the log rebuilds the state, and the log — not the in-memory shape — is
//! the compatibility contract that keeps old links working as the tool
//! evolves.
//!
//! # Conventions
//!
//! - **Errors**: nothing in this crate is fatal. Malformed links decode to
//!   `None`, unknown events are skipped, out-of-range indices are no-ops.
//! - **Logging**: use `tracing` macros (`warn!`, `debug!`) for skipped
//!   events and discarded fragments.
//! - **State**: transforms consume a snapshot and return a new one; no
//!   mutation is visible to callers.

pub mod controller;
pub mod event;
pub mod model;
pub mod store;
pub mod transport;

pub use controller::{Controller, Intent};
pub use model::{ChecklistState, Entry};
pub use store::{MemorySlot, Slot, Store};
