//! Canonical employee record store.
//!
//! # Responsibility
//! - Own the session's record list and its id counter.
//! - Persist the full list after every mutation.
//! - Carry the edit-session marker between list and form views.
//!
//! # Invariants
//! - Record ids are unique within the store.
//! - Every successful mutation is followed by a full overwrite of the
//!   persisted entry; a failed write leaves the in-memory list unchanged.

pub mod record_store;

pub use record_store::{
    RecordStore, StoreError, StoreResult, UpsertOutcome, EDIT_ID_KEY, EMPLOYEES_KEY,
};
