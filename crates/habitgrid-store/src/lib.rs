//! # habitgrid-store
//!
//! [`RecordStore`](habitgrid_core::RecordStore) implementations:
//!
//! - [`MemoryStore`]: records held in a vector; used by tests and anywhere a
//!   throwaway store is enough.
//! - [`JsonStore`]: the whole store state as one JSON document on disk,
//!   rewritten after every mutation. Last write wins; there is no locking
//!   against concurrent writers.
//!
//! Both honor the same contract: listings come back date-descending, toggles
//! on unknown ids fail with `NotFound`, and the start-date setting is a
//! singleton upsert.

pub mod json;
pub mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;
