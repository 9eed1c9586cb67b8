//! Storage interface for binding the ledger to an external key-value store

pub mod ledger;
pub mod store;

pub use ledger::StoreLedger;
pub use store::{KeyValueStore, MemoryStore, StoreError};
