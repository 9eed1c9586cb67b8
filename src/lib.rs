//! Token Ledger: a minimal non-fungible token ownership ledger in Rust
//!
//! This crate tracks uniquely identified, indivisible tokens assigned to
//! named holders:
//! - Holder registry with idempotent registration
//! - Token ids drawn from the OS CSPRNG with bounded collision retry
//! - Mint, transfer and per-holder listing with all-or-nothing failures
//! - Lock-guarded service and single-writer actor disciplines
//! - Pluggable key-value store binding
//!
//! # Example
//!
//! ```rust
//! use token_ledger::ledger::{LedgerError, LedgerService};
//!
//! let ledger = LedgerService::new();
//! ledger.register_holder("A").unwrap();
//! ledger.register_holder("B").unwrap();
//!
//! // Mint a token and hand it over
//! let token = ledger.create_token("A").unwrap();
//! ledger.transfer_token(&token.id, "B").unwrap();
//!
//! let held = ledger.list_tokens("B");
//! assert_eq!(held.len(), 1);
//! assert_eq!(held[0].id, token.id);
//!
//! // Unknown holders are rejected
//! assert!(matches!(
//!     ledger.create_token("Unregistered"),
//!     Err(LedgerError::HolderNotFound(_))
//! ));
//! ```

pub mod cli;
pub mod crypto;
pub mod holder;
pub mod ledger;
pub mod storage;
pub mod token;

// Re-export commonly used types
pub use crypto::{EntropyError, IdSource, OsIdGenerator};
pub use holder::{Holder, HolderRegistry};
pub use ledger::{
    LedgerActor, LedgerConfig, LedgerError, LedgerHandle, LedgerService, LedgerSnapshot,
    SnapshotError, TokenLedger,
};
pub use storage::{KeyValueStore, MemoryStore, StoreLedger};
pub use token::{Token, TokenRegistry};
