//! The ledger: holders, tokens and the operations preserving their invariants
//!
//! Two concurrency disciplines are available over the same state:
//! - [`LedgerService`]: one mutex guards both registries for each operation
//! - [`LedgerActor`]: a single tokio task applies all mutations while
//!   readers query the latest published snapshot
//!
//! # Example
//!
//! ```
//! use token_ledger::ledger::LedgerService;
//!
//! let ledger = LedgerService::new();
//! ledger.register_holder("A").unwrap();
//! ledger.register_holder("B").unwrap();
//!
//! ledger.create_token("A").unwrap();
//! let t2 = ledger.create_token("B").unwrap();
//! ledger.transfer_token(&t2.id, "A").unwrap();
//!
//! assert_eq!(ledger.list_tokens("A").len(), 2);
//! assert!(ledger.list_tokens("B").is_empty());
//! ```

pub mod actor;
pub mod config;
pub mod error;
pub mod service;
pub mod snapshot;
mod state;
pub mod traits;

pub use actor::{LedgerActor, LedgerHandle};
pub use config::{LedgerConfig, DEFAULT_COMMAND_BUFFER};
pub use error::LedgerError;
pub use service::LedgerService;
pub use snapshot::{LedgerSnapshot, SnapshotError};
pub use traits::TokenLedger;
