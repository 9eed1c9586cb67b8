//! Holders: named entities that can own tokens
//!
//! A holder must be registered before tokens can be minted to it or
//! transferred to it. Registration is idempotent.
//!
//! # Example
//!
//! ```
//! use token_ledger::holder::HolderRegistry;
//!
//! let mut holders = HolderRegistry::new();
//! assert!(holders.register("Andreas Koronias").unwrap());
//! assert!(holders.exists("Andreas Koronias"));
//! ```

pub mod holder;
pub mod registry;

pub use holder::{Holder, HolderError};
pub use registry::HolderRegistry;
