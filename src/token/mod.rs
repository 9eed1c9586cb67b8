//! Non-fungible token implementation
//!
//! Provides uniquely identified, indivisible tokens with:
//! - Minting to a registered holder
//! - Transfers between registered holders
//! - Ownership listing per holder
//!
//! # Example
//!
//! ```
//! use token_ledger::crypto::OsIdGenerator;
//! use token_ledger::holder::HolderRegistry;
//! use token_ledger::token::TokenRegistry;
//!
//! let mut holders = HolderRegistry::new();
//! holders.register("alice").unwrap();
//! holders.register("bob").unwrap();
//!
//! let mut tokens = TokenRegistry::new();
//! let mut ids = OsIdGenerator::new();
//!
//! let token = tokens.mint(&holders, &mut ids, "alice").unwrap();
//! tokens.transfer(&holders, &token.id, "bob").unwrap();
//!
//! assert_eq!(tokens.list_by_owner("bob").len(), 1);
//! assert!(tokens.list_by_owner("alice").is_empty());
//! ```

pub mod registry;
pub mod token;

pub use registry::{TokenRegistry, DEFAULT_MAX_ID_ATTEMPTS};
pub use token::{Token, TokenError};
