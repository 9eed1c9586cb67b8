//! Cryptographic utilities for the ledger
//!
//! This module provides:
//! - Token identifier generation from the OS CSPRNG
//! - Identifier format checks

pub mod id;

pub use id::{is_valid_token_id, EntropyError, IdSource, OsIdGenerator, TOKEN_ID_BYTES, TOKEN_ID_LEN};
