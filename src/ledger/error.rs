//! Errors reported by the ledger operations

use crate::crypto::EntropyError;
use crate::holder::HolderError;
use crate::storage::StoreError;
use crate::token::TokenError;
use thiserror::Error;

/// Ledger-level errors
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Holder not found: {0}")]
    HolderNotFound(String),
    #[error("Token not found: {0}")]
    TokenNotFound(String),
    #[error("Failed to generate token id: {0}")]
    Entropy(#[from] EntropyError),
    #[error("No unique token id found after {attempts} attempts")]
    IdExhausted { attempts: u32 },
    #[error("Invalid holder name: {0}")]
    InvalidHolderName(#[from] HolderError),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

impl From<TokenError> for LedgerError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::HolderNotFound(name) => LedgerError::HolderNotFound(name),
            TokenError::TokenNotFound(id) => LedgerError::TokenNotFound(id),
            TokenError::Entropy(e) => LedgerError::Entropy(e),
            TokenError::IdExhausted { attempts } => LedgerError::IdExhausted { attempts },
        }
    }
}
