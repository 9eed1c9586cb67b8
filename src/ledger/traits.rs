//! Backend-agnostic ledger interface

use crate::ledger::error::LedgerError;
use crate::token::Token;

/// The ledger operations, independent of where the records live
///
/// Implemented by the in-memory [`LedgerService`](crate::ledger::LedgerService)
/// and the key-value backed [`StoreLedger`](crate::storage::StoreLedger).
pub trait TokenLedger {
    /// Register a holder; `Ok(false)` if it was already registered
    fn register_holder(&self, name: &str) -> Result<bool, LedgerError>;

    /// Mint a new token to a registered holder
    fn create_token(&self, owner: &str) -> Result<Token, LedgerError>;

    /// Move a token to another registered holder
    fn transfer_token(&self, token_id: &str, new_owner: &str) -> Result<(), LedgerError>;

    /// Tokens owned by `owner` in id order; empty for unknown holders
    fn list_tokens(&self, owner: &str) -> Result<Vec<Token>, LedgerError>;
}
