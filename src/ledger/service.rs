//! Lock-guarded ledger service
//!
//! A single mutex covers both registries and the id source, so every
//! operation (including the read-then-write of mint and transfer) runs as
//! one atomic unit. Share it across threads with `Arc<LedgerService>`.

use crate::crypto::{IdSource, OsIdGenerator};
use crate::ledger::config::LedgerConfig;
use crate::ledger::error::LedgerError;
use crate::ledger::snapshot::LedgerSnapshot;
use crate::ledger::state::LedgerState;
use crate::ledger::TokenLedger;
use crate::token::Token;
use parking_lot::Mutex;

/// The public ledger: holders, tokens and the operations over them
pub struct LedgerService {
    state: Mutex<LedgerState>,
    config: LedgerConfig,
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerService {
    /// Create an empty ledger with the default configuration
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create an empty ledger drawing ids from the OS random source
    pub fn with_config(config: LedgerConfig) -> Self {
        Self::with_id_source(config, OsIdGenerator::new())
    }

    /// Create an empty ledger with a custom id source
    pub fn with_id_source<S: IdSource + 'static>(config: LedgerConfig, ids: S) -> Self {
        let state = LedgerState::new(&config, Box::new(ids));
        Self {
            state: Mutex::new(state),
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Register a holder; `Ok(false)` if it already existed
    pub fn register_holder(&self, name: &str) -> Result<bool, LedgerError> {
        self.state.lock().register_holder(name)
    }

    pub fn holder_exists(&self, name: &str) -> bool {
        self.state.lock().holder_exists(name)
    }

    /// Mint a new token to a registered holder
    pub fn create_token(&self, owner: &str) -> Result<Token, LedgerError> {
        self.state.lock().create_token(owner)
    }

    /// Transfer a token to another registered holder
    pub fn transfer_token(&self, token_id: &str, new_owner: &str) -> Result<(), LedgerError> {
        self.state.lock().transfer_token(token_id, new_owner)
    }

    /// Tokens currently owned by `owner`, in id order
    pub fn list_tokens(&self, owner: &str) -> Vec<Token> {
        self.state.lock().list_tokens(owner)
    }

    /// Look up a single token
    pub fn token(&self, token_id: &str) -> Option<Token> {
        self.state.lock().token(token_id)
    }

    pub fn holder_count(&self) -> usize {
        self.state.lock().holder_count()
    }

    pub fn token_count(&self) -> usize {
        self.state.lock().token_count()
    }

    /// Consistent copy of the whole ledger
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.lock().snapshot()
    }
}

impl TokenLedger for LedgerService {
    fn register_holder(&self, name: &str) -> Result<bool, LedgerError> {
        LedgerService::register_holder(self, name)
    }

    fn create_token(&self, owner: &str) -> Result<Token, LedgerError> {
        LedgerService::create_token(self, owner)
    }

    fn transfer_token(&self, token_id: &str, new_owner: &str) -> Result<(), LedgerError> {
        LedgerService::transfer_token(self, token_id, new_owner)
    }

    fn list_tokens(&self, owner: &str) -> Result<Vec<Token>, LedgerError> {
        Ok(self.state.lock().list_tokens(owner))
    }
}
