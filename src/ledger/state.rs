//! Registries and id source owned by one ledger
//!
//! Holds the whole mutable state of a ledger. It is never shared directly:
//! `LedgerService` guards it with a lock and `LedgerActor` owns it on a task.

use crate::crypto::IdSource;
use crate::holder::HolderRegistry;
use crate::ledger::config::LedgerConfig;
use crate::ledger::error::LedgerError;
use crate::ledger::snapshot::LedgerSnapshot;
use crate::token::{Token, TokenRegistry};

pub(crate) struct LedgerState {
    holders: HolderRegistry,
    tokens: TokenRegistry,
    ids: Box<dyn IdSource>,
}

impl LedgerState {
    pub(crate) fn new(config: &LedgerConfig, ids: Box<dyn IdSource>) -> Self {
        Self {
            holders: HolderRegistry::new(),
            tokens: TokenRegistry::with_max_id_attempts(config.max_id_attempts),
            ids,
        }
    }

    pub(crate) fn register_holder(&mut self, name: &str) -> Result<bool, LedgerError> {
        Ok(self.holders.register(name)?)
    }

    pub(crate) fn holder_exists(&self, name: &str) -> bool {
        self.holders.exists(name)
    }

    pub(crate) fn create_token(&mut self, owner: &str) -> Result<Token, LedgerError> {
        Ok(self.tokens.mint(&self.holders, self.ids.as_mut(), owner)?)
    }

    pub(crate) fn transfer_token(
        &mut self,
        token_id: &str,
        new_owner: &str,
    ) -> Result<(), LedgerError> {
        Ok(self.tokens.transfer(&self.holders, token_id, new_owner)?)
    }

    pub(crate) fn list_tokens(&self, owner: &str) -> Vec<Token> {
        self.tokens.list_by_owner(owner)
    }

    pub(crate) fn token(&self, token_id: &str) -> Option<Token> {
        self.tokens.get(token_id).cloned()
    }

    pub(crate) fn holder_count(&self) -> usize {
        self.holders.len()
    }

    pub(crate) fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// O(1): shares the registries' persistent maps
    pub(crate) fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::capture(&self.holders, &self.tokens)
    }
}
