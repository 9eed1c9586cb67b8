//! Ledger configuration

use crate::token::DEFAULT_MAX_ID_ATTEMPTS;

/// Default capacity of the actor command channel
pub const DEFAULT_COMMAND_BUFFER: usize = 64;

/// Ledger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Maximum id draws per mint before failing with `IdExhausted`
    pub max_id_attempts: u32,
    /// Pending-command capacity for the single-writer actor
    pub command_buffer: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
            command_buffer: DEFAULT_COMMAND_BUFFER,
        }
    }
}

impl LedgerConfig {
    pub fn with_max_id_attempts(mut self, attempts: u32) -> Self {
        self.max_id_attempts = attempts.max(1);
        self
    }

    pub fn with_command_buffer(mut self, capacity: usize) -> Self {
        self.command_buffer = capacity.max(1);
        self
    }
}
