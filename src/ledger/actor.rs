//! Single-writer ledger actor
//!
//! One tokio task owns the registries and applies every mutation in arrival
//! order. Readers never contact the task: after each successful mutation the
//! actor publishes a fresh snapshot on a watch channel *before* replying, so
//! a caller that awaited a mutation always observes it in later reads.

use crate::crypto::{IdSource, OsIdGenerator};
use crate::ledger::config::LedgerConfig;
use crate::ledger::error::LedgerError;
use crate::ledger::snapshot::LedgerSnapshot;
use crate::ledger::state::LedgerState;
use crate::token::Token;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

type Reply<T> = oneshot::Sender<Result<T, LedgerError>>;

enum Command {
    RegisterHolder {
        name: String,
        reply: Reply<bool>,
    },
    CreateToken {
        owner: String,
        reply: Reply<Token>,
    },
    TransferToken {
        token_id: String,
        new_owner: String,
        reply: Reply<()>,
    },
    Shutdown,
}

/// Task that owns a ledger's state
pub struct LedgerActor {
    state: LedgerState,
    commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<Arc<LedgerSnapshot>>,
}

impl LedgerActor {
    /// Start an actor drawing ids from the OS random source
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: LedgerConfig) -> LedgerHandle {
        Self::spawn_with_id_source(config, OsIdGenerator::new())
    }

    /// Start an actor with a custom id source
    pub fn spawn_with_id_source<S: IdSource + 'static>(config: LedgerConfig, ids: S) -> LedgerHandle {
        let (command_tx, command_rx) = mpsc::channel(config.command_buffer.max(1));
        let state = LedgerState::new(&config, Box::new(ids));
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(state.snapshot()));

        let actor = Self {
            state,
            commands: command_rx,
            snapshots: snapshot_tx,
        };
        tokio::spawn(actor.run());

        LedgerHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        }
    }

    async fn run(mut self) {
        log::info!("Ledger actor started");

        while let Some(command) = self.commands.recv().await {
            if !self.handle(command) {
                break;
            }
        }

        log::info!("Ledger actor stopped");
    }

    /// Apply one command; returns false when the actor should stop
    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::RegisterHolder { name, reply } => {
                let result = self.state.register_holder(&name);
                if matches!(result, Ok(true)) {
                    self.publish();
                }
                let _ = reply.send(result);
            }
            Command::CreateToken { owner, reply } => {
                let result = self.state.create_token(&owner);
                if result.is_ok() {
                    self.publish();
                }
                let _ = reply.send(result);
            }
            Command::TransferToken {
                token_id,
                new_owner,
                reply,
            } => {
                let result = self.state.transfer_token(&token_id, &new_owner);
                if result.is_ok() {
                    self.publish();
                }
                let _ = reply.send(result);
            }
            Command::Shutdown => return false,
        }
        true
    }

    /// O(1): the snapshot shares the state's persistent maps
    fn publish(&self) {
        self.snapshots.send_replace(Arc::new(self.state.snapshot()));
    }
}

/// Cloneable handle to a running [`LedgerActor`]
#[derive(Clone)]
pub struct LedgerHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Arc<LedgerSnapshot>>,
}

impl LedgerHandle {
    pub async fn register_holder(&self, name: &str) -> Result<bool, LedgerError> {
        self.request(|reply| Command::RegisterHolder {
            name: name.to_string(),
            reply,
        })
        .await
    }

    pub async fn create_token(&self, owner: &str) -> Result<Token, LedgerError> {
        self.request(|reply| Command::CreateToken {
            owner: owner.to_string(),
            reply,
        })
        .await
    }

    pub async fn transfer_token(&self, token_id: &str, new_owner: &str) -> Result<(), LedgerError> {
        self.request(|reply| Command::TransferToken {
            token_id: token_id.to_string(),
            new_owner: new_owner.to_string(),
            reply,
        })
        .await
    }

    /// Tokens owned by `owner` in the latest published snapshot
    pub fn list_tokens(&self, owner: &str) -> Vec<Token> {
        self.snapshots.borrow().tokens_of(owner)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<LedgerSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Ask the actor to stop; later requests fail with `Unavailable`
    pub async fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown).await;
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, LedgerError> {
        let (reply, response) = oneshot::channel();

        self.commands
            .send(build(reply))
            .await
            .map_err(|_| LedgerError::Unavailable("ledger actor has stopped".to_string()))?;

        response
            .await
            .map_err(|_| LedgerError::Unavailable("ledger actor dropped the request".to_string()))?
    }
}
