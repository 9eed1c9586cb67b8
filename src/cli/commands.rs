//! CLI commands for the ledger
//!
//! Implements the command handlers used by the `ledger` binary.

use crate::ledger::{LedgerConfig, LedgerService, TokenLedger};
use crate::storage::{MemoryStore, StoreLedger};
use crate::token::Token;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Which ledger implementation a command runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// Lock-guarded in-memory registries
    Memory,
    /// Ledger over a key-value store
    Store,
}

/// Holders registered by the demo
pub const DEMO_HOLDERS: [&str; 3] = ["Andreas Koronias", "Elias Iosif", "George Georgiou"];

/// Build a ledger for the chosen backend
pub fn open_ledger(backend: Backend, config: LedgerConfig) -> Box<dyn TokenLedger> {
    match backend {
        Backend::Memory => Box::new(LedgerService::with_config(config)),
        Backend::Store => Box::new(StoreLedger::with_config(MemoryStore::new(), config)),
    }
}

fn print_token(label: &str, token: &Token, json: bool) -> CliResult<()> {
    if json {
        println!("{} {}", label, serde_json::to_string(token)?);
    } else {
        println!("{} {} (owner: {})", label, token.id, token.owner);
    }
    Ok(())
}

/// Run the demo scenario: mint two tokens, move one, list the receiver
///
/// Returns the tokens held by the receiving holder at the end.
pub fn cmd_demo(backend: Backend, config: LedgerConfig, json: bool) -> CliResult<Vec<Token>> {
    let ledger = open_ledger(backend, config);
    let [first, second, receiver] = DEMO_HOLDERS;

    for name in DEMO_HOLDERS {
        ledger.register_holder(name)?;
    }
    println!("👥 Registered {} holders ({:?} backend)", DEMO_HOLDERS.len(), backend);

    let token1 = ledger.create_token(first)?;
    print_token("🪙 Token created:", &token1, json)?;

    let token2 = ledger.create_token(second)?;
    print_token("🪙 Token created:", &token2, json)?;

    ledger.transfer_token(&token2.id, receiver)?;
    println!("📤 Token {} transferred to {}", token2.id, receiver);

    let owned = ledger.list_tokens(receiver)?;
    println!("📋 {}'s tokens ({}):", receiver, owned.len());
    for token in &owned {
        print_token("   └─", token, json)?;
    }

    Ok(owned)
}

/// Outcome of a concurrent mint run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressReport {
    pub minted: usize,
    pub failed: usize,
    pub unique_ids: usize,
    pub registry_size: usize,
}

impl StressReport {
    /// True when every minted token has its own id and none went missing
    pub fn is_consistent(&self) -> bool {
        self.unique_ids == self.minted && self.registry_size == self.minted
    }
}

/// Mint from several threads at once against one shared ledger
pub fn run_stress(ledger: Arc<LedgerService>, threads: usize, mints_per_thread: usize) -> StressReport {
    let workers: Vec<_> = (0..threads)
        .map(|worker| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                let holder = format!("holder-{}", worker);
                let mut ids = Vec::with_capacity(mints_per_thread);
                let mut failed = 0;

                if ledger.register_holder(&holder).is_err() {
                    return (ids, mints_per_thread);
                }
                for _ in 0..mints_per_thread {
                    match ledger.create_token(&holder) {
                        Ok(token) => ids.push(token.id),
                        Err(e) => {
                            log::warn!("Mint failed for {}: {}", holder, e);
                            failed += 1;
                        }
                    }
                }
                (ids, failed)
            })
        })
        .collect();

    let mut all_ids = Vec::new();
    let mut failed = 0;
    for worker in workers {
        match worker.join() {
            Ok((ids, worker_failed)) => {
                all_ids.extend(ids);
                failed += worker_failed;
            }
            Err(_) => {
                log::error!("Stress worker panicked");
                failed += mints_per_thread;
            }
        }
    }

    let unique: HashSet<&String> = all_ids.iter().collect();
    StressReport {
        minted: all_ids.len(),
        failed,
        unique_ids: unique.len(),
        registry_size: ledger.token_count(),
    }
}

/// Run the concurrent mint stress test and print the results
pub fn cmd_stress(config: LedgerConfig, threads: usize, mints: usize) -> CliResult<StressReport> {
    let ledger = Arc::new(LedgerService::with_config(config));

    println!("⚙️  Minting {} token(s) on each of {} thread(s)...", mints, threads);
    let started = Instant::now();
    let report = run_stress(ledger, threads, mints);
    let elapsed = started.elapsed();

    println!("   ├─ Minted: {}", report.minted);
    println!("   ├─ Failed: {}", report.failed);
    println!("   ├─ Duplicate ids: {}", report.minted - report.unique_ids);
    println!("   ├─ Registry size: {}", report.registry_size);
    println!("   └─ Time: {}ms", elapsed.as_millis());

    if report.is_consistent() {
        println!("\n✅ No duplicate ids and no lost mints");
    } else {
        println!("\n❌ Ledger inconsistent after concurrent mints!");
    }

    Ok(report)
}
