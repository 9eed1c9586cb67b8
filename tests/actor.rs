use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use token_ledger::ledger::{LedgerActor, LedgerConfig, LedgerError, LedgerHandle};

async fn time_mints(ledger: &LedgerHandle, owner: &str, count: usize) -> Duration {
    let start = Instant::now();
    for _ in 0..count {
        ledger.create_token(owner).await.unwrap();
    }
    start.elapsed()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_actor_mints_no_duplicates() {
    let ledger = LedgerActor::spawn(LedgerConfig::default());
    ledger.register_holder("A").await.unwrap();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let ledger = ledger.clone();
            tokio::spawn(async move {
                let mut ids = Vec::new();
                for _ in 0..250 {
                    ids.push(ledger.create_token("A").await.unwrap().id);
                }
                ids
            })
        })
        .collect();

    let mut all = Vec::new();
    for task in tasks {
        all.extend(task.await.unwrap());
    }

    let unique: HashSet<&String> = all.iter().collect();
    assert_eq!(all.len(), 2000);
    assert_eq!(unique.len(), 2000);
    assert_eq!(ledger.list_tokens("A").len(), 2000);
}

#[tokio::test]
async fn test_reads_see_own_writes() {
    let ledger = LedgerActor::spawn(LedgerConfig::default());
    ledger.register_holder("A").await.unwrap();
    ledger.register_holder("B").await.unwrap();

    for _ in 0..20 {
        let token = ledger.create_token("A").await.unwrap();
        assert!(ledger.list_tokens("A").contains(&token));

        ledger.transfer_token(&token.id, "B").await.unwrap();
        assert!(!ledger.list_tokens("A").iter().any(|t| t.id == token.id));
        assert!(ledger.list_tokens("B").iter().any(|t| t.id == token.id));
    }
}

#[tokio::test]
async fn test_snapshot_is_stable() {
    let ledger = LedgerActor::spawn(LedgerConfig::default());
    ledger.register_holder("A").await.unwrap();
    ledger.create_token("A").await.unwrap();

    let snapshot = ledger.snapshot();
    ledger.create_token("A").await.unwrap();

    assert_eq!(snapshot.tokens_of("A").len(), 1);
    assert_eq!(snapshot.tokens_of("A"), snapshot.tokens_of("A"));
    assert_eq!(ledger.snapshot().tokens_of("A").len(), 2);
}

#[tokio::test]
async fn test_failed_mutations_publish_nothing() {
    let ledger = LedgerActor::spawn(LedgerConfig::default());
    ledger.register_holder("A").await.unwrap();
    let token = ledger.create_token("A").await.unwrap();
    let before = ledger.snapshot();

    assert!(matches!(
        ledger.create_token("Unregistered").await,
        Err(LedgerError::HolderNotFound(_))
    ));
    assert!(matches!(
        ledger.transfer_token("nonexistent-id", "A").await,
        Err(LedgerError::TokenNotFound(_))
    ));
    assert!(matches!(
        ledger.transfer_token(&token.id, "Unregistered").await,
        Err(LedgerError::HolderNotFound(_))
    ));
    assert!(matches!(
        ledger.register_holder("A").await,
        Ok(false)
    ));
    assert!(matches!(
        ledger.register_holder("").await,
        Err(LedgerError::InvalidHolderName(_))
    ));

    // Same Arc: no new snapshot was published
    assert!(Arc::ptr_eq(&before, &ledger.snapshot()));
    assert_eq!(ledger.list_tokens("A"), vec![token]);
}

#[tokio::test]
async fn test_mint_cost_does_not_grow_with_ledger() {
    let ledger = LedgerActor::spawn(LedgerConfig::default());
    ledger.register_holder("A").await.unwrap();
    ledger.register_holder("B").await.unwrap();

    let early = time_mints(&ledger, "A", 500).await;
    time_mints(&ledger, "B", 20_000).await;
    let late = time_mints(&ledger, "A", 500).await;

    // Copying the whole ledger on every publish would make the late batch
    // roughly forty times slower than the early one
    assert!(
        late < early * 10 + Duration::from_millis(250),
        "late batch took {:?}, early batch {:?}",
        late,
        early
    );
    assert_eq!(ledger.snapshot().token_count(), 21_000);
    assert_eq!(ledger.list_tokens("A").len(), 1_000);
}
