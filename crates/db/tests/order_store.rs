//! Integration tests for the cached order store.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ceo_core::order::Order;
use ceo_core::types::{ClientId, Timestamp};
use ceo_db::source::OrderSource;
use ceo_db::store::{OrderStore, DEFAULT_CACHE_TTL};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Fake source
// ---------------------------------------------------------------------------

#[derive(Default)]
struct CountingSource {
    calls: AtomicUsize,
    fail: AtomicBool,
}

#[async_trait]
impl OrderSource for CountingSource {
    fn query_text(&self) -> String {
        "SELECT fake".to_string()
    }

    async fn list_since(
        &self,
        client_id: ClientId,
        since: Timestamp,
    ) -> Result<Vec<Order>, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(vec![Order {
            order_id: "1".to_string(),
            client_order_number: None,
            routing_order_number: None,
            market_order_id: None,
            request_id: None,
            claim_id: None,
            tariff: None,
            logistic_status: None,
            claim_status: None,
            created_at: since,
            logistics_code: None,
            client_id,
        }])
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(())
    }
}

fn since() -> Timestamp {
    Utc.with_ymd_and_hms(2023, 9, 28, 3, 0, 0).unwrap()
}

fn store(source: &Arc<CountingSource>, ttl: Duration) -> OrderStore {
    OrderStore::new(Arc::clone(source) as Arc<dyn OrderSource>, ttl)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_load_within_ttl_hits_cache() {
    let source = Arc::new(CountingSource::default());
    let store = store(&source, DEFAULT_CACHE_TTL);
    let client = Uuid::nil();

    let first = store.load(client, since()).await.unwrap();
    let second = store.load(client, since()).await.unwrap();

    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn invalidate_forces_requery() {
    let source = Arc::new(CountingSource::default());
    let store = store(&source, DEFAULT_CACHE_TTL);
    let client = Uuid::nil();

    store.load(client, since()).await.unwrap();
    store.invalidate().await;
    store.load(client, since()).await.unwrap();

    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn expired_snapshot_is_refetched() {
    let source = Arc::new(CountingSource::default());
    let store = store(&source, Duration::from_secs(60));
    let client = Uuid::nil();

    store.load(client, since()).await.unwrap();
    tokio::time::advance(Duration::from_secs(61)).await;
    store.load(client, since()).await.unwrap();

    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn different_window_is_a_different_entry() {
    let source = Arc::new(CountingSource::default());
    let store = store(&source, DEFAULT_CACHE_TTL);
    let client = Uuid::nil();

    store.load(client, since()).await.unwrap();
    store
        .load(client, since() + chrono::Duration::days(1))
        .await
        .unwrap();

    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn errors_are_returned_and_not_cached() {
    let source = Arc::new(CountingSource::default());
    source.fail.store(true, Ordering::SeqCst);
    let store = store(&source, DEFAULT_CACHE_TTL);
    let client = Uuid::nil();

    let err = store.load(client, since()).await.unwrap_err();
    assert!(matches!(err, sqlx::Error::PoolTimedOut));

    source.fail.store(false, Ordering::SeqCst);
    let snapshot = store.load(client, since()).await.unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn ping_reports_source_failure() {
    let source = Arc::new(CountingSource::default());
    let store = store(&source, DEFAULT_CACHE_TTL);
    assert!(store.ping().await.is_ok());

    source.fail.store(true, Ordering::SeqCst);
    assert!(matches!(store.ping().await, Err(sqlx::Error::PoolClosed)));
}

#[tokio::test]
async fn cached_snapshots_counts_loaded_windows() {
    let source = Arc::new(CountingSource::default());
    let store = store(&source, DEFAULT_CACHE_TTL);
    assert_eq!(store.cached_snapshots().await, 0);

    store.load(Uuid::nil(), since()).await.unwrap();
    assert_eq!(store.cached_snapshots().await, 1);

    store.invalidate().await;
    assert_eq!(store.cached_snapshots().await, 0);
}
