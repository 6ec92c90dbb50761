#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use ceo_core::order::Order;
use ceo_core::types::{ClientId, Timestamp};
use ceo_db::source::OrderSource;
use ceo_db::store::{OrderStore, DEFAULT_CACHE_TTL};
use ceo_sync::{ForceSyncConfig, SyncDispatcher, SyncError, SyncTarget};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use ceo_api::config::{DashboardConfig, ServerConfig};
use ceo_api::router::build_app_router;
use ceo_api::state::AppState;

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// In-memory order source that counts queries.
#[derive(Default)]
pub struct FakeSource {
    pub orders: Mutex<Vec<Order>>,
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl FakeSource {
    pub fn with_orders(orders: Vec<Order>) -> Arc<Self> {
        Arc::new(Self {
            orders: Mutex::new(orders),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderSource for FakeSource {
    fn query_text(&self) -> String {
        "SELECT fake orders".to_string()
    }

    async fn list_since(
        &self,
        _client_id: ClientId,
        _since: Timestamp,
    ) -> Result<Vec<Order>, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

/// Sync target that records the ids it was asked to sync.
#[derive(Default)]
pub struct RecordingTarget {
    pub synced: Mutex<Vec<String>>,
}

impl RecordingTarget {
    pub fn synced_sorted(&self) -> Vec<String> {
        let mut ids = self.synced.lock().unwrap().clone();
        ids.sort();
        ids
    }
}

#[async_trait]
impl SyncTarget for RecordingTarget {
    async fn force_sync(&self, order_id: &str) -> Result<(), SyncError> {
        self.synced.lock().unwrap().push(order_id.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn client_id() -> ClientId {
    Uuid::parse_str("8fcba125-637e-4365-95c4-17e5659ea485").unwrap()
}

/// An order created at `h:m` UTC on 29 Sep 2023.
pub fn order(id: &str, h: u32, m: u32, code: Option<&str>) -> Order {
    Order {
        order_id: id.to_string(),
        client_order_number: Some(format!("BC-{id}")),
        routing_order_number: Some(format!("R-{id}")),
        market_order_id: None,
        request_id: None,
        claim_id: None,
        tariff: Some("express".to_string()),
        logistic_status: Some("created".to_string()),
        claim_status: None,
        created_at: Utc.with_ymd_and_hms(2023, 9, 29, h, m, 0).unwrap(),
        logistics_code: code.map(str::to_string),
        client_id: client_id(),
    }
}

/// Two batches: `a`,`b` at 13:00/13:30 and `c`,`d` at 15:00/15:10.
/// `b` and `c` have no logistics code.
pub fn sample_orders() -> Vec<Order> {
    vec![
        order("a", 13, 0, Some("111")),
        order("b", 13, 30, None),
        order("c", 15, 0, None),
        order("d", 15, 10, Some("444")),
    ]
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        dashboard: DashboardConfig::new(client_id()),
        force_sync: ForceSyncConfig::new("http://127.0.0.1:9/sync", "test-token", ""),
    }
}

/// Build the full application router over the given fakes.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app(source: Arc<FakeSource>, target: Arc<RecordingTarget>) -> Router {
    build_test_app_with_target(source, target)
}

/// Like [`build_test_app`] but with any [`SyncTarget`] behind the dispatcher.
pub fn build_test_app_with_target(source: Arc<FakeSource>, target: Arc<dyn SyncTarget>) -> Router {
    let config = test_config();
    let state = AppState {
        orders: Arc::new(OrderStore::new(source, DEFAULT_CACHE_TTL)),
        sync: Arc::new(SyncDispatcher::new(target, config.force_sync.max_in_flight)),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
