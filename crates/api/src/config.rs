use std::time::Duration;

use ceo_core::batching::DEFAULT_BATCH_GAP_SECS;
use ceo_core::types::ClientId;
use ceo_core::window::DEFAULT_TIMEZONE;
use ceo_sync::config::{DEFAULT_MAX_IN_FLIGHT, DEFAULT_REQUEST_TIMEOUT};
use ceo_sync::ForceSyncConfig;
use chrono_tz::Tz;

/// Server configuration loaded from environment variables.
///
/// Server fields have defaults suitable for local development. The client
/// id and the force-sync endpoint have no sensible default and must be set.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub dashboard: DashboardConfig,
    pub force_sync: ForceSyncConfig,
}

/// What the dashboard reports on and how.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// The one client whose CE orders are shown.
    pub client_id: ClientId,
    /// Zone for the reporting window, displayed times, and export date.
    pub timezone: Tz,
    /// Lifetime of a cached order snapshot in seconds (default: `60`).
    pub cache_ttl_secs: u64,
    /// Idle gap in seconds that starts a new batch (default: `3600`).
    pub batch_gap_secs: i64,
}

impl DashboardConfig {
    pub fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            timezone: DEFAULT_TIMEZONE,
            cache_ttl_secs: 60,
            batch_gap_secs: DEFAULT_BATCH_GAP_SECS,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn batch_gap(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.batch_gap_secs)
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `HOST`                       | `0.0.0.0`               |
    /// | `PORT`                       | `3000`                  |
    /// | `CORS_ORIGINS`               | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                    |
    /// | `CE_CLIENT_ID`               | required                |
    /// | `DASHBOARD_TIMEZONE`         | `America/Santiago`      |
    /// | `ORDER_CACHE_TTL_SECS`       | `60`                    |
    /// | `BATCH_GAP_SECS`             | `3600`                  |
    /// | `FORCE_SYNC_URL`             | required                |
    /// | `FORCE_SYNC_AUTHORIZATION`   | required                |
    /// | `FORCE_SYNC_REFERER_PREFIX`  | empty                   |
    /// | `FORCE_SYNC_MAX_IN_FLIGHT`   | `10`                    |
    /// | `FORCE_SYNC_TIMEOUT_SECS`    | `30`                    |
    ///
    /// Panics on missing required variables or unparsable values; a
    /// misconfigured dashboard should not start.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            dashboard: dashboard_from_env(),
            force_sync: force_sync_from_env(),
        }
    }
}

fn dashboard_from_env() -> DashboardConfig {
    let client_id: ClientId = std::env::var("CE_CLIENT_ID")
        .expect("CE_CLIENT_ID must be set")
        .trim()
        .parse()
        .expect("CE_CLIENT_ID must be a UUID");

    let timezone: Tz = match std::env::var("DASHBOARD_TIMEZONE") {
        Ok(name) => name
            .parse()
            .unwrap_or_else(|e| panic!("Invalid DASHBOARD_TIMEZONE '{name}': {e}")),
        Err(_) => DEFAULT_TIMEZONE,
    };

    let cache_ttl_secs: u64 = std::env::var("ORDER_CACHE_TTL_SECS")
        .unwrap_or_else(|_| "60".into())
        .parse()
        .expect("ORDER_CACHE_TTL_SECS must be a valid u64");

    let batch_gap_secs: i64 = std::env::var("BATCH_GAP_SECS")
        .unwrap_or_else(|_| DEFAULT_BATCH_GAP_SECS.to_string())
        .parse()
        .expect("BATCH_GAP_SECS must be a valid i64");

    DashboardConfig {
        client_id,
        timezone,
        cache_ttl_secs,
        batch_gap_secs,
    }
}

fn force_sync_from_env() -> ForceSyncConfig {
    let url = std::env::var("FORCE_SYNC_URL").expect("FORCE_SYNC_URL must be set");
    let authorization =
        std::env::var("FORCE_SYNC_AUTHORIZATION").expect("FORCE_SYNC_AUTHORIZATION must be set");
    let referer_prefix = std::env::var("FORCE_SYNC_REFERER_PREFIX").unwrap_or_default();

    let max_in_flight: usize = std::env::var("FORCE_SYNC_MAX_IN_FLIGHT")
        .unwrap_or_else(|_| DEFAULT_MAX_IN_FLIGHT.to_string())
        .parse()
        .expect("FORCE_SYNC_MAX_IN_FLIGHT must be a valid usize");

    let request_timeout = match std::env::var("FORCE_SYNC_TIMEOUT_SECS") {
        Ok(secs) => Duration::from_secs(
            secs.parse()
                .expect("FORCE_SYNC_TIMEOUT_SECS must be a valid u64"),
        ),
        Err(_) => DEFAULT_REQUEST_TIMEOUT,
    };

    ForceSyncConfig {
        max_in_flight,
        request_timeout,
        ..ForceSyncConfig::new(url, authorization, referer_prefix)
    }
}
