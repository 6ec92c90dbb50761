//! HTTP client for the partner force-sync endpoint.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, REFERER};
use serde::Serialize;

use crate::config::ForceSyncConfig;
use crate::error::SyncError;

/// Anything that can force-sync a single order.
#[async_trait]
pub trait SyncTarget: Send + Sync {
    async fn force_sync(&self, order_id: &str) -> Result<(), SyncError>;
}

#[derive(Debug, Serialize)]
struct ForceSyncBody<'a> {
    id: &'a str,
}

/// Sends `POST <url>` with `{"id": <order id>}` to the partner platform.
#[derive(Debug)]
pub struct ForceSyncClient {
    client: reqwest::Client,
    config: ForceSyncConfig,
}

impl ForceSyncClient {
    /// Build the client. Fails if the credential is not a valid header value
    /// or the TLS backend cannot be initialised.
    pub fn new(config: ForceSyncConfig) -> Result<Self, SyncError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en"));
        let mut auth = HeaderValue::from_str(&config.authorization)
            .map_err(|e| SyncError::Client(format!("authorization header: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| SyncError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ForceSyncConfig {
        &self.config
    }
}

#[async_trait]
impl SyncTarget for ForceSyncClient {
    async fn force_sync(&self, order_id: &str) -> Result<(), SyncError> {
        let referer = HeaderValue::from_str(&self.config.referer_for(order_id))
            .map_err(|e| SyncError::Client(format!("referer header: {e}")))?;

        let response = self
            .client
            .post(&self.config.url)
            .header(REFERER, referer)
            .json(&ForceSyncBody { id: order_id })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SyncError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn rejects_credential_with_newline() {
        let config = ForceSyncConfig::new("http://localhost/sync", "bad\ntoken", "");
        assert_matches!(ForceSyncClient::new(config), Err(SyncError::Client(_)));
    }

    #[test]
    fn error_display_http_status() {
        let err = SyncError::HttpStatus(502);
        assert_eq!(err.to_string(), "Force sync returned HTTP 502");
    }

    #[test]
    fn body_serializes_id_only() {
        let body = serde_json::to_value(ForceSyncBody { id: "77" }).unwrap();
        assert_eq!(body, serde_json::json!({ "id": "77" }));
    }
}
