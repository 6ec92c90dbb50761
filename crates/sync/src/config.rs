use std::time::Duration;

/// Maximum concurrent force-sync requests (default: `10`).
pub const DEFAULT_MAX_IN_FLIGHT: usize = 10;

/// Per-request timeout (default: 30 s).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection details for the partner force-sync endpoint.
#[derive(Debug, Clone)]
pub struct ForceSyncConfig {
    /// Full URL the `POST` is sent to.
    pub url: String,
    /// Value of the `Authorization` header, sent verbatim.
    pub authorization: String,
    /// The `Referer` header is this prefix followed by the order id.
    pub referer_prefix: String,
    pub request_timeout: Duration,
    pub max_in_flight: usize,
    /// Skip TLS certificate validation for the partner host.
    pub accept_invalid_certs: bool,
}

impl ForceSyncConfig {
    /// Config with default timeout, concurrency, and certificate handling.
    pub fn new(
        url: impl Into<String>,
        authorization: impl Into<String>,
        referer_prefix: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            authorization: authorization.into(),
            referer_prefix: referer_prefix.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            accept_invalid_certs: true,
        }
    }

    /// `Referer` header value for `order_id`.
    pub fn referer_for(&self, order_id: &str) -> String {
        format!("{}{order_id}", self.referer_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_partner_limits() {
        let config = ForceSyncConfig::new("https://partner/sync", "token", "https://ui/orders/");
        assert_eq!(config.max_in_flight, 10);
        assert!(config.accept_invalid_certs);
        assert_eq!(config.referer_for("42"), "https://ui/orders/42");
    }
}
