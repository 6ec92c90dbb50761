/// Error type for a single force-sync call.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The partner returned a non-2xx status code.
    #[error("Force sync returned HTTP {0}")]
    HttpStatus(u16),

    /// The HTTP client or a header value could not be built.
    #[error("Invalid client configuration: {0}")]
    Client(String),
}
