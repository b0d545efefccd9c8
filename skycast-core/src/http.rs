//! Shared HTTP client setup for the outbound services.

use reqwest::Client;
use std::time::Duration;

/// Upper bound for a single request, connect plus body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client with a total request timeout.
///
/// Falls back to reqwest's default client if the builder rejects the TLS setup.
pub(crate) fn client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}
