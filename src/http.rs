// src/http.rs
// Shared HTTP client for the external prompt service

use std::time::Duration;

/// Default request timeout for generateContent calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the HTTP client used by service adapters.
///
/// The timeout belongs to the adapter; the session core never times out a
/// pending request on its own.
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(4)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
