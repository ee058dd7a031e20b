use std::time::Duration;

/// Build the shared HTTP client used for every catalog call.
///
/// One client is built at startup and cloned into each consumer so the
/// connection pool is shared.
///
/// # Features
/// - **Timeouts**: whole-request timeout from configuration, 10s connect timeout
/// - **Compression**: gzip, deflate, brotli and zstd
/// - **HTTP/2**: adaptive window sizing and keep-alive
/// - **TLS**: Rustls, no OpenSSL dependency
pub fn build_http_client(request_timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(request_timeout)
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        // Enable compression (gzip, deflate, brotli, zstd)
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_initialization() {
        assert!(build_http_client(Duration::from_secs(5)).is_ok());
    }
}
