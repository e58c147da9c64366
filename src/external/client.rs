use std::sync::LazyLock;
use std::time::Duration;

/// User-Agent sent with every gateway request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Global HTTP client instance shared by all push providers
///
/// Initialized lazily on first access. Connection pooling means repeated
/// sends to the gateway reuse TCP/TLS sessions. Per-request timeouts from
/// `BoxcarConfig` are applied on top of the defaults here.
///
/// # Example
/// ```ignore
/// use crate::external::client::HTTP_CLIENT;
///
/// let response = HTTP_CLIENT
///     .post("https://boxcar-api.io/api/push")
///     .body(payload)
///     .send()
///     .await?;
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_initialization() {
        let _ = &*HTTP_CLIENT;
    }

    #[test]
    fn test_user_agent_names_crate() {
        assert!(USER_AGENT.starts_with("boxcar-push/"));
    }
}
