//! HTTP client construction shared by every request shape.
//!
//! The API client keeps no connection between calls; each operation builds
//! a fresh `reqwest::Client` from the immutable configuration and attaches
//! the common headers (bearer authorization, user agent, extras).

use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::RequestBuilder;

use crate::client::ClientConfig;

/// User agent attached to every request.
pub(crate) const CLIENT_USER_AGENT: &str = concat!("guardrail-rust/", env!("CARGO_PKG_VERSION"));

/// Build a configured HTTP client from the client configuration.
///
/// Applies the optional timeout and proxy; everything else stays at
/// reqwest defaults.
pub(crate) fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(proxy_url) = &config.proxy {
        if let Ok(proxy) = reqwest::Proxy::all(proxy_url) {
            builder = builder.proxy(proxy);
        }
    }

    builder.build()
}

/// Attach the headers common to every call: bearer authorization, the
/// client user agent, and any extra headers from the configuration.
pub(crate) fn add_common_headers(
    mut request: RequestBuilder,
    config: &ClientConfig,
) -> RequestBuilder {
    request = request
        .header(
            AUTHORIZATION,
            format!("Bearer {}", config.api_key.expose_secret()),
        )
        .header(USER_AGENT, CLIENT_USER_AGENT);

    if let Some(headers) = &config.extra_headers {
        for (key, value) in headers {
            request = request.header(key, value);
        }
    }

    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_build_http_client() {
        let config = ClientConfig::new("test").with_timeout(Duration::from_secs(30));
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_build_http_client_with_proxy() {
        let config =
            ClientConfig::new("test").with_proxy("http://proxy.example.com:8080".to_string());
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_user_agent_names_crate() {
        assert!(CLIENT_USER_AGENT.starts_with("guardrail-rust/"));
    }
}
