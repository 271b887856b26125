use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;

const USER_AGENT: &str = concat!("newstrade/", env!("CARGO_PKG_VERSION"));

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a new HTTP client with retry middleware and the default timeout.
    pub fn create_client() -> ClientWithMiddleware {
        Self::create_client_with_timeout(Duration::from_secs(30))
    }

    /// Creates a new HTTP client with retry middleware
    pub fn create_client_with_timeout(timeout: Duration) -> ClientWithMiddleware {
        // Retry policy:
        // - Exponential backoff
        // - Max 3 retries on transient failures (5xx, 429, connect errors)
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(2)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }
}

/// Helper function to build a URL with query parameters.
/// reqwest-middleware's request builder does not expose `.query()`, so the
/// query string is assembled here and appended to the URL.
pub fn build_url_with_query<K, V>(base_url: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if params.is_empty() {
        return base_url.to_string();
    }

    let query_string: String = params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding_encode(k.as_ref()),
                urlencoding_encode(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    if base_url.contains('?') {
        format!("{}&{}", base_url, query_string)
    } else {
        format!("{}?{}", base_url, query_string)
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn urlencoding_encode(s: &str) -> String {
    let mut encoded = String::new();
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_spaces() {
        let url = build_url_with_query(
            "https://newsapi.org/v2/everything",
            &[("q", "Apple stock"), ("language", "en")],
        );
        assert_eq!(
            url,
            "https://newsapi.org/v2/everything?q=Apple%20stock&language=en"
        );
    }

    #[test]
    fn test_build_url_appends_to_existing_query() {
        let url = build_url_with_query("https://x.test/a?b=1", &[("c", "2")]);
        assert_eq!(url, "https://x.test/a?b=1&c=2");
    }

    #[test]
    fn test_build_url_without_params() {
        let empty: [(&str, &str); 0] = [];
        assert_eq!(build_url_with_query("https://x.test", &empty), "https://x.test");
    }

    #[test]
    fn test_multibyte_encoding() {
        assert_eq!(urlencoding_encode("é"), "%C3%A9");
    }
}
