use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use super::config::{RelayConfig, RelayUrls};
use super::error::{RelayError, Result};

/// Number of body characters kept when logging a failed upstream response.
const ERROR_PREVIEW_CHARS: usize = 200;

/// HTTP client for the SEC data APIs the relay forwards to.
///
/// `SecApi` owns a single `reqwest::Client` and the access token, both injected from a
/// [`RelayConfig`] at startup. It holds no mutable state, so one instance is shared by every
/// request handler behind an `Arc`.
///
/// Two upstreams are reached through it:
///
/// - the **extractor** API, which returns the plain text of one item of a filing and expects
///   an identifying `User-Agent` header;
/// - the **XBRL-to-JSON** API, which converts a filing's inline XBRL into nested JSON and is
///   called without custom headers.
///
/// Requests are bounded by the configured timeout. Failures are never retried: the first
/// error aborts the request and is reported to the caller.
///
/// # Examples
///
/// ```rust
/// # use filing_relay::{RelayConfig, SecApi};
/// # use std::time::Duration;
/// let config = RelayConfig::new(
///     "my-token",
///     "my_app contact@example.com",
///     Duration::from_secs(30),
///     None,
/// );
/// let api = SecApi::with_config(&config)?;
/// assert_eq!(api.extractor_url(), "https://api.sec-api.io/extractor");
/// # Ok::<(), filing_relay::RelayError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SecApi {
    /// HTTP client for making requests
    pub(crate) client: reqwest::Client,

    /// Token appended as the `token` query parameter
    pub(crate) api_token: String,

    /// Headers identifying the relay to the extractor API
    pub(crate) identity_headers: HeaderMap,

    /// Base URL for the extractor API
    pub(crate) extractor_url: String,

    /// Base URL for the XBRL-to-JSON API
    pub(crate) xbrl_to_json_url: String,
}

impl SecApi {
    /// Creates a client from the relay configuration.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::ConfigError` if the access token is empty, the user agent is not a
    /// valid header value, or the HTTP client cannot be built.
    pub fn with_config(config: &RelayConfig) -> Result<Self> {
        if config.api_token.trim().is_empty() {
            return Err(RelayError::ConfigError(
                "API token must not be empty".to_string(),
            ));
        }

        let mut identity_headers = HeaderMap::new();
        identity_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| RelayError::ConfigError(format!("Invalid user agent: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RelayError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        let RelayUrls {
            extractor,
            xbrl_to_json,
        } = config.base_urls.clone();

        Ok(SecApi {
            client,
            api_token: config.api_token.clone(),
            identity_headers,
            extractor_url: extractor,
            xbrl_to_json_url: xbrl_to_json,
        })
    }

    /// Fetches a URL and returns its body as text.
    ///
    /// Any non-success status is turned into `RelayError::UpstreamFetchFailed`. The upstream
    /// body is not returned to the caller; a short preview is logged instead.
    ///
    /// # Errors
    ///
    /// * `RelayError::UpstreamFetchFailed` - The upstream answered with a non-2xx status
    /// * `RelayError::RequestError` - Network failure, timeout or unreadable body
    pub(crate) async fn get(&self, url: &str, headers: HeaderMap) -> Result<String> {
        let response = self.client.get(url).headers(headers).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            tracing::warn!(
                "Upstream answered {} for {}. Response preview: {}",
                status,
                redact_token(url),
                error_body.chars().take(ERROR_PREVIEW_CHARS).collect::<String>()
            );
            return Err(RelayError::UpstreamFetchFailed { status });
        }

        Ok(response.text().await?)
    }

    /// Builds `<base>?<query>` with form-urlencoded query values.
    pub(crate) fn build_url<Q: serde::Serialize>(base: &str, query: &Q) -> Result<String> {
        let query_string = serde_urlencoded::to_string(query)?;
        Ok(format!("{}?{}", base, query_string))
    }

    /// Returns the base URL for the extractor API.
    pub fn extractor_url(&self) -> &str {
        &self.extractor_url
    }

    /// Returns the base URL for the XBRL-to-JSON API.
    pub fn xbrl_to_json_url(&self) -> &str {
        &self.xbrl_to_json_url
    }
}

/// Strips the value of the `token` query parameter so URLs can be logged.
fn redact_token(url: &str) -> String {
    match url.find("token=") {
        Some(idx) => {
            let start = idx + "token=".len();
            let end = url[start..]
                .find('&')
                .map(|offset| start + offset)
                .unwrap_or(url.len());
            format!("{}***{}", &url[..start], &url[end..])
        }
        None => url.to_string(),
    }
}
