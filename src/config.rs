use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the relay and its upstream client
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Access token appended to every upstream request
    pub api_token: String,
    /// User agent sent to the extractor API
    pub user_agent: String,
    /// HTTP request timeout for upstream calls
    pub timeout: Duration,
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// Base URLs for the upstream services
    pub base_urls: RelayUrls,
}

/// Base URLs for the upstream SEC data services
#[derive(Debug, Clone)]
pub struct RelayUrls {
    /// Filing section extractor endpoint
    pub extractor: String,
    /// XBRL-to-JSON converter endpoint
    pub xbrl_to_json: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            user_agent: "filing_relay/0.1.0".to_string(),
            timeout: Duration::from_secs(30),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            base_urls: RelayUrls::default(),
        }
    }
}

impl RelayConfig {
    /// Creates a new RelayConfig with custom settings
    ///
    /// # Basic usage
    ///
    /// ```rust
    /// use filing_relay::RelayConfig;
    /// use std::time::Duration;
    ///
    /// let config = RelayConfig::new(
    ///     "my-token",
    ///     "YourAppName contact@example.com",
    ///     Duration::from_secs(30),
    ///     None,
    /// );
    /// assert_eq!(config.base_urls.extractor, "https://api.sec-api.io/extractor");
    /// ```
    pub fn new(
        api_token: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
        base_urls: Option<RelayUrls>,
    ) -> Self {
        Self {
            api_token: api_token.into(),
            user_agent: user_agent.into(),
            timeout,
            base_urls: base_urls.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }
}

impl Default for RelayUrls {
    fn default() -> Self {
        Self {
            extractor: "https://api.sec-api.io/extractor".to_string(),
            xbrl_to_json: "https://api.sec-api.io/xbrl-to-json".to_string(),
        }
    }
}
