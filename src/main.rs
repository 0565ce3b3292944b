use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use filing_relay::{RelayConfig, RelayUrls, SecApi, server};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "filing-relay", version, about)]
struct Args {
    /// Access token for the SEC data APIs
    #[arg(long, env = "SEC_API_TOKEN", hide_env_values = true)]
    token: String,

    /// User agent sent to the extractor API (e.g. "MyApp you@example.com")
    #[arg(long, env = "SEC_API_USER_AGENT", default_value = "filing_relay/0.1.0")]
    user_agent: String,

    /// Address to listen on
    #[arg(long, env = "RELAY_BIND", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// Upstream request timeout in seconds
    #[arg(long, env = "RELAY_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Override for the extractor endpoint
    #[arg(long, env = "SEC_API_EXTRACTOR_URL")]
    extractor_url: Option<String>,

    /// Override for the XBRL-to-JSON endpoint
    #[arg(long, env = "SEC_API_XBRL_URL")]
    xbrl_url: Option<String>,
}

impl Args {
    fn into_config(self) -> RelayConfig {
        let defaults = RelayUrls::default();
        let base_urls = RelayUrls {
            extractor: self.extractor_url.unwrap_or(defaults.extractor),
            xbrl_to_json: self.xbrl_url.unwrap_or(defaults.xbrl_to_json),
        };

        RelayConfig::new(
            self.token,
            self.user_agent,
            Duration::from_secs(self.timeout_secs),
            Some(base_urls),
        )
        .with_bind_addr(self.bind)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("filing_relay=info,tower_http=info")),
        )
        .init();

    let config = Args::parse().into_config();
    let api = SecApi::with_config(&config).context("failed to create SEC API client")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Listening on {}", config.bind_addr);

    server::serve(listener, Arc::new(api))
        .await
        .context("server error")?;

    Ok(())
}
