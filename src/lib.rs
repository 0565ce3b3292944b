//! # filing-relay - a backend relay for SEC filing data
//!
//! filing-relay lets a frontend request 10-K data without talking to third-party SEC data
//! APIs itself. It keeps the API credential on the server and exposes two JSON endpoints:
//!
//! - **`POST /fetch_10k`** - a 700-character text excerpt of a filing's financial statements
//!   section, fetched from the extractor API
//! - **`POST /getUsefulStuff`** - the filing's income statement and cash flow statement
//!   reshaped into chart series, plus the raw balance sheet, fetched from the XBRL-to-JSON API
//!
//! ## Basic Usage
//!
//! ```ignore
//! use filing_relay::{RelayConfig, SecApi, server};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RelayConfig::new(
//!         std::env::var("SEC_API_TOKEN")?,
//!         "YourAppName contact@example.com",
//!         Duration::from_secs(30),
//!         None,
//!     );
//!     let api = SecApi::with_config(&config)?;
//!
//!     let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//!     server::serve(listener, Arc::new(api)).await?;
//!     Ok(())
//! }
//! ```
//!
//! The chart formatting is usable on its own:
//!
//! ```rust
//! use filing_relay::format_for_chart;
//! use serde_json::json;
//!
//! let statement = json!({
//!     "Revenues": [{ "period": { "instant": "2023-12-31" }, "value": "100.5" }]
//! });
//! let series = format_for_chart(&statement)?;
//! assert_eq!(series[0].values[0].value, 100.5);
//! # Ok::<(), filing_relay::RelayError>(())
//! ```

mod chart;
mod config;
mod core;
mod error;
mod extractor;
mod traits;
mod xbrl;

pub mod server;

pub use chart::{CHART_PERIODS, ChartPoint, ChartSeries, Observation, ObservedValue, format_for_chart};
pub use config::{RelayConfig, RelayUrls};
pub use self::core::SecApi;
pub use error::{RelayError, Result};
pub use extractor::{EXCERPT_CHARS, FINANCIAL_STATEMENTS_ITEM, FilingExcerpt, truncate_chars};
pub use traits::{ExtractorOperations, FilingSource, XbrlOperations};
pub use xbrl::{BALANCE_SHEET, CASH_FLOW_STATEMENT, FinancialSummary, INCOME_STATEMENT};

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
