//! Trait definitions for the upstream operations the relay forwards.
//!
//! Each upstream API has its own trait, implemented by [`SecApi`](crate::SecApi). The HTTP
//! handlers only see the combined [`FilingSource`] trait object, so tests can swap in a fake
//! source without touching the network.

use super::error::Result;
use super::extractor::FilingExcerpt;
use super::xbrl::FinancialSummary;
use async_trait::async_trait;

/// Operations against the filing-content extraction API.
#[async_trait]
pub trait ExtractorOperations {
    /// Fetches the financial-statements section (item 8) of a filing as a text excerpt.
    async fn fetch_excerpt(&self, filing_url: &str) -> Result<FilingExcerpt>;
}

/// Operations against the XBRL-to-JSON conversion API.
#[async_trait]
pub trait XbrlOperations {
    /// Fetches the raw XBRL JSON report for a filing.
    async fn xbrl_report(&self, filing_url: &str) -> Result<serde_json::Value>;

    /// Fetches a filing's XBRL report and reshapes it for charting.
    async fn financial_summary(&self, filing_url: &str) -> Result<FinancialSummary> {
        let report = self.xbrl_report(filing_url).await?;
        FinancialSummary::from_report(report)
    }
}

/// Everything the HTTP layer needs from an upstream.
pub trait FilingSource: ExtractorOperations + XbrlOperations + Send + Sync {}

impl<T> FilingSource for T where T: ExtractorOperations + XbrlOperations + Send + Sync {}
