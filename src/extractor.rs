use super::SecApi;
use super::error::Result;
use super::traits::ExtractorOperations;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 10-K item holding the financial statements and supplementary data.
pub const FINANCIAL_STATEMENTS_ITEM: &str = "8";

/// Number of characters of extracted text returned to the caller.
pub const EXCERPT_CHARS: usize = 700;

/// Text excerpt of a filing section, as returned by `POST /fetch_10k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilingExcerpt {
    /// The upstream URL the excerpt was fetched from
    pub filing_url: String,
    /// The first [`EXCERPT_CHARS`] characters of the section text
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ExtractorQuery<'a> {
    url: &'a str,
    item: &'a str,
    #[serde(rename = "type")]
    output_type: &'a str,
    token: &'a str,
}

impl SecApi {
    /// Builds the extractor request URL for the financial-statements item of a filing.
    pub fn extractor_request_url(&self, filing_url: &str) -> Result<String> {
        let query = ExtractorQuery {
            url: filing_url,
            item: FINANCIAL_STATEMENTS_ITEM,
            output_type: "text",
            token: &self.api_token,
        };
        Self::build_url(&self.extractor_url, &query)
    }
}

/// Returns at most `max_chars` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait]
impl ExtractorOperations for SecApi {
    /// Fetches item 8 of a filing as text and keeps the first [`EXCERPT_CHARS`] characters.
    ///
    /// The request is sent with the relay's identifying `User-Agent`. Truncation is purely
    /// positional and may cut a word or sentence in half.
    ///
    /// # Errors
    ///
    /// * `RelayError::UpstreamFetchFailed` - The extractor answered with a non-2xx status
    /// * `RelayError::RequestError` - Network failure or timeout
    async fn fetch_excerpt(&self, filing_url: &str) -> Result<FilingExcerpt> {
        let url = self.extractor_request_url(filing_url)?;
        tracing::debug!("Fetching item {} of {}", FINANCIAL_STATEMENTS_ITEM, filing_url);

        let text = self.get(&url, self.identity_headers.clone()).await?;
        let content = truncate_chars(&text, EXCERPT_CHARS).to_string();

        Ok(FilingExcerpt {
            filing_url: url,
            content,
        })
    }
}
