use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use filing_relay::{
    ExtractorOperations, FilingExcerpt, RelayError, Result, XbrlOperations, truncate_chars,
    EXCERPT_CHARS,
};
use serde_json::Value;

pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn read_fixture(relative: impl AsRef<Path>) -> String {
    fs::read_to_string(fixture_path(relative)).expect("fixture file should be readable")
}

#[allow(dead_code)]
pub fn xbrl_report() -> Value {
    serde_json::from_str(&read_fixture("xbrl/report.json")).unwrap()
}

/// What a [`FakeSource`] answers with.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Canned {
    Ok(String),
    UpstreamStatus(u16),
}

/// In-memory stand-in for the SEC APIs.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct FakeSource {
    pub extractor: Canned,
    pub xbrl: Canned,
}

#[allow(dead_code)]
impl FakeSource {
    pub fn new(extractor_body: impl Into<String>, xbrl_body: impl Into<String>) -> Self {
        Self {
            extractor: Canned::Ok(extractor_body.into()),
            xbrl: Canned::Ok(xbrl_body.into()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            extractor: Canned::UpstreamStatus(status),
            xbrl: Canned::UpstreamStatus(status),
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

fn answer(canned: &Canned) -> Result<String> {
    match canned {
        Canned::Ok(body) => Ok(body.clone()),
        Canned::UpstreamStatus(code) => Err(RelayError::UpstreamFetchFailed {
            status: reqwest::StatusCode::from_u16(*code).unwrap(),
        }),
    }
}

#[async_trait]
impl ExtractorOperations for FakeSource {
    async fn fetch_excerpt(&self, filing_url: &str) -> Result<FilingExcerpt> {
        let text = answer(&self.extractor)?;
        Ok(FilingExcerpt {
            filing_url: format!("fake://extractor?url={filing_url}"),
            content: truncate_chars(&text, EXCERPT_CHARS).to_string(),
        })
    }
}

#[async_trait]
impl XbrlOperations for FakeSource {
    async fn xbrl_report(&self, _filing_url: &str) -> Result<Value> {
        let body = answer(&self.xbrl)?;
        Ok(serde_json::from_str(&body)?)
    }
}
