use super::SecApi;
use super::chart::{ChartSeries, format_for_chart};
use super::error::{RelayError, Result};
use super::traits::XbrlOperations;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const INCOME_STATEMENT: &str = "StatementsOfIncome";
pub const BALANCE_SHEET: &str = "BalanceSheets";
pub const CASH_FLOW_STATEMENT: &str = "StatementsOfCashFlows";

/// Chart-ready view of a filing's financial statements, as returned by `POST /getUsefulStuff`.
///
/// The income and cash-flow statements are reshaped into chart series; the balance sheet is
/// passed through exactly as the converter reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    #[serde(rename = "statementofIncome")]
    pub statement_of_income: Vec<ChartSeries>,
    #[serde(rename = "balanceSheet")]
    pub balance_sheet: Value,
    #[serde(rename = "cashFlow")]
    pub cash_flow: Vec<ChartSeries>,
}

impl FinancialSummary {
    /// Assembles the summary from a full XBRL-to-JSON report.
    ///
    /// # Errors
    ///
    /// * `RelayError::MissingSection` - One of the three statements is absent
    /// * Any error of [`format_for_chart`]
    pub fn from_report(mut report: Value) -> Result<Self> {
        let statement_of_income = format_for_chart(section(&report, INCOME_STATEMENT)?)?;
        let cash_flow = format_for_chart(section(&report, CASH_FLOW_STATEMENT)?)?;
        let balance_sheet = report
            .get_mut(BALANCE_SHEET)
            .map(Value::take)
            .ok_or_else(|| RelayError::MissingSection(BALANCE_SHEET.to_string()))?;

        Ok(FinancialSummary {
            statement_of_income,
            balance_sheet,
            cash_flow,
        })
    }
}

fn section<'a>(report: &'a Value, name: &str) -> Result<&'a Value> {
    report
        .get(name)
        .ok_or_else(|| RelayError::MissingSection(name.to_string()))
}

#[derive(Debug, Serialize)]
struct XbrlQuery<'a> {
    #[serde(rename = "htm-url")]
    htm_url: &'a str,
    token: &'a str,
}

impl SecApi {
    /// Builds the XBRL-to-JSON request URL for a filing.
    pub fn xbrl_request_url(&self, filing_url: &str) -> Result<String> {
        let query = XbrlQuery {
            htm_url: filing_url,
            token: &self.api_token,
        };
        Self::build_url(&self.xbrl_to_json_url, &query)
    }
}

#[async_trait]
impl XbrlOperations for SecApi {
    /// Fetches the converter's JSON report for a filing.
    ///
    /// The upstream status is checked before the body is parsed, so an error page from the
    /// converter surfaces as `RelayError::UpstreamFetchFailed` rather than a JSON error.
    async fn xbrl_report(&self, filing_url: &str) -> Result<Value> {
        let url = self.xbrl_request_url(filing_url)?;
        tracing::debug!("Converting XBRL of {}", filing_url);

        let body = self.get(&url, HeaderMap::new()).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
