//! HTTP surface of the relay.
//!
//! | Method & path          | Body                 | Success                                             |
//! |------------------------|----------------------|-----------------------------------------------------|
//! | `POST /fetch_10k`      | `{ "filing_url" }`   | `{ "filing_url", "content" }`                       |
//! | `POST /getUsefulStuff` | `{ "filing_url" }`   | `{ "statementofIncome", "balanceSheet", "cashFlow" }` |
//! | `GET /health`          |                      | `OK`                                                |
//!
//! Every failure is answered with `{ "error": <message> }`: 400 for a missing `filing_url`,
//! 500 for everything else. CORS is open to all origins.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::error::{RelayError, Result};
use super::extractor::FilingExcerpt;
use super::traits::FilingSource;
use super::xbrl::FinancialSummary;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn FilingSource>,
}

/// Body accepted by both filing endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilingRequest {
    #[serde(default)]
    pub filing_url: Option<String>,
}

impl FilingRequest {
    fn filing_url(&self) -> Result<&str> {
        match self.filing_url.as_deref() {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(RelayError::MissingParameter("filing_url")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the application router around an upstream source.
pub fn router(source: Arc<dyn FilingSource>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/fetch_10k", post(fetch_10k))
        .route("/getUsefulStuff", post(get_useful_stuff))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(AppState { source })
}

/// Serves the router on an already bound listener until Ctrl-C is received.
pub async fn serve(listener: TcpListener, source: Arc<dyn FilingSource>) -> std::io::Result<()> {
    axum::serve(listener, router(source))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

fn parse_body(payload: std::result::Result<Json<FilingRequest>, JsonRejection>) -> Result<FilingRequest> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| RelayError::InvalidBody(rejection.body_text()))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn fetch_10k(
    State(state): State<AppState>,
    payload: std::result::Result<Json<FilingRequest>, JsonRejection>,
) -> Result<Json<FilingExcerpt>> {
    let request = parse_body(payload)?;
    let filing_url = request.filing_url()?;

    let excerpt = state.source.fetch_excerpt(filing_url).await?;
    Ok(Json(excerpt))
}

async fn get_useful_stuff(
    State(state): State<AppState>,
    payload: std::result::Result<Json<FilingRequest>, JsonRejection>,
) -> Result<Json<FinancialSummary>> {
    let request = parse_body(payload)?;
    let filing_url = request.filing_url()?;

    let summary = state.source.financial_summary(filing_url).await?;
    tracing::info!(
        "Formatted {} income and {} cash flow series for {}",
        summary.statement_of_income.len(),
        summary.cash_flow.len(),
        filing_url
    );
    Ok(Json(summary))
}
