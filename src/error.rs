use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Missing {0} parameter")]
    MissingParameter(&'static str),

    #[error("Failed to fetch filing")]
    UpstreamFetchFailed { status: reqwest::StatusCode },

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL encoding error: {0}")]
    UrlEncodeError(#[from] serde_urlencoded::ser::Error),

    #[error("Missing section in XBRL report: {0}")]
    MissingSection(String),

    #[error("Malformed statement: {0}")]
    MalformedStatement(String),

    #[error("Could not convert value {value:?} of {concept} to a number")]
    NumericParse { concept: String, value: String },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, RelayError>;
