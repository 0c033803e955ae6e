//! Error types for catalog search operations.

use reqwest::StatusCode;
use rust_decimal::Decimal;
use thiserror::Error;

/// Batch-level failure of a single search request.
///
/// Any of these resets the orchestrator to `NotSearchedYet` and reports
/// `false` to the caller. Blank queries and superseded requests are not
/// errors and never produce one.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request to catalog failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog responded with {0}")]
    Status(StatusCode),
    #[error("could not decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no Tokio runtime to run searches on: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Failure to build one [`CatalogItem`](crate::model::CatalogItem) from a
/// raw record. Recovered locally by dropping the record.
#[derive(Debug, Error)]
pub enum ItemParseError {
    #[error("record has no name")]
    MissingName,
    #[error("record has no price")]
    MissingPrice,
    #[error("record has a negative price: {0}")]
    NegativePrice(Decimal),
    #[error("record has an unparsable price: {0}")]
    InvalidPrice(String),
    #[error("record is malformed: {0}")]
    Malformed(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid search endpoint {value:?}: {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid result limit {0:?}, expected a number between 1 and 200")]
    InvalidLimit(String),
}
