//! Client-side catalog search.
//!
//! A [`SearchOrchestrator`] tracks exactly one current search against a remote
//! catalog endpoint. Each new search supersedes the one in flight, the
//! returned items are parsed and ordered by name, and the outcome is exposed
//! as a [`SearchState`] for any presentation layer to render.
//!
//! - `model`: Catalog items, categories and the search state
//! - `client`: HTTP client for the search endpoint
//! - `orchestrator`: The current-search state machine
//! - `config`: Endpoint and request settings
//! - `error`: Error types
//! - `logging`: File-based tracing setup for hosts

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod orchestrator;

pub use client::CatalogClient;
pub use config::SearchConfig;
pub use error::{ConfigError, ItemParseError, SearchError};
pub use model::{CatalogItem, Category, SearchState};
pub use orchestrator::{OnComplete, SearchOrchestrator};
