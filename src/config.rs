//! Configuration for the catalog search client.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://itunes.apple.com/search";
/// Largest result cap the remote endpoint honours.
pub const MAX_LIMIT: u32 = 200;

const ENDPOINT_VAR: &str = "STORE_SEARCH_ENDPOINT";
const LIMIT_VAR: &str = "STORE_SEARCH_LIMIT";

/// Settings used to build a [`CatalogClient`](crate::client::CatalogClient).
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Search endpoint, queried with `term`, `limit` and `entity` parameters.
    pub endpoint: Url,
    /// Maximum number of items requested per search.
    pub limit: u32,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            limit: MAX_LIMIT,
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
            user_agent: Some(format!("store-search/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl SearchConfig {
    /// Defaults, overridden by `STORE_SEARCH_ENDPOINT` and `STORE_SEARCH_LIMIT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Config pointing at a different endpoint, everything else default.
    pub fn with_endpoint(endpoint: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            ..Self::default()
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            config.endpoint = parse_endpoint(&endpoint)?;
        }

        if let Some(limit) = lookup(LIMIT_VAR) {
            config.limit = match limit.trim().parse::<u32>() {
                Ok(n) if (1..=MAX_LIMIT).contains(&n) => n,
                _ => return Err(ConfigError::InvalidLimit(limit)),
            };
        }

        tracing::debug!(endpoint = %config.endpoint, limit = config.limit, "Search config loaded");
        Ok(config)
    }
}

fn parse_endpoint(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidEndpoint {
        value: value.to_string(),
        source,
    })
}
