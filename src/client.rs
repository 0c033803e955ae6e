//! HTTP client for the remote catalog search endpoint.

use std::fmt::Debug;

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::model::{sort_by_name, CatalogItem, Category};

/// Response envelope. Records stay undecoded so a single malformed one
/// can be dropped without failing the batch.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    results: Vec<serde_json::Value>,
}

/// A client for the catalog search endpoint.
///
/// Issues one `GET` per search and turns the response into a sorted list
/// of [`CatalogItem`]s. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("endpoint", &self.config.endpoint.as_str())
            .field("limit", &self.config.limit)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let http = build_http_client(&config)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// `<endpoint>?term=<query>&limit=<limit>[&entity=<token>]`
    pub fn search_url(&self, query: &str, category: Category) -> Url {
        let mut url = self.config.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("term", query)
                .append_pair("limit", &self.config.limit.to_string());
            if let Some(entity) = category.entity() {
                pairs.append_pair("entity", entity);
            }
        }
        url
    }

    /// Fetch, decode and sort the items matching `query`.
    ///
    /// Records that fail to parse are dropped. Transport errors, non-success
    /// statuses and bodies that are not a result envelope fail the whole
    /// search.
    pub async fn search(
        &self,
        query: &str,
        category: Category,
    ) -> Result<Vec<CatalogItem>, SearchError> {
        let url = self.search_url(query, category);
        crate::log_api_request!("search", query, %category, url = %url);

        let result = self.fetch(url).await;
        crate::log_api_result!("search", result);
        result
    }

    async fn fetch(&self, url: Url) -> Result<Vec<CatalogItem>, SearchError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response.bytes().await?;
        decode_results(&body)
    }
}

/// Decode a response body into items sorted by name.
pub(crate) fn decode_results(body: &[u8]) -> Result<Vec<CatalogItem>, SearchError> {
    let envelope: SearchEnvelope = serde_json::from_slice(body)?;
    let received = envelope.results.len();

    let mut items: Vec<CatalogItem> = envelope
        .results
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match CatalogItem::parse(record) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping malformed catalog item");
                None
            }
        })
        .collect();

    sort_by_name(&mut items);

    tracing::info!(received, kept = items.len(), "Catalog response decoded");
    Ok(items)
}

fn build_http_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    debug!(
        endpoint = %config.endpoint,
        limit = config.limit,
        "building catalog HTTP client"
    );

    let builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(config.connect_timeout)
        .timeout(config.timeout);

    let builder = match config.user_agent {
        Some(ref user_agent) => builder.user_agent(user_agent),
        None => builder,
    };

    Ok(builder.build()?)
}
