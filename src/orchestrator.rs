//! The one logical "current search" and its outcome.
//!
//! [`SearchOrchestrator`] owns the [`SearchState`] and the handle of at most
//! one in-flight fetch. Starting a search aborts whatever was in flight and
//! drops its completion callback, so a superseded request can never touch
//! state or reach the caller.
//!
//! The fetch runs on a spawned Tokio task, but that task only produces a
//! result. Applying it (state transition plus `on_complete`) happens on the
//! owner's side through [`SearchOrchestrator::wait_for_completion`] or
//! [`SearchOrchestrator::poll_completion`], so a renderer never observes a
//! half-applied transition.

use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::task::{JoinError, JoinHandle};

use crate::client::CatalogClient;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::model::{CatalogItem, Category, SearchState};

/// Callback told whether a search finished successfully.
pub type OnComplete = Box<dyn FnOnce(bool) + Send + 'static>;

type FetchResult = Result<Vec<CatalogItem>, SearchError>;

struct InFlight {
    generation: u64,
    task: JoinHandle<FetchResult>,
    on_complete: OnComplete,
}

pub struct SearchOrchestrator {
    client: CatalogClient,
    runtime: Handle,
    state: SearchState,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl SearchOrchestrator {
    /// Orchestrator whose fetches run on the Tokio runtime this is called from.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let runtime = Handle::try_current()?;
        Ok(Self::with_client(CatalogClient::new(config)?, runtime))
    }

    /// Orchestrator whose fetches run on `runtime`. The caller itself does
    /// not need to be inside a runtime.
    pub fn with_client(client: CatalogClient, runtime: Handle) -> Self {
        Self {
            client,
            runtime,
            state: SearchState::NotSearchedYet,
            generation: 0,
            in_flight: None,
        }
    }

    /// Current outcome. Safe to read at any time, including while loading.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a search for `query` in `category`, superseding any search still
    /// in flight.
    ///
    /// A blank query is ignored: state is left as is and `on_complete` is
    /// dropped without being called. Otherwise the state is `Loading` by the
    /// time this returns, and `on_complete` runs once the result is applied
    /// by [`wait_for_completion`](Self::wait_for_completion) or
    /// [`poll_completion`](Self::poll_completion).
    pub fn perform_search(
        &mut self,
        query: &str,
        category: Category,
        on_complete: impl FnOnce(bool) + Send + 'static,
    ) {
        if query.trim().is_empty() {
            tracing::debug!("Ignoring blank search query");
            return;
        }

        self.cancel_in_flight();

        self.generation += 1;
        let generation = self.generation;
        self.state = SearchState::Loading;

        tracing::debug!(generation, query, %category, "Starting search");

        let client = self.client.clone();
        let query = query.to_string();
        let task = self.runtime.spawn(async move { client.search(&query, category).await });

        self.in_flight = Some(InFlight {
            generation,
            task,
            on_complete: Box::new(on_complete),
        });
    }

    /// Wait for the current search to finish and apply its outcome.
    ///
    /// Returns the success flag that was passed to `on_complete`, or `None`
    /// if no search is in flight. Cancel-safe: dropping the returned future
    /// leaves the search in flight.
    pub async fn wait_for_completion(&mut self) -> Option<bool> {
        let joined = match self.in_flight.as_mut() {
            Some(in_flight) => (&mut in_flight.task).await,
            None => return None,
        };
        let in_flight = self.in_flight.take()?;
        Some(self.complete(in_flight, joined))
    }

    /// Apply the current search's outcome if it has already finished.
    ///
    /// Never blocks; meant for hosts that redraw on a timer.
    pub fn poll_completion(&mut self) -> Option<bool> {
        let joined = self
            .in_flight
            .as_mut()
            .and_then(|in_flight| (&mut in_flight.task).now_or_never())?;
        let in_flight = self.in_flight.take()?;
        Some(self.complete(in_flight, joined))
    }

    fn complete(&mut self, in_flight: InFlight, joined: Result<FetchResult, JoinError>) -> bool {
        let InFlight {
            generation,
            on_complete,
            ..
        } = in_flight;

        let success = match joined {
            Ok(Ok(items)) => {
                tracing::info!(generation, count = items.len(), "Search completed successfully");
                self.state = SearchState::from_items(items);
                true
            }
            Ok(Err(e)) => {
                tracing::warn!(generation, error = %e, "Search failed");
                self.state = SearchState::NotSearchedYet;
                false
            }
            Err(e) => {
                tracing::error!(generation, error = %e, "Search task did not finish");
                self.state = SearchState::NotSearchedYet;
                false
            }
        };

        on_complete(success);
        success
    }

    /// Abort the in-flight fetch, if any, and drop its callback unused.
    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            tracing::debug!(generation = in_flight.generation, "Superseding in-flight search");
            in_flight.task.abort();
        }
    }
}

impl Drop for SearchOrchestrator {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
