//! Outcome of the current search, as seen by a renderer

use super::item::CatalogItem;

/// State of the one logical search owned by a
/// [`SearchOrchestrator`](crate::SearchOrchestrator).
///
/// `NotSearchedYet` is both the initial state and the state a failed
/// search recovers to. `Results` never holds an empty list.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SearchState {
    #[default]
    NotSearchedYet,
    Loading,
    NoResults,
    Results(Vec<CatalogItem>),
}

impl SearchState {
    /// State after a fetch succeeded with an already sorted item list
    pub(crate) fn from_items(items: Vec<CatalogItem>) -> Self {
        if items.is_empty() {
            SearchState::NoResults
        } else {
            SearchState::Results(items)
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    /// Any state other than `Loading`
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    /// Items to display, empty for every state but `Results`
    pub fn items(&self) -> &[CatalogItem] {
        match self {
            SearchState::Results(items) => items,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_item_list_is_no_results() {
        assert_eq!(SearchState::from_items(Vec::new()), SearchState::NoResults);
        assert!(SearchState::NoResults.items().is_empty());
    }

    #[test]
    fn only_loading_is_non_terminal() {
        assert!(SearchState::Loading.is_loading());
        assert!(!SearchState::Loading.is_terminal());
        assert!(SearchState::NotSearchedYet.is_terminal());
        assert!(SearchState::NoResults.is_terminal());
    }
}
