//! Model module - Search data types
//!
//! This module contains the data a search produces and the state a renderer reads.
//! It is organized into submodules by responsibility:
//!
//! - `category`: Content-type filter and its remote entity token
//! - `item`: One search hit and its presentation ordering
//! - `state`: Outcome of the current search

mod category;
mod item;
mod state;

// Re-export all public types for convenient access
pub use item::{CatalogItem, compare_by_name, sort_by_name};

pub use category::{Category, UnknownCategory};

pub use state::SearchState;
