// src/history.rs
use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, HistoryResult};

/// Bounded, de-duplicating history of search queries.
///
/// Queries are kept most recent first. Recording a query already
/// present promotes it to the front; once the capacity is reached the
/// oldest query is dropped from the tail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    items: VecDeque<String>,
}

impl SearchHistory {
    pub const CAPACITY: usize = 10;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a query as the most recent search. Blank queries are
    /// ignored; a duplicate is moved to the front instead of added
    /// twice.
    pub fn record_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query.trim().is_empty() {
            return;
        }
        self.items.retain(|item| *item != query);
        while self.items.len() >= Self::CAPACITY {
            self.items.pop_back();
        }
        self.items.push_front(query);
    }

    #[must_use]
    pub fn contains(&self, query: &str) -> bool {
        self.items.iter().any(|item| item == query)
    }

    /// Remove a query from the history. Returns whether it was present.
    pub fn remove_search(&mut self, query: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item != query);
        self.items.len() < before
    }

    /// The query at `index`, `0` being the most recent.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the index is past the end of the history.
    pub fn search_at(&self, index: usize) -> HistoryResult<&str> {
        self.items
            .get(index)
            .map(String::as_str)
            .ok_or(HistoryError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
    }

    #[must_use]
    pub fn most_recent(&self) -> Option<&str> {
        self.items.front().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Queries from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Numbered menu entries, `[1]` being the most recent query.
    #[must_use]
    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        self.iter()
            .enumerate()
            .map(|(i, query)| MenuEntry {
                position: i + 1,
                query: query.to_string(),
            })
            .collect()
    }

    /// Re-run the query at `index`: promotes it to the front and
    /// returns it, as selecting a menu entry would.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the index is past the end of the history.
    pub fn reuse(&mut self, index: usize) -> HistoryResult<String> {
        let query = self.search_at(index)?.to_string();
        self.record_search(query.clone());
        Ok(query)
    }
}

/// One line of the recent-searches menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub position: usize,
    pub query: String,
}

impl fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.position, self.query)
    }
}
