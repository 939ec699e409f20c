// src/groups/search.rs
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Matches entries by a free-text expression over all field values.
///
/// In plain mode every whitespace-separated word of the expression must
/// occur in some field value. In regex mode the expression is compiled
/// as a pattern and tested against each field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchSpec {
    pub term: String,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default)]
    pub regex: bool,
}

impl SearchSpec {
    pub fn plain(term: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            term: term.into(),
            case_sensitive,
            regex: false,
        }
    }

    pub fn pattern(term: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            term: term.into(),
            case_sensitive,
            regex: true,
        }
    }

    /// Whether the entry matches the expression. An empty plain
    /// expression matches every entry; an invalid pattern matches
    /// nothing.
    pub fn matches(&self, entry: &Entry) -> bool {
        if self.regex {
            return self
                .compile()
                .is_some_and(|re| entry.values().any(|v| re.is_match(v)));
        }
        self.term
            .split_whitespace()
            .all(|word| self.some_value_contains(entry, word))
    }

    fn some_value_contains(&self, entry: &Entry, word: &str) -> bool {
        if self.case_sensitive {
            entry.values().any(|v| v.contains(word))
        } else {
            let word = word.to_lowercase();
            entry.values().any(|v| v.to_lowercase().contains(&word))
        }
    }

    fn compile(&self) -> Option<Regex> {
        let pattern = if self.case_sensitive {
            self.term.clone()
        } else {
            format!("(?i){}", self.term)
        };
        Regex::new(&pattern).ok()
    }
}
