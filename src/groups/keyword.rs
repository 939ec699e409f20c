// src/groups/keyword.rs
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::field::Field;

fn default_delimiter() -> char {
    ','
}

/// Matches entries whose given field contains a keyword.
///
/// In word mode the field value is split at the delimiter and the term
/// must equal one whole token. In regex mode the term is compiled as a
/// pattern and tested against the raw field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordSpec {
    pub field: Field,
    pub term: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default)]
    pub regex: bool,
}

impl KeywordSpec {
    /// Word-mode spec with the default `,` delimiter.
    pub fn words(field: Field, term: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            field,
            term: term.into(),
            delimiter: default_delimiter(),
            case_sensitive,
            regex: false,
        }
    }

    /// Regex-mode spec.
    pub fn pattern(field: Field, term: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            field,
            term: term.into(),
            delimiter: default_delimiter(),
            case_sensitive,
            regex: true,
        }
    }

    /// Whether the entry's field contains the keyword. Entries missing
    /// the field never match; an invalid pattern matches nothing.
    pub fn matches(&self, entry: &Entry) -> bool {
        let Some(value) = entry.get(&self.field) else {
            return false;
        };
        if self.regex {
            self.compile().is_some_and(|re| re.is_match(value))
        } else {
            value
                .split(self.delimiter)
                .map(str::trim)
                .any(|token| self.token_matches(token))
        }
    }

    fn token_matches(&self, token: &str) -> bool {
        if self.case_sensitive {
            token == self.term
        } else {
            token.to_lowercase() == self.term.to_lowercase()
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
