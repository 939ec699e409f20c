// src/groups/automatic.rs
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::field::Field;

use super::keyword::KeywordSpec;
use super::{Group, GroupKind, Hierarchy};

fn default_delimiter() -> char {
    ','
}

/// What an automatic group derives its subgroups from.
///
/// The automatic group itself matches no entries; it generates one
/// subgroup per distinct keyword token or person surname found in the
/// given entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum AutomaticSource {
    Keywords {
        field: Field,
        #[serde(default = "default_delimiter")]
        delimiter: char,
    },
    Persons {
        field: Field,
    },
}

impl AutomaticSource {
    pub fn field(&self) -> &Field {
        match self {
            Self::Keywords { field, .. } | Self::Persons { field } => field,
        }
    }

    /// Generate one subgroup per distinct value harvested from the
    /// entries, sorted by name.
    pub fn subgroups(&self, entries: &[Entry]) -> Vec<Group> {
        match self {
            Self::Keywords { field, delimiter } => {
                let tokens = harvest_tokens(entries, field, *delimiter);
                tokens
                    .into_iter()
                    .map(|token| {
                        let spec = KeywordSpec {
                            field: field.clone(),
                            term: token.clone(),
                            delimiter: *delimiter,
                            case_sensitive: false,
                            regex: false,
                        };
                        Group::new(token, Hierarchy::Including, GroupKind::Keyword(spec))
                    })
                    .collect()
            }
            Self::Persons { field } => {
                let surnames = harvest_surnames(entries, field);
                surnames
                    .into_iter()
                    .map(|surname| {
                        let pattern = format!(r"\b{}\b", regex::escape(&surname));
                        let spec = KeywordSpec::pattern(field.clone(), pattern, false);
                        Group::new(surname, Hierarchy::Including, GroupKind::Keyword(spec))
                    })
                    .collect()
            }
        }
    }
}

fn harvest_tokens(entries: &[Entry], field: &Field, delimiter: char) -> BTreeSet<String> {
    entries
        .iter()
        .filter_map(|entry| entry.get(field))
        .flat_map(|value| value.split(delimiter))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn harvest_surnames(entries: &[Entry], field: &Field) -> BTreeSet<String> {
    entries
        .iter()
        .filter_map(|entry| entry.get(field))
        .flat_map(|value| value.split(" and "))
        .filter_map(surname)
        .map(ToString::to_string)
        .collect()
}

/// Extract a surname from a single name: the part before the comma in
/// `Last, First`, otherwise the last whitespace-separated word.
fn surname(name: &str) -> Option<&str> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    match name.split_once(',') {
        Some((last, _)) => {
            let last = last.trim();
            (!last.is_empty()).then_some(last)
        }
        None => name.split_whitespace().next_back(),
    }
}
