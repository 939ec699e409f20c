// src/entry.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// A bibliography entry: an entry type plus a map of field values.
///
/// Field names are normalised through [`Field`], so lookups are
/// case-insensitive. The map is ordered to keep serialised output stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "type")]
    entry_type: String,
    #[serde(default)]
    fields: BTreeMap<Field, String>,
}

impl Entry {
    #[must_use]
    pub fn new(entry_type: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment, mainly for tests and fixtures.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<Field>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<Field>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, field: &Field) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn has(&self, field: &Field) -> bool {
        self.fields.contains_key(field)
    }

    pub fn remove(&mut self, field: &Field) -> Option<String> {
        self.fields.remove(field)
    }

    #[must_use]
    pub fn entry_type(&self) -> &str {
        &self.entry_type
    }

    #[must_use]
    pub fn citation_key(&self) -> Option<&str> {
        self.get(&Field::citation_key())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&Field, &str)> {
        self.fields.iter().map(|(f, v)| (f, v.as_str()))
    }

    /// All field values, used by free-text search.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.values().map(String::as_str)
    }
}
