// src/field.rs
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fields whose values are plain numbers (e.g. `year = {2021}`).
const NUMERIC_FIELDS: &[&str] = &["year", "volume", "number", "edition", "chapter"];

/// Fields whose values are ISO-8601 dates (e.g. `date = {2021-06-01}`).
const DATE_FIELDS: &[&str] = &["date", "urldate", "eventdate", "origdate"];

/// Normalised (trimmed, lowercased) bibliography field name.
///
/// Deserialisation goes through [`Field::new`], so stored field names
/// normalise the same way as ones typed at runtime.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(from = "String", into = "String")]
pub struct Field(String);

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// The field holding an entry's citation key.
    #[must_use]
    pub fn citation_key() -> Self {
        Self("citationkey".to_string())
    }

    /// Value classification used to pick the bound representation for
    /// range filtering.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        if NUMERIC_FIELDS.contains(&self.0.as_str()) {
            FieldKind::Numeric
        } else if DATE_FIELDS.contains(&self.0.as_str()) {
            FieldKind::Date
        } else {
            FieldKind::Text
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.kind() == FieldKind::Numeric
    }

    #[must_use]
    pub fn is_date(&self) -> bool {
        self.kind() == FieldKind::Date
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.0
    }
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Broad value classification of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Numeric,
    Date,
    Text,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Numeric => "numeric",
            Self::Date => "date",
            Self::Text => "text",
        };
        write!(f, "{label}")
    }
}
