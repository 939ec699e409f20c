// src/groups/mod.rs
mod automatic;
mod keyword;
mod range;
mod search;
mod tex;

pub use automatic::AutomaticSource;
pub use keyword::KeywordSpec;
pub use range::{RangeBounds, RangeSpec};
pub use search::SearchSpec;
pub use tex::TexSpec;

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// How a group relates to its parent when collecting entries in a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hierarchy {
    #[default]
    Independent,
    Refining,
    Including,
}

/// The closed set of group behaviours.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GroupKind {
    /// Membership by an explicit list of citation keys.
    Explicit { members: BTreeSet<String> },
    /// Membership by a keyword in a specific field.
    Keyword(KeywordSpec),
    /// Membership by a free-text search over all fields.
    Search(SearchSpec),
    /// Generates subgroups from entry data; matches nothing itself.
    Automatic(AutomaticSource),
    /// Membership by a field value inside an inclusive range.
    Range(RangeSpec),
    /// Membership by citation keys scanned from a LaTeX aux file.
    Tex(TexSpec),
}

impl GroupKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Explicit { .. } => "explicit",
            Self::Keyword(_) => "keyword",
            Self::Search(_) => "search",
            Self::Automatic(_) => "automatic",
            Self::Range(_) => "range",
            Self::Tex(_) => "tex",
        }
    }
}

/// A named group of bibliography entries.
///
/// Identity (equality and hashing) covers name, hierarchy and kind;
/// presentation metadata is carried along but never compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    name: String,
    #[serde(default)]
    hierarchy: Hierarchy,
    #[serde(flatten)]
    kind: GroupKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
}

impl Group {
    #[must_use]
    pub fn new(name: impl Into<String>, hierarchy: Hierarchy, kind: GroupKind) -> Self {
        Self {
            name: name.into(),
            hierarchy,
            kind,
            description: None,
            color: None,
            icon: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hierarchy(&self) -> Hierarchy {
        self.hierarchy
    }

    pub fn kind(&self) -> &GroupKind {
        &self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Whether the entry belongs to this group.
    ///
    /// Never fails: missing fields, unparsable values and invalid
    /// patterns all simply fail to match.
    pub fn matches(&self, entry: &Entry) -> bool {
        match &self.kind {
            GroupKind::Explicit { members } => entry
                .citation_key()
                .is_some_and(|key| members.contains(key)),
            GroupKind::Keyword(spec) => spec.matches(entry),
            GroupKind::Search(spec) => spec.matches(entry),
            GroupKind::Automatic(_) => false,
            GroupKind::Range(spec) => spec.matches(entry),
            GroupKind::Tex(spec) => spec.matches(entry),
        }
    }

    /// Whether membership is computed from entry data rather than
    /// stored assignments.
    pub fn is_dynamic(&self) -> bool {
        match &self.kind {
            GroupKind::Explicit { .. } | GroupKind::Tex(_) => false,
            GroupKind::Keyword(_)
            | GroupKind::Search(_)
            | GroupKind::Automatic(_)
            | GroupKind::Range(_) => true,
        }
    }

    /// All entries belonging to this group, in input order.
    pub fn find_matches<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        entries.iter().filter(|entry| self.matches(entry)).collect()
    }

    /// Subgroups generated from the entries. Empty for every kind
    /// except automatic groups.
    pub fn subgroups(&self, entries: &[Entry]) -> Vec<Group> {
        match &self.kind {
            GroupKind::Automatic(source) => source.subgroups(entries),
            _ => Vec::new(),
        }
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.hierarchy == other.hierarchy && self.kind == other.kind
    }
}

impl Eq for Group {}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.hierarchy.hash(state);
        self.kind.hash(state);
    }
}
