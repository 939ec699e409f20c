// src/draft.rs
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use regex::Regex;

use crate::error::{DraftError, DraftResult};
use crate::field::Field;
use crate::groups::{
    AutomaticSource, Group, GroupKind, Hierarchy, KeywordSpec, RangeSpec, SearchSpec, TexSpec,
};

/// Severity of a single validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One validation finding for a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{label}: {}", self.message)
    }
}

/// Editable state for creating or editing a group.
///
/// A draft collects raw user input (names, terms, bound strings) and
/// turns it into a [`Group`] once it validates. `validate` reports
/// every finding at once; `build` stops at the first hard error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDraft {
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    pub hierarchy: Hierarchy,
    pub kind: DraftKind,
}

/// Raw per-kind input of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftKind {
    Explicit {
        members: BTreeSet<String>,
    },
    Keyword {
        field: String,
        term: String,
        delimiter: char,
        case_sensitive: bool,
        regex: bool,
    },
    Search {
        term: String,
        case_sensitive: bool,
        regex: bool,
    },
    AutoKeywords {
        field: String,
        delimiter: char,
    },
    AutoPersons {
        field: String,
    },
    Range {
        field: String,
        min: String,
        max: String,
    },
    Tex {
        file: PathBuf,
    },
}

impl Default for DraftKind {
    fn default() -> Self {
        Self::Explicit {
            members: BTreeSet::new(),
        }
    }
}

impl GroupDraft {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: DraftKind) -> Self {
        self.kind = kind;
        self
    }

    /// Pre-fill a draft from an existing group for editing.
    #[must_use]
    pub fn from_group(group: &Group) -> Self {
        let kind = match group.kind() {
            GroupKind::Explicit { members } => DraftKind::Explicit {
                members: members.clone(),
            },
            GroupKind::Keyword(spec) => DraftKind::Keyword {
                field: spec.field.to_string(),
                term: spec.term.clone(),
                delimiter: spec.delimiter,
                case_sensitive: spec.case_sensitive,
                regex: spec.regex,
            },
            GroupKind::Search(spec) => DraftKind::Search {
                term: spec.term.clone(),
                case_sensitive: spec.case_sensitive,
                regex: spec.regex,
            },
            GroupKind::Automatic(AutomaticSource::Keywords { field, delimiter }) => {
                DraftKind::AutoKeywords {
                    field: field.to_string(),
                    delimiter: *delimiter,
                }
            }
            GroupKind::Automatic(AutomaticSource::Persons { field }) => DraftKind::AutoPersons {
                field: field.to_string(),
            },
            GroupKind::Range(spec) => {
                let (min, max) = bound_strings(spec);
                DraftKind::Range {
                    field: spec.field().to_string(),
                    min,
                    max,
                }
            }
            GroupKind::Tex(spec) => DraftKind::Tex {
                file: spec.file().to_path_buf(),
            },
        };

        Self {
            name: group.name().to_string(),
            description: group.description().unwrap_or_default().to_string(),
            color: group.color().unwrap_or_default().to_string(),
            icon: group.icon().unwrap_or_default().to_string(),
            hierarchy: group.hierarchy(),
            kind,
        }
    }

    /// Check the draft and report every finding. Errors block `build`;
    /// warnings do not.
    #[must_use]
    pub fn validate(&self, siblings: &[Group]) -> Vec<Issue> {
        let mut issues = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            issues.push(Issue::error("group name must not be empty"));
        } else {
            if name.contains(',') {
                issues.push(Issue::warning(
                    "group name contains the keyword separator ','",
                ));
            }
            if siblings.iter().any(|g| g.name() == name) {
                issues.push(Issue::warning(format!(
                    "a group named '{name}' already exists"
                )));
            }
        }

        match &self.kind {
            DraftKind::Explicit { .. } => {}
            DraftKind::Keyword {
                field, term, regex, ..
            } => {
                if field.trim().is_empty() {
                    issues.push(Issue::error("field must not be empty"));
                }
                if term.trim().is_empty() {
                    issues.push(Issue::error("keyword must not be empty"));
                } else if *regex && let Err(err) = Regex::new(term) {
                    issues.push(Issue::error(format!("invalid pattern '{term}': {err}")));
                }
            }
            DraftKind::Search {
                term, regex, ..
            } => {
                if term.trim().is_empty() {
                    issues.push(Issue::error("search expression must not be empty"));
                } else if *regex && let Err(err) = Regex::new(term) {
                    issues.push(Issue::error(format!("invalid pattern '{term}': {err}")));
                }
            }
            DraftKind::AutoKeywords { field, .. } | DraftKind::AutoPersons { field } => {
                if field.trim().is_empty() {
                    issues.push(Issue::error("field must not be empty"));
                }
            }
            DraftKind::Range { field, min, max } => {
                if field.trim().is_empty() {
                    issues.push(Issue::error("field must not be empty"));
                } else if let Err(err) =
                    RangeSpec::parse(Field::new(field), Some(min.as_str()), Some(max.as_str()))
                {
                    issues.push(Issue::error(err.to_string()));
                }
            }
            DraftKind::Tex { file } => {
                if file.as_os_str().is_empty() {
                    issues.push(Issue::error("aux file path must not be empty"));
                } else if !file
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("aux"))
                {
                    issues.push(Issue::error(format!(
                        "'{}' is not an aux file",
                        file.display()
                    )));
                }
            }
        }

        issues
    }

    /// Turn the draft into a group.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the first hard validation error, or when a tex
    /// draft's aux file cannot be read.
    pub fn build(&self) -> DraftResult<Group> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }

        let kind = match &self.kind {
            DraftKind::Explicit { members } => GroupKind::Explicit {
                members: members.clone(),
            },
            DraftKind::Keyword {
                field,
                term,
                delimiter,
                case_sensitive,
                regex,
            } => {
                let field = non_empty_field(field)?;
                let term = non_empty_term(term)?;
                if *regex {
                    check_pattern(&term)?;
                }
                GroupKind::Keyword(KeywordSpec {
                    field,
                    term,
                    delimiter: *delimiter,
                    case_sensitive: *case_sensitive,
                    regex: *regex,
                })
            }
            DraftKind::Search {
                term,
                case_sensitive,
                regex,
            } => {
                let term = non_empty_term(term)?;
                if *regex {
                    check_pattern(&term)?;
                }
                GroupKind::Search(SearchSpec {
                    term,
                    case_sensitive: *case_sensitive,
                    regex: *regex,
                })
            }
            DraftKind::AutoKeywords { field, delimiter } => {
                GroupKind::Automatic(AutomaticSource::Keywords {
                    field: non_empty_field(field)?,
                    delimiter: *delimiter,
                })
            }
            DraftKind::AutoPersons { field } => GroupKind::Automatic(AutomaticSource::Persons {
                field: non_empty_field(field)?,
            }),
            DraftKind::Range { field, min, max } => {
                if field.trim().is_empty() {
                    return Err(DraftError::EmptyField);
                }
                GroupKind::Range(RangeSpec::parse(
                    Field::new(field),
                    Some(min.as_str()),
                    Some(max.as_str()),
                )?)
            }
            DraftKind::Tex { file } => {
                if file.as_os_str().is_empty() {
                    return Err(DraftError::EmptyAuxPath);
                }
                let spec = TexSpec::scan(file).map_err(|source| DraftError::AuxRead {
                    path: file.clone(),
                    source,
                })?;
                GroupKind::Tex(spec)
            }
        };

        let mut group = Group::new(name, self.hierarchy, kind);
        if !self.description.trim().is_empty() {
            group = group.with_description(self.description.clone());
        }
        if !self.color.trim().is_empty() {
            group = group.with_color(self.color.clone());
        }
        if !self.icon.trim().is_empty() {
            group = group.with_icon(self.icon.clone());
        }
        Ok(group)
    }
}

fn non_empty_field(field: &str) -> DraftResult<Field> {
    let field = field.trim();
    if field.is_empty() {
        return Err(DraftError::EmptyField);
    }
    Ok(Field::new(field))
}

fn non_empty_term(term: &str) -> DraftResult<String> {
    let term = term.trim();
    if term.is_empty() {
        return Err(DraftError::EmptyTerm);
    }
    Ok(term.to_string())
}

fn check_pattern(pattern: &str) -> DraftResult<()> {
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|err| DraftError::InvalidPattern {
            pattern: pattern.to_string(),
            details: err.to_string(),
        })
}

fn bound_strings(spec: &RangeSpec) -> (String, String) {
    match spec.bounds() {
        crate::groups::RangeBounds::Numeric { min, max } => (
            min.map(|v| v.to_string()).unwrap_or_default(),
            max.map(|v| v.to_string()).unwrap_or_default(),
        ),
        crate::groups::RangeBounds::Date { min, max } => (
            min.map(|d| d.to_string()).unwrap_or_default(),
            max.map(|d| d.to_string()).unwrap_or_default(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_group_then_build_round_trips_a_range_group() {
        let spec = RangeSpec::parse(Field::new("year"), Some("2019"), Some("2021"))
            .expect("spec parses");
        let original = Group::new("recent", Hierarchy::Refining, GroupKind::Range(spec))
            .with_description("last few years");

        let rebuilt = GroupDraft::from_group(&original)
            .build()
            .expect("draft builds");
        assert_eq!(original, rebuilt);
        assert_eq!(rebuilt.description(), Some("last few years"));
    }

    #[test]
    fn from_group_keeps_explicit_members() {
        let original = Group::new(
            "read",
            Hierarchy::Independent,
            GroupKind::Explicit {
                members: ["smith2020".to_string()].into(),
            },
        );
        let rebuilt = GroupDraft::from_group(&original)
            .build()
            .expect("draft builds");
        assert_eq!(original, rebuilt);
    }
}
