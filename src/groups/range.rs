// src/groups/range.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::{GroupError, GroupResult};
use crate::field::{Field, FieldKind};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive bounds over a field value; either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RangeBounds {
    Numeric {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    Date {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<NaiveDate>,
    },
}

impl RangeBounds {
    pub fn numeric(min: Option<i64>, max: Option<i64>) -> Self {
        Self::Numeric { min, max }
    }

    pub fn date(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        Self::Date { min, max }
    }

    /// The field classification these bounds apply to.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Numeric { .. } => FieldKind::Numeric,
            Self::Date { .. } => FieldKind::Date,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        match self {
            Self::Numeric { min, max } => min.is_none() && max.is_none(),
            Self::Date { min, max } => min.is_none() && max.is_none(),
        }
    }

    /// Whether a raw field value falls inside the bounds.
    ///
    /// The value is trimmed before parsing; values that do not parse as
    /// the expected kind never match.
    pub fn contains(&self, raw: &str) -> bool {
        let raw = raw.trim();
        match self {
            Self::Numeric { min, max } => raw.parse::<f64>().is_ok_and(|v| {
                min.is_none_or(|m| v >= m as f64) && max.is_none_or(|m| v <= m as f64)
            }),
            Self::Date { min, max } => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .is_ok_and(|d| min.is_none_or(|m| d >= m) && max.is_none_or(|m| d <= m)),
        }
    }
}

/// A range filter bound to a field.
///
/// Construction fails unless the bound representation matches the
/// field's value classification, so a `RangeSpec` never compares dates
/// against a numeric field or vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRangeSpec")]
pub struct RangeSpec {
    field: Field,
    bounds: RangeBounds,
}

#[derive(Deserialize)]
struct RawRangeSpec {
    field: Field,
    bounds: RangeBounds,
}

impl TryFrom<RawRangeSpec> for RangeSpec {
    type Error = GroupError;

    fn try_from(raw: RawRangeSpec) -> GroupResult<Self> {
        Self::new(raw.field, raw.bounds)
    }
}

impl RangeSpec {
    /// Pair a field with typed bounds.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the field is not numeric or date, or when the
    /// bound representation does not match the field's classification.
    pub fn new(field: Field, bounds: RangeBounds) -> GroupResult<Self> {
        match field.kind() {
            FieldKind::Text => Err(GroupError::FieldNotRangeFilterable { field }),
            kind if kind != bounds.kind() => {
                Err(GroupError::BoundsMismatch { field, expected: kind })
            }
            _ => Ok(Self { field, bounds }),
        }
    }

    /// Build a spec from raw bound strings, e.g. as typed into a dialog
    /// or passed on the command line. Empty strings leave that end open.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the field is not range filterable, a bound
    /// does not parse as the field's kind, or the lower bound exceeds
    /// the upper bound.
    pub fn parse(field: Field, min: Option<&str>, max: Option<&str>) -> GroupResult<Self> {
        let kind = field.kind();
        if kind == FieldKind::Text {
            return Err(GroupError::FieldNotRangeFilterable { field });
        }

        let min = min.map(str::trim).filter(|s| !s.is_empty());
        let max = max.map(str::trim).filter(|s| !s.is_empty());

        let bounds = match kind {
            FieldKind::Numeric => {
                let min = min.map(|s| parse_numeric_bound(s)).transpose()?;
                let max = max.map(|s| parse_numeric_bound(s)).transpose()?;
                if let (Some(lo), Some(hi)) = (min, max)
                    && lo > hi
                {
                    return Err(reversed(lo.to_string(), hi.to_string()));
                }
                RangeBounds::Numeric { min, max }
            }
            FieldKind::Date => {
                let min = min.map(|s| parse_date_bound(s)).transpose()?;
                let max = max.map(|s| parse_date_bound(s)).transpose()?;
                if let (Some(lo), Some(hi)) = (min, max)
                    && lo > hi
                {
                    return Err(reversed(lo.to_string(), hi.to_string()));
                }
                RangeBounds::Date { min, max }
            }
            FieldKind::Text => unreachable!("rejected above"),
        };

        Ok(Self { field, bounds })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn bounds(&self) -> &RangeBounds {
        &self.bounds
    }

    /// Whether the entry's field value falls inside the bounds.
    /// Entries missing the field never match.
    pub fn matches(&self, entry: &Entry) -> bool {
        entry
            .get(&self.field)
            .is_some_and(|raw| self.bounds.contains(raw))
    }
}

fn parse_numeric_bound(raw: &str) -> GroupResult<i64> {
    raw.parse().map_err(|_| GroupError::InvalidBound {
        value: raw.to_string(),
        expected: FieldKind::Numeric,
    })
}

fn parse_date_bound(raw: &str) -> GroupResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| GroupError::InvalidBound {
        value: raw.to_string(),
        expected: FieldKind::Date,
    })
}

fn reversed(min: String, max: String) -> GroupError {
    GroupError::ReversedBounds { min, max }
}
