// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::field::{Field, FieldKind};

/// Root error type shared across the crate.
#[derive(Debug, Error)]
pub enum BibGroupsError {
    #[error("Group error: {0}")]
    Group(#[from] GroupError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Draft error: {0}")]
    Draft(#[from] DraftError),

    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BibGroupsError>;

/// Errors raised while constructing or validating group definitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("Field '{field}' is not supported for range filtering")]
    FieldNotRangeFilterable { field: Field },

    #[error("Field '{field}' expects {expected} bounds")]
    BoundsMismatch { field: Field, expected: FieldKind },

    #[error("Cannot parse '{value}' as a {expected} bound")]
    InvalidBound { value: String, expected: FieldKind },

    #[error("Invalid bound order: '{min}' exceeds '{max}'")]
    ReversedBounds { min: String, max: String },
}

pub type GroupResult<T> = std::result::Result<T, GroupError>;

/// Errors raised by the search history.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("History index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type HistoryResult<T> = std::result::Result<T, HistoryError>;

/// Errors raised when a group draft cannot be turned into a group.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Group name must not be empty")]
    EmptyName,

    #[error("Search or keyword term must not be empty")]
    EmptyTerm,

    #[error("Field name must not be empty")]
    EmptyField,

    #[error("Invalid pattern '{pattern}': {details}")]
    InvalidPattern { pattern: String, details: String },

    #[error("Aux file path must not be empty")]
    EmptyAuxPath,

    #[error("Failed to read aux file '{path}': {source}")]
    AuxRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Group(#[from] GroupError),
}

pub type DraftResult<T> = std::result::Result<T, DraftError>;

/// CLI argument validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("Invalid CLI value: {flag} = {value} - {reason}")]
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },

    #[error("No group source given: pass --groups, --field, --query or --aux")]
    MissingGroupSource,

    #[error("No entries file given")]
    MissingEntries,
}

pub type CliResult<T> = std::result::Result<T, CliError>;
