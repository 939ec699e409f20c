// src/groups/tex.rs
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Matches entries cited in a LaTeX document, identified by the
/// citation keys scanned from its `.aux` file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TexSpec {
    file: PathBuf,
    cited: BTreeSet<String>,
}

impl TexSpec {
    pub fn new(file: impl Into<PathBuf>, cited: BTreeSet<String>) -> Self {
        Self {
            file: file.into(),
            cited,
        }
    }

    /// Build a spec by scanning an aux file for `\citation` commands.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the file cannot be read.
    pub fn scan(file: impl Into<PathBuf>) -> std::io::Result<Self> {
        let file = file.into();
        let cited = crate::auxfile::citation_keys(&file)?;
        Ok(Self { file, cited })
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn cited(&self) -> &BTreeSet<String> {
        &self.cited
    }

    /// Whether the entry's citation key was cited in the document.
    /// Entries without a citation key never match.
    pub fn matches(&self, entry: &Entry) -> bool {
        entry.citation_key().is_some_and(|key| self.cited.contains(key))
    }
}
