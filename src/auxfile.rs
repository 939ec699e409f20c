// src/auxfile.rs
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

fn citation_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\\citation\{([^}]*)\}").unwrap())
}

/// Collect the citation keys recorded in a LaTeX `.aux` file.
///
/// # Errors
///
/// Returns `Err` when the file cannot be opened or read.
pub fn citation_keys(path: &Path) -> io::Result<BTreeSet<String>> {
    let file = File::open(path)?;
    scan_citations(BufReader::new(file))
}

/// Scan `\citation{...}` commands from a reader. One command may list
/// several comma-separated keys; duplicates collapse into the set.
pub fn scan_citations(reader: impl BufRead) -> io::Result<BTreeSet<String>> {
    let mut keys = BTreeSet::new();
    for line in reader.lines() {
        let line = line?;
        for caps in citation_pattern().captures_iter(&line) {
            if let Some(inner) = caps.get(1) {
                for key in inner.as_str().split(',') {
                    let key = key.trim();
                    if !key.is_empty() {
                        keys.insert(key.to_string());
                    }
                }
            }
        }
    }
    Ok(keys)
}
