// src/config.rs
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::draft::GroupDraft;

/// Top-level configuration derived from CLI arguments.
#[derive(Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct Config {
    pub format: OutputFormat,
    pub entries: Option<PathBuf>,
    pub groups_file: Option<PathBuf>,
    /// Ad-hoc groups built from `--field`/`--aux`. A `--query` group is
    /// added at run time, after `--pick` resolves against the history.
    pub drafts: Vec<GroupDraft>,
    pub query: Option<String>,
    pub pick: Option<usize>,
    pub regex: bool,
    pub case_sensitive: bool,
    pub history_file: Option<PathBuf>,
    pub recent: bool,
    pub output: Option<PathBuf>,
    pub count_only: bool,
    pub strict: bool,
}
