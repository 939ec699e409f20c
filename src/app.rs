use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::Config;
use crate::draft::{DraftKind, GroupDraft};
use crate::entry::Entry;
use crate::groups::Group;
use crate::history::SearchHistory;
use crate::{cli, output};

pub fn run() -> Result<()> {
    let config = cli::load_config()?;

    if config.recent {
        return show_recent(&config);
    }

    let query = resolve_query(&config)?;
    if let (Some(raw), Some(path)) = (&config.query, &config.history_file) {
        let mut history = load_history(path)?;
        history.record_search(raw.clone());
        save_history(path, &history)?;
    }

    let Some(entries_path) = &config.entries else {
        bail!("no entries file given");
    };
    let entries = load_entries(entries_path)?;

    let mut groups = match &config.groups_file {
        Some(path) => load_groups(path)?,
        None => Vec::new(),
    };

    let mut drafts = config.drafts.clone();
    if let Some(query) = &query {
        drafts.push(
            GroupDraft::named(query.clone()).with_kind(DraftKind::Search {
                term: query.clone(),
                case_sensitive: config.case_sensitive,
                regex: config.regex,
            }),
        );
    }

    for draft in &drafts {
        match realise_draft(draft, &groups) {
            Ok(group) => groups.push(group),
            Err(e) => {
                if config.strict {
                    return Err(e).with_context(|| format!("cannot build group '{}'", draft.name));
                }
                eprintln!("[warn] skipping group '{}': {:#}", draft.name, e);
            }
        }
    }

    let reports = output::build_reports(&groups, &entries, config.count_only);
    output::emit(&reports, entries.len(), &config).context("failed to emit output")?;
    Ok(())
}

/// Validate a draft against the groups loaded so far, then build it.
/// Warnings go to stderr; the first hard finding aborts the build.
fn realise_draft(draft: &GroupDraft, siblings: &[Group]) -> Result<Group> {
    let issues = draft.validate(siblings);
    for warning in issues.iter().filter(|issue| !issue.is_error()) {
        eprintln!("[warn] group '{}': {}", draft.name, warning.message);
    }
    if let Some(problem) = issues.iter().find(|issue| issue.is_error()) {
        bail!("{}", problem.message);
    }
    Ok(draft.build()?)
}

fn show_recent(config: &Config) -> Result<()> {
    let Some(path) = &config.history_file else {
        bail!("--recent requires --history");
    };
    let history = load_history(path)?;
    if history.is_empty() {
        eprintln!("(search history is empty)");
        return Ok(());
    }
    for entry in history.menu_entries() {
        println!("{entry}");
    }
    Ok(())
}

/// The query to search with: `--pick` replays a numbered history
/// entry and promotes it to most recent, otherwise `--query` is used
/// as given.
fn resolve_query(config: &Config) -> Result<Option<String>> {
    let Some(position) = config.pick else {
        return Ok(config.query.clone());
    };
    let Some(path) = &config.history_file else {
        bail!("--pick requires --history");
    };
    let mut history = load_history(path)?;
    let query = history
        .reuse(position - 1)
        .with_context(|| format!("cannot pick history entry [{position}]"))?;
    save_history(path, &history)?;
    Ok(Some(query))
}

fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let file = File::open(path)
        .with_context(|| format!("cannot open entries file '{}'", path.display()))?;
    let entries = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot parse entries file '{}'", path.display()))?;
    Ok(entries)
}

fn load_groups(path: &Path) -> Result<Vec<Group>> {
    let file = File::open(path)
        .with_context(|| format!("cannot open groups file '{}'", path.display()))?;
    let groups = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot parse groups file '{}'", path.display()))?;
    Ok(groups)
}

fn load_history(path: &Path) -> Result<SearchHistory> {
    if !path.exists() {
        return Ok(SearchHistory::new());
    }
    let file = File::open(path)
        .with_context(|| format!("cannot open history file '{}'", path.display()))?;
    let history = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot parse history file '{}'", path.display()))?;
    Ok(history)
}

fn save_history(path: &Path, history: &SearchHistory) -> Result<()> {
    let json = serde_json::to_string_pretty(history)?;
    std::fs::write(path, json)
        .with_context(|| format!("cannot write history file '{}'", path.display()))?;
    Ok(())
}
