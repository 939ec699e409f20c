mod args;
mod parsers;

pub use args::{Args, OutputFormat};
pub use parsers::BoundArg;

use clap::Parser;

use crate::config::Config;
use crate::draft::{DraftKind, GroupDraft};
use crate::error::{CliError, GroupError, Result};
use crate::field::Field;
use crate::groups::RangeSpec;

fn validate_sources(args: &Args) -> std::result::Result<(), CliError> {
    let has_source = args.groups.is_some()
        || args.field.is_some()
        || args.query.is_some()
        || args.aux.is_some()
        || args.pick.is_some();
    if !has_source && !args.recent {
        return Err(CliError::MissingGroupSource);
    }
    if args.entries.is_none() && !args.recent {
        return Err(CliError::MissingEntries);
    }
    Ok(())
}

fn validate_name(name: &str) -> std::result::Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidValue {
            flag: "--name".to_string(),
            value: name.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Check `--field`/`--min`/`--max` early so mistakes surface as CLI
/// errors pointing at the offending flag.
fn validate_range_flags(
    field: &str,
    min: Option<&BoundArg>,
    max: Option<&BoundArg>,
) -> std::result::Result<(), CliError> {
    let parsed = RangeSpec::parse(
        Field::new(field),
        min.map(|b| b.0.as_str()),
        max.map(|b| b.0.as_str()),
    );
    parsed.map(|_| ()).map_err(|err| {
        let (flag, value) = match &err {
            GroupError::FieldNotRangeFilterable { .. } | GroupError::BoundsMismatch { .. } => {
                ("--field", field.to_string())
            }
            GroupError::InvalidBound { value, .. } => {
                if min.is_some_and(|b| b.0 == *value) {
                    ("--min", value.clone())
                } else {
                    ("--max", value.clone())
                }
            }
            GroupError::ReversedBounds { min: lower, .. } => ("--min", lower.clone()),
        };
        CliError::InvalidValue {
            flag: flag.to_string(),
            value,
            reason: err.to_string(),
        }
    })
}

/// Ad-hoc drafts from `--field` and `--aux`. The `--query` group is
/// built later, once `--pick` has been resolved against the history.
fn make_drafts(args: &Args) -> std::result::Result<Vec<GroupDraft>, CliError> {
    let mut drafts = Vec::new();

    if let Some(field) = &args.field {
        validate_name(&args.name)?;
        validate_range_flags(field, args.min.as_ref(), args.max.as_ref())?;
        drafts.push(GroupDraft::named(args.name.clone()).with_kind(DraftKind::Range {
            field: field.clone(),
            min: args.min.as_ref().map(|b| b.0.clone()).unwrap_or_default(),
            max: args.max.as_ref().map(|b| b.0.clone()).unwrap_or_default(),
        }));
    }

    if let Some(aux) = &args.aux {
        let name = aux
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("aux")
            .to_string();
        drafts.push(GroupDraft::named(name).with_kind(DraftKind::Tex { file: aux.clone() }));
    }

    Ok(drafts)
}

/// Parse CLI arguments and materialise a [`Config`].
///
/// # Errors
///
/// Returns `Err` when the parsed arguments are incomplete (no group
/// source, no entries file) or inconsistent (bad range flags).
pub fn load_config() -> Result<Config> {
    let args = Args::parse();
    build_config(&args)
}

/// Convert parsed CLI arguments into a runtime configuration.
///
/// # Errors
///
/// Returns `Err` when argument validation fails.
pub fn build_config(args: &Args) -> Result<Config> {
    validate_sources(args)?;
    let drafts = make_drafts(args)?;

    Ok(Config {
        format: args.format,
        entries: args.entries.clone(),
        groups_file: args.groups.clone(),
        drafts,
        query: args.query.clone(),
        pick: args.pick,
        regex: args.regex,
        case_sensitive: args.case_sensitive,
        history_file: args.history.clone(),
        recent: args.recent,
        output: args.output.clone(),
        count_only: args.count_only,
        strict: args.strict,
    })
}
