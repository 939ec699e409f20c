// src/output.rs
use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::entry::Entry;
use crate::groups::{Group, GroupKind};

/// One output row: a group (or a generated subgroup) and its matches.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub group: String,
    pub kind: &'static str,
    pub dynamic: bool,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    version: &'static str,
    groups: &'a [GroupReport],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    groups: usize,
    entries: usize,
    matches: usize,
}

/// Evaluate every group against the entries.
///
/// Automatic groups contribute one `parent > child` row per generated
/// subgroup instead of a row of their own.
pub fn build_reports(groups: &[Group], entries: &[Entry], count_only: bool) -> Vec<GroupReport> {
    let mut reports = Vec::new();
    for group in groups {
        if matches!(group.kind(), GroupKind::Automatic(_)) {
            for child in group.subgroups(entries) {
                let label = format!("{} > {}", group.name(), child.name());
                reports.push(make_report(label, "automatic", true, &child, entries, count_only));
            }
        } else {
            reports.push(make_report(
                group.name().to_string(),
                group.kind().label(),
                group.is_dynamic(),
                group,
                entries,
                count_only,
            ));
        }
    }
    reports
}

fn make_report(
    label: String,
    kind: &'static str,
    dynamic: bool,
    group: &Group,
    entries: &[Entry],
    count_only: bool,
) -> GroupReport {
    let matches = group.find_matches(entries);
    let keys = (!count_only).then(|| {
        matches
            .iter()
            .map(|entry| entry.citation_key().unwrap_or("(no key)").to_string())
            .collect()
    });
    GroupReport {
        group: label,
        kind,
        dynamic,
        count: matches.len(),
        keys,
    }
}

/// Emit reports to the configured output format.
pub fn emit(reports: &[GroupReport], entry_count: usize, config: &Config) -> anyhow::Result<()> {
    let mut writer = OutputWriter::create(config)?;
    match config.format {
        OutputFormat::Json => output_json(reports, entry_count, &mut writer)?,
        OutputFormat::Csv => output_csv(reports, config, &mut writer)?,
        OutputFormat::Table => output_table(reports, entry_count, config, &mut writer)?,
    }
    Ok(())
}

struct OutputWriter(Box<dyn Write>);
impl OutputWriter {
    fn create(config: &Config) -> anyhow::Result<Self> {
        let writer: Box<dyn Write> = if let Some(path) = &config.output {
            Box::new(std::io::BufWriter::new(std::fs::File::create(path)?))
        } else {
            Box::new(std::io::BufWriter::new(std::io::stdout()))
        };
        Ok(Self(writer))
    }
}
impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.write(buf)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()
    }
}

fn summarise(reports: &[GroupReport], entry_count: usize) -> JsonSummary {
    JsonSummary {
        groups: reports.len(),
        entries: entry_count,
        matches: reports.iter().map(|r| r.count).sum(),
    }
}

fn output_table(
    reports: &[GroupReport],
    entry_count: usize,
    config: &Config,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(out)?;
    if config.count_only {
        writeln!(out, "     COUNT\tKIND     \tDYNAMIC\tGROUP")?;
    } else {
        writeln!(out, "     COUNT\tKIND     \tDYNAMIC\tGROUP\tKEYS")?;
    }
    writeln!(out, "----------------------------------------------")?;
    for report in reports {
        let dynamic = if report.dynamic { "yes" } else { "no" };
        if let Some(keys) = &report.keys {
            writeln!(
                out,
                "{:>10}\t{:<9}\t{:<7}\t{}\t{}",
                report.count,
                report.kind,
                dynamic,
                report.group,
                keys.join(", ")
            )?;
        } else {
            writeln!(
                out,
                "{:>10}\t{:<9}\t{:<7}\t{}",
                report.count, report.kind, dynamic, report.group
            )?;
        }
    }
    writeln!(out, "---")?;
    let summary = summarise(reports, entry_count);
    writeln!(
        out,
        "{:>10}\tTOTAL ({} groups, {} entries)\n",
        summary.matches, summary.groups, summary.entries
    )?;
    Ok(())
}

fn output_csv(
    reports: &[GroupReport],
    config: &Config,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if config.count_only {
        writeln!(out, "count,kind,dynamic,group")?;
    } else {
        writeln!(out, "count,kind,dynamic,group,keys")?;
    }
    for report in reports {
        let group = escape_field(&report.group);
        if let Some(keys) = &report.keys {
            writeln!(
                out,
                "{},{},{},{},{}",
                report.count,
                report.kind,
                report.dynamic,
                group,
                escape_field(&keys.join(", "))
            )?;
        } else {
            writeln!(
                out,
                "{},{},{},{}",
                report.count, report.kind, report.dynamic, group
            )?;
        }
    }
    Ok(())
}

fn escape_field(s: &str) -> String {
    let escaped = s.replace('"', "\"\"");
    format!("\"{escaped}\"")
}

fn output_json(
    reports: &[GroupReport],
    entry_count: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let output = JsonOutput {
        version: crate::VERSION,
        groups: reports,
        summary: summarise(reports, entry_count),
    };
    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)?;
    Ok(())
}
