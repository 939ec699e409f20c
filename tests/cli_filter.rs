// tests/cli_filter.rs
use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::{tempdir, TempDir};

fn bibgroups() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bibgroups"))
}

fn write_entries(dir: &TempDir) -> PathBuf {
    let entries = json!([
        {
            "type": "article",
            "fields": {
                "citationkey": "smith2020",
                "title": "Quantum Optics in Practice",
                "author": "Smith, Alice",
                "year": "2020",
                "keywords": "optics, quantum"
            }
        },
        {
            "type": "article",
            "fields": {
                "citationkey": "doe2019",
                "title": "Classical Mechanics",
                "author": "Doe, John",
                "year": "2019",
                "keywords": "mechanics"
            }
        },
        {
            "type": "book",
            "fields": {
                "citationkey": "jones2022",
                "title": "Deep Learning Methods",
                "author": "Jones, Mary",
                "year": "2022",
                "keywords": "learning, optics"
            }
        }
    ]);
    let path = dir.path().join("refs.json");
    fs::write(&path, entries.to_string()).expect("entries written");
    path
}

fn write_groups(dir: &TempDir) -> PathBuf {
    let groups = json!([
        {"name": "read", "type": "explicit", "members": ["smith2020"]},
        {"name": "optics", "type": "keyword", "field": "keywords", "term": "optics"}
    ]);
    let path = dir.path().join("groups.json");
    fs::write(&path, groups.to_string()).expect("groups written");
    path
}

#[test]
fn shows_help() {
    bibgroups()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bibgroups"));
}

#[test]
fn table_reports_each_group_with_its_keys() {
    let dir = tempdir().expect("tempdir");
    let refs = write_entries(&dir);
    let groups = write_groups(&dir);

    bibgroups()
        .arg("--groups")
        .arg(groups)
        .arg(refs)
        .assert()
        .success()
        .stdout(predicate::str::contains("read"))
        .stdout(predicate::str::contains("smith2020, jones2022"))
        .stdout(predicate::str::contains("TOTAL (2 groups, 3 entries)"));
}

#[test]
fn json_report_embeds_version_and_summary() {
    let dir = tempdir().expect("tempdir");
    let refs = write_entries(&dir);
    let groups = write_groups(&dir);

    let assert = bibgroups()
        .arg("--format")
        .arg("json")
        .arg("--groups")
        .arg(groups)
        .arg(refs)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(report["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(report["groups"].as_array().map(Vec::len), Some(2));
    assert_eq!(report["summary"]["entries"], 3);
    assert_eq!(report["summary"]["matches"], 3);
}

#[test]
fn range_flags_build_a_named_range_group() {
    let dir = tempdir().expect("tempdir");
    let refs = write_entries(&dir);

    bibgroups()
        .args(["--field", "year", "--min", "2019", "--max", "2021"])
        .args(["--name", "recent"])
        .arg(refs)
        .assert()
        .success()
        .stdout(predicate::str::contains("recent"))
        .stdout(predicate::str::contains("smith2020, doe2019"));
}

#[test]
fn a_query_group_is_named_after_the_query() {
    let dir = tempdir().expect("tempdir");
    let refs = write_entries(&dir);

    bibgroups()
        .args(["--query", "deep learning"])
        .arg(refs)
        .assert()
        .success()
        .stdout(predicate::str::contains("deep learning"))
        .stdout(predicate::str::contains("jones2022"));
}

#[test]
fn count_only_csv_omits_the_keys_column() {
    let dir = tempdir().expect("tempdir");
    let refs = write_entries(&dir);
    let groups = write_groups(&dir);

    bibgroups()
        .args(["--format", "csv", "--count-only"])
        .arg("--groups")
        .arg(groups)
        .arg(refs)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("count,kind,dynamic,group\n"))
        .stdout(predicate::str::contains("keys").not());
}

#[test]
fn the_report_can_be_written_to_a_file() {
    let dir = tempdir().expect("tempdir");
    let refs = write_entries(&dir);
    let groups = write_groups(&dir);
    let out = dir.path().join("report.csv");

    bibgroups()
        .args(["--format", "csv"])
        .arg("--groups")
        .arg(groups)
        .arg("--output")
        .arg(&out)
        .arg(refs)
        .assert()
        .success();

    let report = fs::read_to_string(&out).expect("report exists");
    assert!(report.starts_with("count,kind,dynamic,group,keys"));
    assert!(report.contains("\"read\""));
}

#[test]
fn missing_group_source_fails() {
    let dir = tempdir().expect("tempdir");
    let refs = write_entries(&dir);

    bibgroups()
        .arg(refs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No group source given"));
}

#[test]
fn an_unparsable_bound_is_rejected_at_the_flag() {
    let dir = tempdir().expect("tempdir");
    let refs = write_entries(&dir);

    bibgroups()
        .args(["--field", "year", "--min", "nineteen"])
        .arg(refs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot parse bound"));
}

#[test]
fn lenient_runs_warn_and_skip_unreadable_groups() {
    let dir = tempdir().expect("tempdir");
    let refs = write_entries(&dir);
    let missing = dir.path().join("missing.aux");

    bibgroups()
        .arg("--aux")
        .arg(&missing)
        .arg(&refs)
        .assert()
        .success()
        .stdout(predicate::str::contains("TOTAL (0 groups, 3 entries)"))
        .stderr(predicate::str::contains("[warn] skipping group 'missing'"));

    bibgroups()
        .arg("--aux")
        .arg(&missing)
        .arg("--strict")
        .arg(&refs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot build group 'missing'"));
}

#[test]
fn aux_groups_match_cited_entries() {
    let dir = tempdir().expect("tempdir");
    let refs = write_entries(&dir);
    let aux = dir.path().join("paper.aux");
    fs::write(&aux, "\\relax\n\\citation{smith2020,jones2022}\n").expect("aux written");

    bibgroups()
        .arg("--aux")
        .arg(&aux)
        .arg(refs)
        .assert()
        .success()
        .stdout(predicate::str::contains("paper"))
        .stdout(predicate::str::contains("smith2020, jones2022"));
}

#[test]
fn history_round_trips_across_runs() {
    let dir = tempdir().expect("tempdir");
    let refs = write_entries(&dir);
    let history = dir.path().join("history.json");

    bibgroups()
        .arg("--history")
        .arg(&history)
        .args(["--query", "deep learning"])
        .arg(&refs)
        .assert()
        .success();

    bibgroups()
        .arg("--history")
        .arg(&history)
        .args(["--query", "optics"])
        .arg(&refs)
        .assert()
        .success();

    bibgroups()
        .arg("--history")
        .arg(&history)
        .arg("--recent")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] optics"))
        .stdout(predicate::str::contains("[2] deep learning"));

    // Replaying [2] searches with it again and promotes it.
    bibgroups()
        .arg("--history")
        .arg(&history)
        .args(["--pick", "2"])
        .arg(&refs)
        .assert()
        .success()
        .stdout(predicate::str::contains("jones2022"));

    bibgroups()
        .arg("--history")
        .arg(&history)
        .arg("--recent")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] deep learning"));
}

#[test]
fn recent_on_a_fresh_history_reports_emptiness() {
    let dir = tempdir().expect("tempdir");
    let history = dir.path().join("never-written.json");

    bibgroups()
        .arg("--history")
        .arg(&history)
        .arg("--recent")
        .assert()
        .success()
        .stderr(predicate::str::contains("search history is empty"));
}

#[test]
fn picking_past_the_end_names_the_position() {
    let dir = tempdir().expect("tempdir");
    let refs = write_entries(&dir);
    let history = dir.path().join("history.json");

    bibgroups()
        .arg("--history")
        .arg(&history)
        .args(["--query", "optics"])
        .arg(&refs)
        .assert()
        .success();

    bibgroups()
        .arg("--history")
        .arg(&history)
        .args(["--pick", "5"])
        .arg(&refs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot pick history entry [5]"));
}
