// tests/group_contract.rs
use std::collections::{BTreeSet, HashSet};

use bibgroups::entry::Entry;
use bibgroups::field::Field;
use bibgroups::groups::{
    AutomaticSource, Group, GroupKind, Hierarchy, KeywordSpec, RangeBounds, RangeSpec, SearchSpec,
    TexSpec,
};

fn one_of_each() -> Vec<Group> {
    let members: BTreeSet<String> = ["smith2020".to_string()].into();
    let range = RangeSpec::new(Field::new("year"), RangeBounds::numeric(Some(2019), Some(2021)))
        .expect("year takes numeric bounds");
    vec![
        Group::new(
            "read",
            Hierarchy::Independent,
            GroupKind::Explicit { members },
        ),
        Group::new(
            "optics",
            Hierarchy::Refining,
            GroupKind::Keyword(KeywordSpec::words(Field::new("keywords"), "optics", false)),
        ),
        Group::new(
            "quantum",
            Hierarchy::Independent,
            GroupKind::Search(SearchSpec::plain("quantum", false)),
        ),
        Group::new(
            "by-author",
            Hierarchy::Independent,
            GroupKind::Automatic(AutomaticSource::Persons {
                field: Field::new("author"),
            }),
        ),
        Group::new("recent", Hierarchy::Including, GroupKind::Range(range)),
        Group::new(
            "paper",
            Hierarchy::Independent,
            GroupKind::Tex(TexSpec::new(
                "paper.aux",
                ["smith2020".to_string()].into(),
            )),
        ),
    ]
}

#[test]
fn every_kind_survives_the_groups_file_format() {
    let groups = one_of_each();
    let json = serde_json::to_string_pretty(&groups).expect("serialises");
    let decoded: Vec<Group> = serde_json::from_str(&json).expect("deserialises");
    assert_eq!(decoded, groups);
}

#[test]
fn the_kind_tag_names_the_behaviour() {
    let json = serde_json::to_string(&one_of_each()).expect("serialises");
    for tag in ["explicit", "keyword", "search", "automatic", "range", "tex"] {
        assert!(
            json.contains(&format!(r#""type":"{tag}""#)),
            "missing tag {tag} in {json}"
        );
    }
}

#[test]
fn stored_groups_may_omit_defaults() {
    let json = r#"[
        {"name": "read", "type": "explicit", "members": []},
        {"name": "optics", "type": "keyword", "field": "keywords", "term": "optics"}
    ]"#;
    let groups: Vec<Group> = serde_json::from_str(json).expect("deserialises");

    assert_eq!(groups[0].hierarchy(), Hierarchy::Independent);
    let GroupKind::Keyword(spec) = groups[1].kind() else {
        panic!("expected a keyword group, got {:?}", groups[1].kind());
    };
    assert_eq!(spec.delimiter, ',');
    assert!(!spec.case_sensitive);
}

#[test]
fn stored_range_groups_reject_mismatched_bounds() {
    let json = r#"{
        "name": "broken",
        "type": "range",
        "field": "year",
        "bounds": {"kind": "date", "min": "2019-01-01"}
    }"#;
    let err = serde_json::from_str::<Group>(json).expect_err("mismatch should fail");
    assert!(err.to_string().contains("numeric"));
}

#[test]
fn metadata_never_affects_identity() {
    let plain = one_of_each();
    let decorated: Vec<Group> = one_of_each()
        .into_iter()
        .map(|g| g.with_description("note").with_color("#123456").with_icon("star"))
        .collect();

    assert_eq!(plain, decorated);

    let set: HashSet<Group> = plain.into_iter().collect();
    for group in &decorated {
        assert!(set.contains(group), "{} should hash alike", group.name());
    }
}

#[test]
fn clones_are_independent_and_classify_identically() {
    let entry = Entry::new("article")
        .with_field("citationkey", "smith2020")
        .with_field("keywords", "optics")
        .with_field("title", "Quantum Optics")
        .with_field("author", "Smith, Alice")
        .with_field("year", "2020");

    for original in one_of_each() {
        let copy = original.clone();
        let verdict = original.matches(&entry);
        drop(original);
        assert_eq!(copy.matches(&entry), verdict, "{} diverged", copy.name());
    }
}

#[test]
fn dynamic_classification_is_fixed_per_kind() {
    let dynamic: Vec<bool> = one_of_each().iter().map(Group::is_dynamic).collect();
    // explicit, keyword, search, automatic, range, tex
    assert_eq!(dynamic, [false, true, true, true, true, false]);
}
