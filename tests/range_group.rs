// tests/range_group.rs
use bibgroups::entry::Entry;
use bibgroups::field::Field;
use bibgroups::groups::{Group, GroupKind, Hierarchy, RangeSpec};

fn range_group(field: &str, min: Option<&str>, max: Option<&str>) -> Group {
    let spec = RangeSpec::parse(Field::new(field), min, max).expect("spec parses");
    Group::new("window", Hierarchy::Independent, GroupKind::Range(spec))
}

fn entry_with(field: &str, value: &str) -> Entry {
    Entry::new("article").with_field(field, value)
}

#[test]
fn numeric_range_is_inclusive_at_both_ends() {
    let group = range_group("year", Some("2019"), Some("2021"));

    assert!(group.matches(&entry_with("year", "2019")));
    assert!(group.matches(&entry_with("year", "2020")));
    assert!(group.matches(&entry_with("year", "2021")));
    assert!(!group.matches(&entry_with("year", "2018")));
    assert!(!group.matches(&entry_with("year", "2022")));
}

#[test]
fn date_range_is_inclusive_at_both_ends() {
    let group = range_group("date", Some("2019-01-01"), Some("2021-12-28"));

    assert!(group.matches(&entry_with("date", "2020-12-02")));
    assert!(group.matches(&entry_with("date", "2019-01-01")));
    assert!(group.matches(&entry_with("date", "2021-12-28")));
    assert!(!group.matches(&entry_with("date", "2018-12-02")));
    assert!(!group.matches(&entry_with("date", "2021-12-29")));
}

#[test]
fn open_ends_extend_indefinitely() {
    let from_2019 = range_group("year", Some("2019"), None);
    assert!(from_2019.matches(&entry_with("year", "2999")));
    assert!(!from_2019.matches(&entry_with("year", "2018")));

    let until_2021 = range_group("year", None, Some("2021"));
    assert!(until_2021.matches(&entry_with("year", "1900")));
    assert!(!until_2021.matches(&entry_with("year", "2022")));
}

#[test]
fn missing_and_malformed_values_never_match() {
    let group = range_group("year", Some("2019"), Some("2021"));

    assert!(!group.matches(&Entry::new("article")));
    assert!(!group.matches(&entry_with("year", "MMXX")));
    assert!(!group.matches(&entry_with("year", "")));

    let dates = range_group("date", Some("2019-01-01"), Some("2021-12-28"));
    assert!(!dates.matches(&entry_with("date", "02/12/2020")));
    assert!(!dates.matches(&entry_with("date", "2020")));
}

#[test]
fn fractional_values_compare_against_integer_bounds() {
    let group = range_group("volume", Some("3"), Some("7"));
    assert!(group.matches(&entry_with("volume", "3.5")));
    assert!(!group.matches(&entry_with("volume", "7.1")));
}

#[test]
fn text_fields_are_rejected_at_construction() {
    let err = RangeSpec::parse(Field::new("author"), Some("1"), None)
        .expect_err("text field should be rejected");
    assert!(err.to_string().contains("not supported for range filtering"));
}

#[test]
fn identity_includes_the_field_and_the_bounds() {
    let narrow = range_group("year", Some("2019"), Some("2021"));
    let wide = range_group("year", Some("2010"), Some("2021"));
    let volumes = range_group("volume", Some("2019"), Some("2021"));

    assert_ne!(narrow, wide);
    assert_ne!(narrow, volumes);
    assert_eq!(narrow, range_group("year", Some("2019"), Some("2021")));
}
