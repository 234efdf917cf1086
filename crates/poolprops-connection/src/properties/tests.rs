//! Tests for property blob parsing

use pretty_assertions::assert_eq;
use poolprops_core::{ConfigFormatError, PropertyMap};

use super::{merge_properties, parse_properties};

fn props(pairs: &[(&str, &str)]) -> PropertyMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn parse(text: &str) -> PropertyMap {
    parse_properties(Some(text), None).unwrap()
}

#[test]
fn test_parse_simple_blob() {
    assert_eq!(parse("a=1;b=2"), props(&[("a", "1"), ("b", "2")]));
}

#[test]
fn test_parse_duplicate_key_last_wins() {
    assert_eq!(parse("a=1;a=2"), props(&[("a", "2")]));
}

#[test]
fn test_parse_none_returns_existing() {
    let existing = props(&[("user", "app")]);

    assert_eq!(parse_properties(None, Some(existing.clone())).unwrap(), existing);
    assert!(parse_properties(None, None).unwrap().is_empty());
}

#[test]
fn test_parse_merges_into_existing() {
    let existing = props(&[("user", "app"), ("ssl", "false")]);
    let merged = parse_properties(Some("ssl=true;timeout=30"), Some(existing)).unwrap();

    assert_eq!(
        merged,
        props(&[("user", "app"), ("ssl", "true"), ("timeout", "30")])
    );
}

#[test]
fn test_merge_accumulates_across_calls() {
    let mut target = PropertyMap::new();
    merge_properties("a=1;b=2", &mut target).unwrap();
    merge_properties("b=3;c=4", &mut target).unwrap();

    assert_eq!(target, props(&[("a", "1"), ("b", "3"), ("c", "4")]));
}

#[test]
fn test_parse_skips_comments_and_blank_entries() {
    assert_eq!(
        parse("# vendor settings;a=1;;  ;! legacy;b=2"),
        props(&[("a", "1"), ("b", "2")])
    );
}

#[test]
fn test_parse_alternative_separators() {
    assert_eq!(
        parse("colon:1;space 2;padded  =  3;tab\t4"),
        props(&[("colon", "1"), ("space", "2"), ("padded", "3"), ("tab", "4")])
    );
}

#[test]
fn test_parse_value_keeps_separators_and_trailing_space() {
    let parsed = parse("url=jdbc:mysql://db:3306/app?x=y;pad=1 ");

    assert_eq!(parsed["url"], "jdbc:mysql://db:3306/app?x=y");
    assert_eq!(parsed["pad"], "1 ");
}

#[test]
fn test_parse_key_without_value() {
    assert_eq!(parse("flag;other="), props(&[("flag", ""), ("other", "")]));
}

#[test]
fn test_parse_escapes() {
    let parsed = parse(r"a\=b=c;tab=x\ty;uni=\u0041\u00e9;emoji=\uD83D\uDE00;plain=\q");

    assert_eq!(parsed["a=b"], "c");
    assert_eq!(parsed["tab"], "x\ty");
    assert_eq!(parsed["uni"], "Aé");
    assert_eq!(parsed["emoji"], "😀");
    assert_eq!(parsed["plain"], "q");
}

#[test]
fn test_parse_line_continuation() {
    let parsed = parse(r"list=one,\;    two;next=3");

    assert_eq!(parsed, props(&[("list", "one,two"), ("next", "3")]));
}

#[test]
fn test_parse_malformed_unicode_escape_fails() {
    let err = parse_properties(Some(r"a=1;b=\u00G1"), None).unwrap_err();

    assert!(matches!(
        err,
        ConfigFormatError::MalformedPropertyText { line: 2, .. }
    ));
}

#[test]
fn test_parse_unpaired_surrogate_fails() {
    assert!(parse_properties(Some(r"a=\uD83D"), None).is_err());
    assert!(parse_properties(Some(r"a=\uDE00"), None).is_err());
}

#[test]
fn test_parse_is_deterministic() {
    let text = "user=app;password=secret;ssl=true";
    assert_eq!(parse(text), parse(text));
}
