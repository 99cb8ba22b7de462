//! Fixture-driven tests for the parsing module.
//!
//! Fixtures (.txt) live in `fixtures/` with LF endings and are converted to
//! the dialect's CRLF separators before use.


use pretty_assertions::assert_eq;

use crate::parsing::{LineKind, LineRecord, contents, decompose, recompose};

const NONE: Option<&[String]> = None;

fn load_fixture(name: &str) -> String {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(format!("{fixtures_dir}/{name}.txt")).unwrap();
    to_crlf(&text)
}

/// Rewrites LF or CRLF endings as CRLF; checkouts may carry either.
fn to_crlf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}

fn assert_fixture_roundtrip(name: &str) {
    let text = load_fixture(name);
    let records = decompose(&text);
    invariants::check(&text, &records);

    assert_eq!(recompose(&records, NONE), text, "passthrough of {name}");
    let own = contents(&records);
    assert_eq!(recompose(&records, Some(&own[..])), text, "self-substitution of {name}");
}

fn kinds(records: &[LineRecord]) -> Vec<LineKind> {
    records.iter().map(LineRecord::kind).collect()
}

// Fixture round trips

#[test]
fn fixture_endings_normalize_either_way() {
    assert_eq!(to_crlf("<A>x\n<end A>\n"), "<A>x\r\n<end A>\r\n");
    assert_eq!(to_crlf("<A>x\r\n<end A>\r\n"), "<A>x\r\n<end A>\r\n");
}

#[test]
fn fixture_dialogue() {
    assert_fixture_roundtrip("dialogue");
}

#[test]
fn fixture_mixed_text() {
    assert_fixture_roundtrip("mixed_text");
}

#[test]
fn fixture_malformed() {
    assert_fixture_roundtrip("malformed");
}

#[test]
fn fixture_deep_nesting() {
    assert_fixture_roundtrip("deep_nesting");
}

// Structure

#[test]
fn dialogue_structure() {
    let records = decompose(&load_fixture("dialogue"));

    // Nine lines plus the empty segment after the final separator.
    assert_eq!(records.len(), 10);
    assert_eq!(
        kinds(&records),
        vec![
            LineKind::OpenTag,
            LineKind::OpenTag,
            LineKind::OpenTag,
            LineKind::EndTag,
            LineKind::OpenTag,
            LineKind::OpenTag,
            LineKind::OpenTag,
            LineKind::EndTag,
            LineKind::EndTag,
            LineKind::Text,
        ]
    );
    let indents: Vec<usize> = records.iter().map(LineRecord::indent).collect();
    assert_eq!(indents, vec![0, 2, 2, 2, 2, 4, 4, 2, 0, 0]);
    assert_eq!(records[2].content(), "Citizens, the assembly is adjourned.");
    assert_eq!(records[7].tag_name(), Some("end Choice"));
}

#[test]
fn malformed_lines_degrade_to_text() {
    let records = decompose(&load_fixture("malformed"));
    assert_eq!(
        kinds(&records),
        vec![
            LineKind::OpenTag,
            LineKind::Text,
            LineKind::Text,
            LineKind::EndTag,
            LineKind::Text,
            LineKind::Text,
            LineKind::Text,
            LineKind::Text,
        ]
    );
    assert_eq!(records[1].content(), "<Ti@tle>broken name");
    assert_eq!(records[5].indent(), 3);
}

#[test]
fn translation_substitutes_in_place() {
    let text = load_fixture("dialogue");
    let records = decompose(&text);
    let mut lines = contents(&records);
    lines[1] = "Marianne".to_string();
    lines[2] = "Citoyens, l'assemblée est ajournée.".to_string();
    lines[5] = "Protester".to_string();

    let out = recompose(&records, Some(&lines[..]));
    let expected = text
        .replace("Citizens, the assembly is adjourned.", "Citoyens, l'assemblée est ajournée.")
        .replace("<Option>Protest", "<Option>Protester");
    assert_eq!(out, expected);
}

// Length preservation

#[test]
fn empty_text_yields_single_empty_record() {
    let records = decompose("");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind(), LineKind::Text);
    assert_eq!(records[0].content(), "");
    assert_eq!(recompose(&records, NONE), "");
}

#[test]
fn single_blank_line() {
    let records = decompose("\r\n");
    assert_eq!(records.len(), 2);
    assert_eq!(recompose(&records, NONE), "\r\n");
}

#[test]
fn text_without_tags() {
    let text = "first\r\nsecond\r\n\r\nfourth";
    let records = decompose(text);
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.kind() == LineKind::Text));
    assert_eq!(recompose(&records, NONE), text);
}

#[test]
fn lf_input_is_rewritten_with_crlf() {
    let records = decompose("<A>x\n<end A>");
    assert_eq!(records.len(), 2);
    assert_eq!(recompose(&records, NONE), "<A>x\r\n<end A>");
}

#[test]
fn trailing_carriage_return_stays_in_raw_line() {
    let text = "<A>x\r\nabc\r";
    let records = decompose(text);
    invariants::check(text, &records);

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].raw(), "abc\r");
    assert_eq!(records[1].content(), "abc");
    assert_eq!(recompose(&records, NONE), "<A>x\r\nabc");
}

#[test]
fn non_canonical_lines_are_normalized() {
    let records = decompose("< A >  x  \r\nword   ");
    assert_eq!(recompose(&records, NONE), "<A>x\r\nword");
}
