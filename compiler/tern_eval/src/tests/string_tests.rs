use super::{output_of, run_script};
use crate::ErrorCategory;
use pretty_assertions::assert_eq;

fn message_of(source: &str) -> Option<String> {
    run_script(source).error.map(|e| e.message())
}

#[test]
fn indexing_counts_characters() {
    let out = output_of(
        r#"
var s = "héllo world";
print(s[0]);
print(s[1]);
print(s[-1]);
print(s[0..5]);
print(s[6..-1]);
print(s[3..3].len());
"#,
    );
    assert_eq!(out, "h\né\nd\nhéllo\nworl\n0\n");
}

#[test]
fn string_index_errors() {
    let run = run_script("var s = \"abc\";\nprint(s[3]);");
    assert_eq!(
        run.error_text().as_deref(),
        Some("IndexError: String index out of bounds.\n[line 2] in script")
    );
    assert_eq!(
        message_of("print(\"abc\"[2..1]);").as_deref(),
        Some("String index out of bounds.")
    );
    assert_eq!(
        message_of("print(\"abc\"[nil]);").as_deref(),
        Some("Expected an integer but found 'nil'.")
    );
}

#[test]
fn find_searches_from_a_start_position() {
    let out = output_of(
        r#"
var s = "héllo world";
print(s.find("o", 0));
print(s.find("o", 5));
print(s.find("o", 8));
print(s.find("llo", -9));
print(s.find("d", 11));
"#,
    );
    assert_eq!(out, "4\n7\nnil\n2\nnil\n");
    assert_eq!(
        message_of("\"abc\".find(\"\", 0);").as_deref(),
        Some("Cannot find an empty string.")
    );
    assert_eq!(
        run_script("\"abc\".find(\"a\", 4);").error.map(|e| e.category()),
        Some(ErrorCategory::IndexError)
    );
}

#[test]
fn split_returns_a_growable_vec() {
    let out = output_of(
        r#"
var parts = "a,b,,c".split(",");
print(parts);
parts.push("d");
print(parts.len());
print("abc".split("x"));
"#,
    );
    assert_eq!(out, "[a, b, , c]\n5\n[abc]\n");
    assert_eq!(
        message_of("\"a,b\".split(\"\");").as_deref(),
        Some("Cannot split on an empty string.")
    );
}

#[test]
fn replace_substitutes_every_occurrence() {
    let out = output_of(
        r#"
print("banana".replace("an", "AN"));
print("banana".replace("x", "y"));
"#,
    );
    assert_eq!(out, "bANANa\nbanana\n");
    assert_eq!(
        message_of("\"abc\".replace(\"\", \"x\");").as_deref(),
        Some("Cannot replace an empty string.")
    );
}

#[test]
fn prefix_and_suffix_checks() {
    let out = output_of(
        r#"
var s = "tern.tn";
print(s.starts_with("tern"));
print(s.starts_with("tn"));
print(s.ends_with(".tn"));
print(s.ends_with(""));
"#,
    );
    assert_eq!(out, "true\nfalse\ntrue\ntrue\n");
    let run = run_script("\"abc\".starts_with(1);");
    assert_eq!(run.error.as_ref().map(|e| e.category()), Some(ErrorCategory::TypeError));
    assert_eq!(
        run.error.map(|e| e.message()).as_deref(),
        Some("Expected a string but found '1'.")
    );
}

#[test]
fn as_num_parses_numbers() {
    let out = output_of(
        r#"
print("2.5".as_num() + 1);
print("-3".as_num());
"#,
    );
    assert_eq!(out, "3.5\n-3\n");
    let run = run_script("\"12abc\".as_num();");
    assert_eq!(run.error.as_ref().map(|e| e.category()), Some(ErrorCategory::ValueError));
    assert_eq!(
        run.error.map(|e| e.message()).as_deref(),
        Some("Unable to parse number from '12abc'.")
    );
}

#[test]
fn string_methods_check_arity() {
    assert_eq!(
        message_of("\"abc\".find(\"a\");").as_deref(),
        Some("Expected 2 arguments but found 1.")
    );
}
