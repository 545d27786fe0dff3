//! Integration tests for the SimpleDoc validator

use rstest::rstest;
use simpledoc_core::{
    parse, tokenize, validate, Level, Node, NodeKind, ValidationError, ValidationErrorKind,
    Validator,
};

fn check(source: &str, level: Level) -> Result<(), ValidationError> {
    let tokens = tokenize(source, level);
    let doc = parse(&tokens, level).unwrap();
    validate(&doc, level)
}

// ============================================================================
// Document Structure
// ============================================================================

#[test]
fn test_empty_source_is_empty_document() {
    let err = check("", Level::Advanced).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::EmptyDocument);
    assert_eq!(err.line, None);
    assert_eq!(err.to_string(), "validation error: empty document");
}

#[test]
fn test_whitespace_only_source_passes() {
    assert!(check("   ", Level::Advanced).is_ok());
    assert!(check("\n\n", Level::Basic).is_ok());
}

#[test]
fn test_blank_heading_fails() {
    let err = check("intro\n#   ", Level::Basic).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::EmptyHeading);
    assert_eq!(err.element, Some("Heading1"));
    assert_eq!(err.line, Some(2));
}

#[test]
fn test_empty_emphasis_in_hand_built_tree() {
    let doc = Node::document(vec![Node::new(NodeKind::Bold, None, 4)]);
    let err = Validator::new(Level::Intermediate).validate(&doc).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::EmptyEmphasis);
    assert_eq!(err.line, Some(4));
}

// ============================================================================
// Ordered List Numbering
// ============================================================================

#[rstest]
#[case(Level::Intermediate)]
#[case(Level::Advanced)]
fn test_sequential_numbering_passes(#[case] level: Level) {
    assert!(check("1. A\n2. B\n3. C\n", level).is_ok());
}

#[rstest]
#[case(Level::Intermediate)]
#[case(Level::Advanced)]
fn test_gap_in_numbering_fails(#[case] level: Level) {
    let err = check("1. A\n3. B\n", level).unwrap_err();
    assert_eq!(
        err.kind,
        ValidationErrorKind::ListNumbering {
            expected: 2,
            found: 3
        }
    );
    assert_eq!(err.line, Some(2));
    assert!(err.to_string().contains("expected 2"));
}

#[test]
fn test_list_may_start_anywhere() {
    assert!(check("5. five\n6. six", Level::Intermediate).is_ok());
}

#[test]
fn test_blank_line_starts_a_new_list() {
    assert!(check("1. A\n2. B\n\n1. C\n2. D", Level::Intermediate).is_ok());
}

#[test]
fn test_numbering_has_no_successor_for_largest_number() {
    let source = "18446744073709551615. a\n18446744073709551615. b";
    let err = check(source, Level::Intermediate).unwrap_err();
    assert_eq!(
        err.kind,
        ValidationErrorKind::NumberingOverflow { previous: u64::MAX }
    );
    assert_eq!(err.line, Some(2));
    assert!(err.to_string().contains("incorrect numbering"));
}

#[test]
fn test_numbering_up_to_largest_number_passes() {
    assert!(check("18446744073709551614. a\n18446744073709551615. b", Level::Intermediate).is_ok());
}

#[test]
fn test_numbering_is_not_checked_at_basic_level() {
    assert!(check("1. A\n3. B\n", Level::Basic).is_ok());
}

// ============================================================================
// Links and Images
// ============================================================================

#[rstest]
#[case("[x](https://ok.com)")]
#[case("[x](http://ok.com)")]
#[case("[x](mailto:a@b.c)")]
#[case("[x](tel:+100)")]
#[case("[x](/relative)")]
#[case("![x](/pic.png)")]
#[case("![x](https://cdn.example/pic.png)")]
fn test_allowed_targets(#[case] source: &str) {
    assert!(check(source, Level::Advanced).is_ok());
}

#[rstest]
#[case("[x](ftp://bad)", "Link")]
#[case("[x](javascript:alert(1))", "Link")]
#[case("![x](mailto:a@b.c)", "Image")]
#[case("![x](pic.png)", "Image")]
fn test_rejected_targets(#[case] source: &str, #[case] element: &str) {
    let err = check(source, Level::Advanced).unwrap_err();
    assert!(matches!(err.kind, ValidationErrorKind::MalformedUrl { .. }));
    assert_eq!(err.element, Some(element));
}

#[test]
fn test_links_are_plain_text_below_advanced_level() {
    assert!(check("[x](ftp://bad)", Level::Intermediate).is_ok());
}

#[test]
fn test_missing_url_in_hand_built_tree() {
    let doc = Node::document(vec![Node::leaf(NodeKind::Link { url: "".into() }, "x", 1)]);
    let err = validate(&doc, Level::Advanced).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::MissingUrl);
}

#[test]
fn test_links_nested_in_emphasis_are_checked() {
    let err = check("**[x](ftp://bad)**", Level::Advanced);
    // bold content is not rescanned
    assert!(err.is_ok());

    let mut bold = Node::new(NodeKind::Bold, None, 1);
    bold.push(Node::leaf(
        NodeKind::Link {
            url: "ftp://bad".into(),
        },
        "x",
        1,
    ));
    let err = validate(&Node::document(vec![bold]), Level::Advanced).unwrap_err();
    assert!(matches!(err.kind, ValidationErrorKind::MalformedUrl { .. }));
}
