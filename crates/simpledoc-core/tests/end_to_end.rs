//! End-to-end tests running the full compile pipeline

use rstest::rstest;
use simpledoc_core::{Compiler, Error, Level, ParseErrorKind, ValidationErrorKind};

const SAMPLE: &str = "# Title\n\nA paragraph with **bold** and *italic*.\n\n- one\n- two\n";

fn position(html: &str, needle: &str) -> usize {
    html.find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in {html}"))
}

#[test]
fn test_sample_document_at_advanced_level() {
    let html = Compiler::new(Level::Advanced).compile(SAMPLE).unwrap();

    let heading = position(&html, "<h1>Title</h1>");
    let paragraph = position(
        &html,
        "<p>A paragraph with <strong>bold</strong> and <em>italic</em>.</p>",
    );
    let list = position(&html, "<ul>\n<li>one</li>\n<li>two</li>\n</ul>");
    assert!(heading < paragraph && paragraph < list);
    assert_eq!(html.matches("<ul>").count(), 1);
    assert_eq!(html.matches("<li>").count(), 2);
}

#[test]
fn test_sample_document_at_basic_level() {
    let html = Compiler::new(Level::Basic).compile(SAMPLE).unwrap();
    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("<p>A paragraph with **bold** and *italic*.</p>"));
    assert!(html.contains("<p>- one\n- two</p>"));
    for tag in ["<strong>", "<em>", "<ul>", "<ol>", "<pre>", "<a ", "<img"] {
        assert!(!html.contains(tag), "unexpected {tag}");
    }
}

#[rstest]
#[case(Level::Basic, "<p>**bold**</p>")]
#[case(Level::Intermediate, "<p><strong>bold</strong></p>")]
#[case(Level::Advanced, "<p><strong>bold</strong></p>")]
fn test_bold_gating(#[case] level: Level, #[case] expected: &str) {
    let html = Compiler::new(level).compile("**bold**").unwrap();
    assert!(html.contains(expected), "{html}");
}

#[test]
fn test_unterminated_emphasis_fails_in_parse_stage() {
    let err = Compiler::new(Level::Intermediate)
        .compile("**unterminated")
        .unwrap_err();
    match &err {
        Error::Parse(e) => {
            assert_eq!(e.kind, ParseErrorKind::UnterminatedSpan);
            assert_eq!(e.line, 1);
            assert_eq!(e.token, "**");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.stage(), "parse");
    assert_eq!(err.line(), Some(1));
}

#[test]
fn test_numbering_failure_is_reported() {
    let err = Compiler::new(Level::Advanced)
        .compile("1. A\n3. B\n")
        .unwrap_err();
    match err {
        Error::Validation(e) => assert_eq!(
            e.kind,
            ValidationErrorKind::ListNumbering {
                expected: 2,
                found: 3
            }
        ),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_link_scheme_validation() {
    let compiler = Compiler::new(Level::Advanced);
    assert!(compiler.compile("[x](ftp://bad)").is_err());
    let html = compiler.compile("[x](https://ok.com)").unwrap();
    assert!(html.contains("<a href=\"https://ok.com\">x</a>"));
}

#[test]
fn test_title_and_level_configuration() {
    let compiler = Compiler::from_level(9).with_title("Guide");
    assert_eq!(compiler.level(), Level::Advanced);
    assert_eq!(compiler.title(), "Guide");
    let html = compiler.compile("text").unwrap();
    assert!(html.contains("<title>Guide</title>"));
}

#[test]
fn test_compiler_is_reusable_across_threads() {
    let compiler = std::sync::Arc::new(Compiler::new(Level::Advanced));
    let handles: Vec<_> = (1..=4)
        .map(|n| {
            let compiler = std::sync::Arc::clone(&compiler);
            std::thread::spawn(move || compiler.compile(&format!("## Part {n}")).unwrap())
        })
        .collect();
    for (n, handle) in (1..=4).zip(handles) {
        let html = handle.join().unwrap();
        assert!(html.contains(&format!("<h2>Part {n}</h2>")));
    }
}
