//! Property tests over arbitrary input

use proptest::prelude::*;
use simpledoc_core::{escape, tokenize, Compiler, Level, TokenKind};

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Basic),
        Just(Level::Intermediate),
        Just(Level::Advanced),
    ]
}

/// Lines built from the characters that drive the grammar.
fn markup() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("# ".to_string()),
            Just("- ".to_string()),
            Just("1. ".to_string()),
            Just("*".to_string()),
            Just("**".to_string()),
            Just("```".to_string()),
            Just("[a](/b)".to_string()),
            Just("![c](https://d)".to_string()),
            Just("\n".to_string()),
            Just(" ".to_string()),
            "[a-z<>&\"']{1,6}",
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

/// A basic-level block: a heading (`Some(depth)`) or a paragraph of lines.
#[derive(Debug, Clone)]
enum Block {
    Heading(usize, String),
    Paragraph(Vec<String>),
}

fn basic_block() -> impl Strategy<Value = Block> {
    prop_oneof![
        (1usize..=3, "[a-z]{1,8}").prop_map(|(depth, text)| Block::Heading(depth, text)),
        prop::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,3}", 1..4).prop_map(Block::Paragraph),
    ]
}

fn render_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|block| match block {
            Block::Heading(depth, text) => format!("{} {}", "#".repeat(*depth), text),
            Block::Paragraph(lines) => lines.join("\n"),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

proptest! {
    #[test]
    fn lexer_ends_with_exactly_one_end_of_input(source in "\\PC*", level in any_level()) {
        let tokens = tokenize(&source, level);
        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::EndOfInput).count();
        prop_assert_eq!(eofs, 1);
        prop_assert!(tokens.last().is_some_and(|t| t.is_eof()));
    }

    #[test]
    fn columns_never_decrease_within_a_line(source in markup(), level in any_level()) {
        let tokens = tokenize(&source, level);
        for pair in tokens.windows(2) {
            if pair[1].is_eof() {
                continue;
            }
            prop_assert!(pair[0].line <= pair[1].line);
            if pair[0].line == pair[1].line {
                prop_assert!(pair[0].column <= pair[1].column);
            }
        }
    }

    #[test]
    fn escaping_never_leaks_markup(text in "\\PC*") {
        let escaped = escape(&text);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('\''));
        let restored = escaped
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#x27;", "'")
            .replace("&amp;", "&");
        prop_assert_eq!(restored, text);
    }

    #[test]
    fn basic_level_never_emits_rich_markup(source in markup()) {
        if let Ok(html) = Compiler::new(Level::Basic).compile(&source) {
            for tag in ["<strong>", "<em>", "<ul>", "<ol>", "<pre>", "<a ", "<img"] {
                prop_assert!(!html.contains(tag));
            }
        }
    }

    #[test]
    fn compile_never_panics(source in markup(), level in any_level()) {
        let _ = Compiler::new(level).compile(&source);
    }

    #[test]
    fn basic_level_emits_one_element_per_block(
        blocks in prop::collection::vec(basic_block(), 1..12)
    ) {
        let html = Compiler::new(Level::Basic).compile(&render_blocks(&blocks)).unwrap();

        for depth in 1..=3 {
            let expected = blocks
                .iter()
                .filter(|b| matches!(b, Block::Heading(d, _) if *d == depth))
                .count();
            prop_assert_eq!(html.matches(&format!("<h{}>", depth)).count(), expected);
        }
        let paragraphs = blocks.iter().filter(|b| matches!(b, Block::Paragraph(_))).count();
        prop_assert_eq!(html.matches("<p>").count(), paragraphs);
    }
}
