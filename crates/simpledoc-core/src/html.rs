//! HTML code generation from a validated document tree.
//!
//! Top-level children are grouped into blocks while scanning left to right:
//! headings and code blocks stand alone, runs of list items share one
//! `<ul>`/`<ol>`, and everything else accumulates into paragraphs that end at
//! a block or a blank line. Every piece of user text is escaped exactly once.

use crate::ast::{list_run_successor, Node, NodeKind};

/// Title used when none is configured.
pub const DEFAULT_TITLE: &str = "SimpleDoc Document";

/// Generate a complete HTML document with the default title.
#[inline]
pub fn generate(document: &Node<'_>) -> String {
    HtmlGenerator::new().generate(document)
}

/// Escape `& < > " '` for use in element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    escape_into(&mut out, text);
    out
}

fn escape_into(out: &mut String, text: &str) {
    let mut last = 0;
    for (i, b) in text.bytes().enumerate() {
        let replacement = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#x27;",
            _ => continue,
        };
        out.push_str(&text[last..i]);
        out.push_str(replacement);
        last = i + 1;
    }
    out.push_str(&text[last..]);
}

/// HTML generator with a configurable document title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlGenerator {
    title: String,
}

impl Default for HtmlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlGenerator {
    pub fn new() -> Self {
        Self::with_title(DEFAULT_TITLE)
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Render `document` wrapped in a fixed doctype/head/body skeleton.
    pub fn generate(&self, document: &Node<'_>) -> String {
        let mut out = String::with_capacity(256);
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>");
        escape_into(&mut out, &self.title);
        out.push_str("</title>\n</head>\n<body>\n");
        self.body_into(&mut out, &document.children);
        out.push_str("</body>\n</html>");
        out
    }

    /// Render only the body content for a list of top-level nodes.
    pub fn body(&self, children: &[Node<'_>]) -> String {
        let mut out = String::new();
        self.body_into(&mut out, children);
        out
    }

    fn body_into(&self, out: &mut String, children: &[Node<'_>]) {
        let mut i = 0;
        while i < children.len() {
            let child = &children[i];

            if child.is_list_item() {
                i = list_into(out, children, i);
            } else if child.is_block() {
                render_into(out, child);
                i += 1;
            } else {
                i = paragraph_into(out, children, i);
            }
        }
    }
}

/// Emit the list run starting at `start`; returns the index after it.
fn list_into(out: &mut String, children: &[Node<'_>], start: usize) -> usize {
    let tag = match children[start].kind {
        NodeKind::OrderedListItem { .. } => "ol",
        _ => "ul",
    };
    out.push('<');
    out.push_str(tag);
    out.push_str(">\n");

    let mut index = start;
    loop {
        render_into(out, &children[index]);
        match list_run_successor(children, index) {
            Some(next) => index = next,
            None => break,
        }
    }

    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
    index + 1
}

/// Accumulate inline nodes from `start` into one paragraph.
///
/// The paragraph ends before a block node, or at a blank line (two line
/// breaks in a row), which is consumed. Returns the index after the run.
fn paragraph_into(out: &mut String, children: &[Node<'_>], start: usize) -> usize {
    let mut content = String::new();
    let mut i = start;

    while let Some(node) = children.get(i) {
        if node.is_block() {
            break;
        }
        if node.is_line_break() && children.get(i + 1).is_some_and(Node::is_line_break) {
            i += 2;
            break;
        }
        render_into(&mut content, node);
        i += 1;
    }

    let trimmed = content.trim();
    if !trimmed.is_empty() {
        out.push_str("<p>");
        out.push_str(trimmed);
        out.push_str("</p>\n");
    }
    i
}

fn wrap(out: &mut String, open: &str, text: &str, close: &str) {
    out.push_str(open);
    escape_into(out, text);
    out.push_str(close);
}

fn children_into(out: &mut String, node: &Node<'_>) {
    for child in &node.children {
        render_into(out, child);
    }
}

/// Render a single node (and its subtree) without any block grouping.
fn render_into(out: &mut String, node: &Node<'_>) {
    match &node.kind {
        NodeKind::Document => children_into(out, node),
        NodeKind::Heading1 => wrap(out, "<h1>", node.text(), "</h1>\n"),
        NodeKind::Heading2 => wrap(out, "<h2>", node.text(), "</h2>\n"),
        NodeKind::Heading3 => wrap(out, "<h3>", node.text(), "</h3>\n"),
        NodeKind::CodeBlock => wrap(out, "<pre><code>", node.text(), "</code></pre>\n"),
        NodeKind::Text => escape_into(out, node.text()),
        NodeKind::LineBreak => out.push('\n'),
        NodeKind::Bold => {
            out.push_str("<strong>");
            children_into(out, node);
            out.push_str("</strong>");
        }
        NodeKind::Italic => {
            out.push_str("<em>");
            children_into(out, node);
            out.push_str("</em>");
        }
        NodeKind::ListItem => wrap(out, "<li>", node.text(), "</li>\n"),
        NodeKind::OrderedListItem { number } => {
            out.push_str("<li value=\"");
            out.push_str(&number.to_string());
            out.push_str("\">");
            escape_into(out, node.text());
            out.push_str("</li>\n");
        }
        NodeKind::Link { url } => {
            out.push_str("<a href=\"");
            escape_into(out, url);
            out.push_str("\">");
            escape_into(out, node.text());
            out.push_str("</a>");
        }
        NodeKind::Image { url } => {
            out.push_str("<img src=\"");
            escape_into(out, url);
            out.push_str("\" alt=\"");
            escape_into(out, node.text());
            out.push_str("\">");
        }
    }
}
