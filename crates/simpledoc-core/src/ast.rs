//! Abstract Syntax Tree types for SimpleDoc documents.
//!
//! The tree is:
//!
//! - **Owned and acyclic**: every node exclusively owns its children
//! - **Ordered**: children keep document order and are never reordered
//! - **Zero-copy where possible**: values are `Cow<'a, str>` borrowing the source
//!
//! The root is always a single [`NodeKind::Document`] node.

use std::fmt::Write as _;

/// Borrowed or owned string type for zero-copy parsing.
pub type CowStr<'a> = std::borrow::Cow<'a, str>;

/// Construct represented by a [`Node`], with its construct-specific fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// Tree root.
    Document,
    Heading1,
    Heading2,
    Heading3,
    /// Plain text run.
    Text,
    /// Line terminator or blank line.
    LineBreak,
    /// Strong emphasis; content lives in the children.
    Bold,
    /// Emphasis; content lives in the children.
    Italic,
    /// Unordered list item.
    ListItem,
    /// Ordered list item with its source number.
    OrderedListItem { number: u64 },
    /// Fenced code block.
    CodeBlock,
    /// Hyperlink; the node value is the link text.
    Link { url: CowStr<'a> },
    /// Image; the node value is the alt text.
    Image { url: CowStr<'a> },
}

impl NodeKind<'_> {
    /// Stable element name used in errors and dumps.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Heading1 => "Heading1",
            NodeKind::Heading2 => "Heading2",
            NodeKind::Heading3 => "Heading3",
            NodeKind::Text => "Text",
            NodeKind::LineBreak => "LineBreak",
            NodeKind::Bold => "Bold",
            NodeKind::Italic => "Italic",
            NodeKind::ListItem => "ListItem",
            NodeKind::OrderedListItem { .. } => "OrderedListItem",
            NodeKind::CodeBlock => "CodeBlock",
            NodeKind::Link { .. } => "Link",
            NodeKind::Image { .. } => "Image",
        }
    }
}

/// One syntactic construct and its owned subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<'a> {
    pub kind: NodeKind<'a>,
    /// Text payload (heading text, list item text, link text, alt text...).
    pub value: Option<CowStr<'a>>,
    /// Child nodes in document order.
    pub children: Vec<Node<'a>>,
    /// 1-based source line (0 for the document root).
    pub line: u32,
}

impl<'a> Node<'a> {
    /// Create a childless node.
    #[inline]
    pub fn new(kind: NodeKind<'a>, value: Option<CowStr<'a>>, line: u32) -> Self {
        Self {
            kind,
            value,
            children: Vec::new(),
            line,
        }
    }

    /// Create a leaf node carrying `value`.
    #[inline]
    pub fn leaf(kind: NodeKind<'a>, value: impl Into<CowStr<'a>>, line: u32) -> Self {
        Self::new(kind, Some(value.into()), line)
    }

    /// Create a document root with the given top-level children.
    pub fn document(children: Vec<Node<'a>>) -> Self {
        Self {
            kind: NodeKind::Document,
            value: None,
            children,
            line: 0,
        }
    }

    /// Append a child, keeping document order.
    #[inline]
    pub fn push(&mut self, child: Node<'a>) {
        self.children.push(child);
    }

    /// Node value as `&str` (empty when absent).
    #[inline]
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// URL of a link or image node.
    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Link { url } | NodeKind::Image { url } => Some(url.as_ref()),
            _ => None,
        }
    }

    /// Number of an ordered list item.
    pub fn number(&self) -> Option<u64> {
        match self.kind {
            NodeKind::OrderedListItem { number } => Some(number),
            _ => None,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[inline]
    pub fn is_heading(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Heading1 | NodeKind::Heading2 | NodeKind::Heading3
        )
    }

    #[inline]
    pub fn is_line_break(&self) -> bool {
        self.kind == NodeKind::LineBreak
    }

    /// Either kind of list item.
    #[inline]
    pub fn is_list_item(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::ListItem | NodeKind::OrderedListItem { .. }
        )
    }

    /// Block-level constructs: headings, list items and code blocks.
    #[inline]
    pub fn is_block(&self) -> bool {
        self.is_heading() || self.is_list_item() || self.kind == NodeKind::CodeBlock
    }

    /// Constructs that flow inside a paragraph.
    #[inline]
    pub fn is_inline(&self) -> bool {
        !self.is_block() && self.kind != NodeKind::Document
    }

    /// Whether `self` and `other` are list items of the same kind.
    fn same_list_kind(&self, other: &Node<'_>) -> bool {
        matches!(
            (&self.kind, &other.kind),
            (NodeKind::ListItem, NodeKind::ListItem)
                | (
                    NodeKind::OrderedListItem { .. },
                    NodeKind::OrderedListItem { .. }
                )
        )
    }

    /// Render an indented, human-readable tree of this node and its subtree.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{}- {}", indent, self.name());
        if let Some(value) = self.value.as_deref().filter(|v| !v.is_empty()) {
            let _ = write!(out, ": {:?}", value);
        }
        match &self.kind {
            NodeKind::Link { url } | NodeKind::Image { url } => {
                let _ = write!(out, " (url: {})", url);
            }
            NodeKind::OrderedListItem { number } => {
                let _ = write!(out, " (number: {})", number);
            }
            _ => {}
        }
        out.push('\n');
        for child in &self.children {
            child.dump_into(out, depth + 1);
        }
    }
}

/// Index of the next item in the same list run as `siblings[index]`.
///
/// Items of one kind stay in a run when they follow each other directly or
/// are separated by a single line break (the previous line's terminator). A
/// blank line or any other sibling ends the run.
pub fn list_run_successor(siblings: &[Node<'_>], index: usize) -> Option<usize> {
    let current = siblings.get(index)?;
    if !current.is_list_item() {
        return None;
    }

    let next = index + 1;
    match siblings.get(next) {
        Some(node) if current.same_list_kind(node) => Some(next),
        Some(node) if node.is_line_break() => siblings
            .get(next + 1)
            .filter(|after| current.same_list_kind(after))
            .map(|_| next + 1),
        _ => None,
    }
}
