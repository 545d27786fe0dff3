//! Token vocabulary produced by the lexer.
//!
//! Tokens are created once, in document order, and consumed once by the
//! parser. Text borrows from the source whenever the scanned piece is a
//! plain slice of it.

use std::fmt;

use crate::ast::CowStr;

/// Classification of a lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `# text`
    Heading1,
    /// `## text`
    Heading2,
    /// `### text`
    Heading3,
    /// Opening `**`.
    BoldOpen,
    /// Closing `**`.
    BoldClose,
    /// Opening `*`.
    ItalicOpen,
    /// Closing `*`.
    ItalicClose,
    /// `- text`
    ListItem,
    /// `N. text`, carrying `N`.
    OrderedListItem(u64),
    /// ```` ```code``` ````
    CodeBlock,
    /// `[text](url)`, packed as `text|url`.
    Link,
    /// `![alt](url)`, packed as `alt|url`.
    Image,
    /// Run of plain characters.
    Text,
    /// End of a source line, or a blank line.
    LineBreak,
    /// Always the final token.
    EndOfInput,
}

impl TokenKind {
    /// Stable name used in dumps and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Heading1 => "Heading1",
            TokenKind::Heading2 => "Heading2",
            TokenKind::Heading3 => "Heading3",
            TokenKind::BoldOpen => "BoldOpen",
            TokenKind::BoldClose => "BoldClose",
            TokenKind::ItalicOpen => "ItalicOpen",
            TokenKind::ItalicClose => "ItalicClose",
            TokenKind::ListItem => "ListItem",
            TokenKind::OrderedListItem(_) => "OrderedListItem",
            TokenKind::CodeBlock => "CodeBlock",
            TokenKind::Link => "Link",
            TokenKind::Image => "Image",
            TokenKind::Text => "Text",
            TokenKind::LineBreak => "LineBreak",
            TokenKind::EndOfInput => "EndOfInput",
        }
    }
}

/// A classified lexical unit with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Literal value (delimiter, content or packed `text|url`).
    pub text: CowStr<'a>,
    /// 1-based source line.
    pub line: u32,
    /// 1-based column, counted in characters consumed on the line.
    pub column: u32,
}

impl<'a> Token<'a> {
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<CowStr<'a>>, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::OrderedListItem(n) => write!(f, "OrderedListItem({})", n)?,
            kind => f.write_str(kind.name())?,
        }
        write!(
            f,
            " {:?} @{}:{}",
            self.text.as_ref(),
            self.line,
            self.column
        )
    }
}
