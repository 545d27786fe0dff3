//! Recursive-descent parser from tokens to a document tree.
//!
//! A single cursor walks the token stream once. Leaf constructs map to leaf
//! nodes; bold and italic spans recurse until their closer. Unknown or
//! disabled tokens are skipped, but an opener that never closes is a hard
//! error.

use std::borrow::Cow;

use crate::ast::{CowStr, Node, NodeKind};
use crate::error::ParseError;
use crate::level::{Features, Level};
use crate::token::{Token, TokenKind};

/// Deepest emphasis nesting accepted before giving up.
pub const MAX_NESTING: usize = 128;

/// Parse `tokens` with the grammar features of `level`.
#[inline]
pub fn parse<'a>(tokens: &[Token<'a>], level: Level) -> Result<Node<'a>, ParseError> {
    Parser::new(level).parse(tokens)
}

/// Level-gated SimpleDoc parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
    features: Features,
}

impl Parser {
    /// Create a parser for the given level.
    #[inline]
    pub fn new(level: Level) -> Self {
        Self::with_features(level.features())
    }

    /// Create a parser for an explicit feature set.
    #[inline]
    pub fn with_features(features: Features) -> Self {
        Self { features }
    }

    /// Build the document tree, consuming every token up to `EndOfInput`.
    pub fn parse<'a>(&self, tokens: &[Token<'a>]) -> Result<Node<'a>, ParseError> {
        let mut cursor = Cursor {
            features: self.features,
            tokens,
            pos: 0,
            depth: 0,
        };

        let mut document = Node::document(Vec::with_capacity(tokens.len() / 2));
        while !cursor.at_end() {
            if let Some(node) = cursor.parse_element()? {
                document.push(node);
            }
        }
        Ok(document)
    }
}

/// Emphasis span shapes.
#[derive(Debug, Clone, Copy)]
enum Emphasis {
    Bold,
    Italic,
}

impl Emphasis {
    fn close(self) -> TokenKind {
        match self {
            Emphasis::Bold => TokenKind::BoldClose,
            Emphasis::Italic => TokenKind::ItalicClose,
        }
    }

    fn node(self) -> NodeKind<'static> {
        match self {
            Emphasis::Bold => NodeKind::Bold,
            Emphasis::Italic => NodeKind::Italic,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Emphasis::Bold => "bold",
            Emphasis::Italic => "italic",
        }
    }
}

struct Cursor<'t, 'a> {
    features: Features,
    tokens: &'t [Token<'a>],
    pos: usize,
    depth: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    #[inline]
    fn current(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos).filter(|t| !t.is_eof())
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.current().is_none()
    }

    #[inline]
    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Parse one element at the cursor. `Ok(None)` means the token was
    /// skipped without producing a node.
    fn parse_element(&mut self) -> Result<Option<Node<'a>>, ParseError> {
        let Some(token) = self.current() else {
            return Ok(None);
        };
        let features = self.features;

        let node = match token.kind {
            TokenKind::LineBreak => Some(leaf(NodeKind::LineBreak, token)),
            TokenKind::Heading1 if features.headings => Some(leaf(NodeKind::Heading1, token)),
            TokenKind::Heading2 if features.headings => Some(leaf(NodeKind::Heading2, token)),
            TokenKind::Heading3 if features.headings => Some(leaf(NodeKind::Heading3, token)),
            TokenKind::Text => Some(leaf(NodeKind::Text, token)),
            TokenKind::BoldOpen if features.emphasis => {
                return self.parse_span(Emphasis::Bold).map(Some)
            }
            TokenKind::ItalicOpen if features.emphasis => {
                return self.parse_span(Emphasis::Italic).map(Some)
            }
            TokenKind::ListItem if features.lists => Some(leaf(NodeKind::ListItem, token)),
            TokenKind::OrderedListItem(number) if features.lists => {
                Some(ordered_item(token, number))
            }
            TokenKind::CodeBlock if features.code_blocks => Some(leaf(NodeKind::CodeBlock, token)),
            TokenKind::Link if features.links => {
                let (text, url) = split_target(&token.text);
                Some(Node::leaf(NodeKind::Link { url }, text, token.line))
            }
            TokenKind::Image if features.images => {
                let (alt, url) = split_target(&token.text);
                Some(Node::leaf(NodeKind::Image { url }, alt, token.line))
            }
            _ => None,
        };

        self.advance();
        Ok(node)
    }

    /// Parse a bold or italic span whose opener is under the cursor.
    fn parse_span(&mut self, span: Emphasis) -> Result<Node<'a>, ParseError> {
        let tokens = self.tokens;
        let open = &tokens[self.pos];
        if self.depth >= MAX_NESTING {
            return Err(ParseError::nesting_too_deep(&open.text, open.line, MAX_NESTING));
        }
        self.advance();

        let mut node = Node::new(span.node(), None, open.line);
        self.depth += 1;
        loop {
            match self.current() {
                Some(token) if token.kind == span.close() => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    if let Some(child) = self.parse_element()? {
                        node.push(child);
                    }
                }
                None => return Err(ParseError::unterminated(span.name(), &open.text, open.line)),
            }
        }
        self.depth -= 1;

        Ok(node)
    }
}

#[inline]
fn leaf<'a>(kind: NodeKind<'a>, token: &Token<'a>) -> Node<'a> {
    Node::leaf(kind, token.text.clone(), token.line)
}

/// Split `"N. content"` into its number and content.
///
/// Falls back to the number carried by the token kind, and the whole text,
/// if the text does not have the expected shape.
fn ordered_item<'a>(token: &Token<'a>, number: u64) -> Node<'a> {
    let split = token.text.split_once(". ").and_then(|(digits, _)| {
        digits
            .parse::<u64>()
            .ok()
            .map(|n| (n, digits.len() + 2))
    });
    let (number, content) = match split {
        Some((parsed, offset)) => (parsed, sub(&token.text, offset, token.text.len())),
        None => (number, token.text.clone()),
    };
    Node::leaf(NodeKind::OrderedListItem { number }, content, token.line)
}

/// Split a packed `text|url` value on its first separator.
fn split_target<'a>(packed: &CowStr<'a>) -> (CowStr<'a>, CowStr<'a>) {
    match packed.find('|') {
        Some(at) => (sub(packed, 0, at), sub(packed, at + 1, packed.len())),
        None => (packed.clone(), Cow::Borrowed("")),
    }
}

/// Sub-slice of a `Cow`, staying borrowed when the source is borrowed.
fn sub<'a>(text: &CowStr<'a>, start: usize, end: usize) -> CowStr<'a> {
    match text {
        Cow::Borrowed(s) => {
            let s: &'a str = *s;
            Cow::Borrowed(&s[start..end])
        }
        Cow::Owned(s) => Cow::Owned(s[start..end].to_string()),
    }
}
