//! Line-based lexer with SIMD-accelerated scanning.
//!
//! Every physical line is classified on its own. Line-anchored constructs
//! (headings, list items) are tried first; anything else is scanned left to
//! right for inline constructs, and whatever they leave over becomes text.
//!
//! The lexer never fails. Syntax it cannot complete degrades to `Text`.
//!
//! # Performance
//!
//! - Zero-copy: token text borrows from the input except packed link values
//! - `memchr` for newline and delimiter scanning
//! - Each inline pattern remembers its next match, so a line is scanned once

use std::iter::Peekable;

use memchr::memchr;

use crate::ast::CowStr;
use crate::level::{Features, Level};
use crate::token::{Token, TokenKind};

/// Tokenize `source` with the grammar features of `level`.
#[inline]
pub fn tokenize(source: &str, level: Level) -> Vec<Token<'_>> {
    Lexer::new(level).tokenize(source)
}

/// A single physical line of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text, without its newline (or trailing `\r`).
    pub text: &'a str,
    /// 1-based line number.
    pub number: u32,
}

impl<'a> Line<'a> {
    /// Check if this line contains only whitespace.
    #[inline(always)]
    pub fn is_blank(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// Iterator over the lines of an input, with `str::split('\n')` semantics:
/// a trailing newline yields a final empty line.
pub struct Lines<'a> {
    input: &'a str,
    bytes: &'a [u8],
    offset: usize,
    number: u32,
    finished: bool,
}

impl<'a> Lines<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            number: 0,
            finished: false,
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        if self.finished {
            return None;
        }

        let start = self.offset;
        let end = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => {
                self.offset = start + pos + 1;
                start + pos
            }
            None => {
                self.finished = true;
                self.bytes.len()
            }
        };

        // Handle CRLF: drop a CR right before the newline
        let text_end = if end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        self.number += 1;
        Some(Line {
            text: &self.input[start..text_end],
            number: self.number,
        })
    }
}

/// Level-gated tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexer {
    features: Features,
}

impl Lexer {
    /// Create a lexer for the given level.
    #[inline]
    pub fn new(level: Level) -> Self {
        Self::with_features(level.features())
    }

    /// Create a lexer for an explicit feature set.
    #[inline]
    pub fn with_features(features: Features) -> Self {
        Self { features }
    }

    #[inline]
    pub fn features(&self) -> Features {
        self.features
    }

    /// Convert `source` into tokens terminated by exactly one `EndOfInput`.
    pub fn tokenize<'a>(&self, source: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::with_capacity(source.len() / 8 + 2);

        if source.is_empty() {
            tokens.push(Token::new(TokenKind::EndOfInput, "", 1, 1));
            return tokens;
        }

        let mut lines: Peekable<Lines<'a>> = Lines::new(source).peekable();
        let mut last = (1, 1);

        while let Some(line) = lines.next() {
            if line.is_blank() {
                tokens.push(Token::new(TokenKind::LineBreak, "\n", line.number, 1));
                last = (line.number, 1);
                continue;
            }

            let mut scanner = LineScanner {
                features: self.features,
                tokens: &mut tokens,
                line: line.number,
                column: 1,
            };
            if !scanner.scan_anchored(line.text) {
                scanner.scan_inline(line.text);
            }
            let column = scanner.column;

            if lines.peek().is_some() {
                tokens.push(Token::new(TokenKind::LineBreak, "\n", line.number, column));
            }
            last = (line.number, column);
        }

        tokens.push(Token::new(TokenKind::EndOfInput, "", last.0, last.1));
        tokens
    }
}

/// Inline constructs, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl Pattern {
    const ALL: [Pattern; 5] = [
        Pattern::Bold,
        Pattern::Italic,
        Pattern::Code,
        Pattern::Link,
        Pattern::Image,
    ];

    fn enabled(self, features: Features) -> bool {
        match self {
            Pattern::Bold | Pattern::Italic => features.emphasis,
            Pattern::Code => features.code_blocks,
            Pattern::Link => features.links,
            Pattern::Image => features.images,
        }
    }

    /// Earliest occurrence of this pattern starting at or after `from`.
    fn find(self, bytes: &[u8], from: usize) -> Option<Match> {
        match self {
            Pattern::Bold => find_bold(bytes, from),
            Pattern::Italic => find_italic(bytes, from),
            Pattern::Code => find_code(bytes, from),
            Pattern::Link => find_link(bytes, from),
            Pattern::Image => find_image(bytes, from),
        }
    }
}

/// A complete inline construct: byte range plus captured groups.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Match {
    pattern: Pattern,
    start: usize,
    end: usize,
    first: (usize, usize),
    second: (usize, usize),
}

/// Cached search state for one pattern on the current line.
#[derive(Debug, Clone)]
enum Slot {
    Unsearched,
    Found(Match),
    /// No occurrence remains on the rest of the line.
    Exhausted,
}

struct LineScanner<'t, 'a> {
    features: Features,
    tokens: &'t mut Vec<Token<'a>>,
    line: u32,
    column: u32,
}

impl<'t, 'a> LineScanner<'t, 'a> {
    #[inline]
    fn emit(&mut self, kind: TokenKind, text: impl Into<CowStr<'a>>, width: u32) {
        self.tokens.push(Token::new(kind, text, self.line, self.column));
        self.column += width;
    }

    #[inline]
    fn emit_text(&mut self, text: &'a str) {
        if !text.is_empty() {
            self.emit(TokenKind::Text, text, width(text));
        }
    }

    /// Try the whole-line constructs. Returns `true` if one matched.
    fn scan_anchored(&mut self, text: &'a str) -> bool {
        let full = width(text);

        if self.features.headings {
            let heading = [
                ("# ", TokenKind::Heading1),
                ("## ", TokenKind::Heading2),
                ("### ", TokenKind::Heading3),
            ]
            .into_iter()
            .find_map(|(prefix, kind)| {
                text.strip_prefix(prefix)
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| (kind, rest))
            });

            if let Some((kind, content)) = heading {
                self.emit(kind, content, full);
                return true;
            }
        }

        if self.features.lists {
            if let Some(content) = text.strip_prefix("- ").filter(|rest| !rest.is_empty()) {
                self.emit(TokenKind::ListItem, content, full);
                return true;
            }

            if let Some(number) = ordered_item_number(text) {
                self.emit(TokenKind::OrderedListItem(number), text, full);
                return true;
            }
        }

        false
    }

    /// Scan a line for inline constructs, emitting text for the gaps.
    fn scan_inline(&mut self, text: &'a str) {
        let bytes = text.as_bytes();
        let patterns: Vec<Pattern> = Pattern::ALL
            .into_iter()
            .filter(|p| p.enabled(self.features))
            .collect();
        let mut cache = vec![Slot::Unsearched; patterns.len()];
        let mut pos = 0;

        while pos < bytes.len() {
            for (slot, pattern) in cache.iter_mut().zip(&patterns) {
                let stale = match slot {
                    Slot::Found(m) => m.start < pos,
                    Slot::Unsearched => true,
                    Slot::Exhausted => false,
                };
                if stale {
                    *slot = pattern
                        .find(bytes, pos)
                        .map_or(Slot::Exhausted, Slot::Found);
                }
            }

            // Earliest start wins; ties go to the earlier pattern.
            let mut best: Option<&Match> = None;
            for slot in &cache {
                if let Slot::Found(m) = slot {
                    if best.map_or(true, |b| m.start < b.start) {
                        best = Some(m);
                    }
                }
            }

            match best.cloned() {
                Some(m) => {
                    self.emit_text(&text[pos..m.start]);
                    self.emit_match(text, &m);
                    pos = m.end;
                }
                None => {
                    match self.dangling_opener(bytes, pos) {
                        Some((at, kind, len)) => {
                            self.emit_text(&text[pos..at]);
                            self.emit(kind, &text[at..at + len], len as u32);
                            pos = at + len;
                        }
                        None => {
                            self.emit_text(&text[pos..]);
                            pos = bytes.len();
                        }
                    }
                }
            }
        }
    }

    fn emit_match(&mut self, text: &'a str, m: &Match) {
        let first = &text[m.first.0..m.first.1];
        let second = &text[m.second.0..m.second.1];
        let whole = width(&text[m.start..m.end]);

        match m.pattern {
            Pattern::Bold => {
                self.emit(TokenKind::BoldOpen, "**", 2);
                self.emit_text(first);
                self.emit(TokenKind::BoldClose, "**", 2);
            }
            Pattern::Italic => {
                self.emit(TokenKind::ItalicOpen, "*", 1);
                self.emit_text(first);
                self.emit(TokenKind::ItalicClose, "*", 1);
            }
            Pattern::Code => self.emit(TokenKind::CodeBlock, first, whole),
            Pattern::Link => self.emit(TokenKind::Link, format!("{}|{}", first, second), whole),
            Pattern::Image => self.emit(TokenKind::Image, format!("{}|{}", first, second), whole),
        }
    }

    /// First `**`/`*` at or after `from` that opens a word but is never
    /// closed on this line.
    ///
    /// Only called once no complete inline construct remains, so any such
    /// delimiter is unbalanced. It must sit at the start of the line or after
    /// whitespace and be followed by a character that is neither whitespace
    /// nor `*`.
    fn dangling_opener(&self, bytes: &[u8], from: usize) -> Option<(usize, TokenKind, usize)> {
        if !self.features.emphasis {
            return None;
        }

        let mut i = from;
        while let Some(at) = find_byte(bytes, b'*', i) {
            let opens_word = at == 0 || bytes[at - 1].is_ascii_whitespace();
            let (kind, len) = if bytes.get(at + 1) == Some(&b'*') {
                (TokenKind::BoldOpen, 2)
            } else {
                (TokenKind::ItalicOpen, 1)
            };
            let followed = match bytes.get(at + len) {
                Some(&b) => b != b'*' && !b.is_ascii_whitespace(),
                None => false,
            };
            if opens_word && followed {
                return Some((at, kind, len));
            }
            i = at + len;
        }
        None
    }
}

/// Column width of a piece of text, in characters.
#[inline]
fn width(text: &str) -> u32 {
    text.chars().count() as u32
}

#[inline]
fn find_byte(bytes: &[u8], byte: u8, from: usize) -> Option<usize> {
    if from >= bytes.len() {
        return None;
    }
    memchr(byte, &bytes[from..]).map(|offset| from + offset)
}

/// `digits ". " text`, with the digits fitting a `u64`.
fn ordered_item_number(text: &str) -> Option<u64> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = text[digits..].strip_prefix(". ")?;
    if rest.is_empty() {
        return None;
    }
    text[..digits].parse().ok()
}

/// `**` + one or more non-`*` + `**`
fn find_bold(bytes: &[u8], from: usize) -> Option<Match> {
    let mut i = from;
    while let Some(start) = find_byte(bytes, b'*', i) {
        if bytes.get(start + 1) == Some(&b'*') {
            let content = start + 2;
            if let Some(close) = find_byte(bytes, b'*', content) {
                if close > content && bytes.get(close + 1) == Some(&b'*') {
                    return Some(Match {
                        pattern: Pattern::Bold,
                        start,
                        end: close + 2,
                        first: (content, close),
                        second: (close, close),
                    });
                }
            }
        }
        i = start + 1;
    }
    None
}

/// `*` + one or more non-`*` + `*`
fn find_italic(bytes: &[u8], from: usize) -> Option<Match> {
    let mut i = from;
    while let Some(start) = find_byte(bytes, b'*', i) {
        let content = start + 1;
        if let Some(close) = find_byte(bytes, b'*', content) {
            if close > content {
                return Some(Match {
                    pattern: Pattern::Italic,
                    start,
                    end: close + 1,
                    first: (content, close),
                    second: (close, close),
                });
            }
        }
        i = start + 1;
    }
    None
}

/// ```` ``` ```` + any non-backtick run + ```` ``` ````
fn find_code(bytes: &[u8], from: usize) -> Option<Match> {
    let fence = b"```";
    let mut i = from;
    while let Some(start) = find_byte(bytes, b'`', i) {
        if bytes[start..].starts_with(fence) {
            let content = start + 3;
            if let Some(close) = find_byte(bytes, b'`', content) {
                if bytes[close..].starts_with(fence) {
                    return Some(Match {
                        pattern: Pattern::Code,
                        start,
                        end: close + 3,
                        first: (content, close),
                        second: (close, close),
                    });
                }
            }
        }
        i = start + 1;
    }
    None
}

/// Bracketed label followed by a parenthesised destination, starting at
/// `open` (the `[`). `min_label` is 1 for links and 0 for image alt text.
fn bracket_target(bytes: &[u8], open: usize, min_label: usize) -> Option<(usize, usize)> {
    let label = open + 1;
    let close = find_byte(bytes, b']', label)?;
    if close - label < min_label || bytes.get(close + 1) != Some(&b'(') {
        return None;
    }
    let url = close + 2;
    let end = find_byte(bytes, b')', url)?;
    if end == url {
        return None;
    }
    Some((close, end))
}

/// `[text](url)` with non-empty text and url
fn find_link(bytes: &[u8], from: usize) -> Option<Match> {
    let mut i = from;
    while let Some(start) = find_byte(bytes, b'[', i) {
        if let Some((close, end)) = bracket_target(bytes, start, 1) {
            return Some(Match {
                pattern: Pattern::Link,
                start,
                end: end + 1,
                first: (start + 1, close),
                second: (close + 2, end),
            });
        }
        i = start + 1;
    }
    None
}

/// `![alt](url)` with possibly empty alt and non-empty url
fn find_image(bytes: &[u8], from: usize) -> Option<Match> {
    let mut i = from;
    while let Some(start) = find_byte(bytes, b'!', i) {
        if bytes.get(start + 1) == Some(&b'[') {
            if let Some((close, end)) = bracket_target(bytes, start + 1, 0) {
                return Some(Match {
                    pattern: Pattern::Image,
                    start,
                    end: end + 1,
                    first: (start + 2, close),
                    second: (close + 2, end),
                });
            }
        }
        i = start + 1;
    }
    None
}
