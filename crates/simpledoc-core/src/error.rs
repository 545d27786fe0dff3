//! Error types for every compilation stage.
//!
//! All failures belong to one family, [`Error`], with one variant per stage.
//! Each stage error carries the most specific location it knows about.

use std::fmt;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure raised while compiling a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl Error {
    /// Source line of the failure, when known.
    pub fn line(&self) -> Option<u32> {
        match self {
            Error::Lex(e) => e.line,
            Error::Parse(e) => Some(e.line),
            Error::Validation(e) => e.line,
            Error::Generation(_) => None,
        }
    }

    /// Short stage name (`lex`, `parse`, `validation`, `generation`).
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Lex(_) => "lex",
            Error::Parse(_) => "parse",
            Error::Validation(_) => "validation",
            Error::Generation(_) => "generation",
        }
    }
}

/// Scan-level failure.
///
/// The lexer falls back to plain text for anything it cannot classify, so
/// nothing raises this today; it is kept for a strict scanning mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct LexError {
    pub message: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl LexError {
    pub fn new(message: impl Into<String>, line: Option<u32>, column: Option<u32>) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("lex error")?;
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, " on line {}, column {}", line, column)?,
            (Some(line), None) => write!(f, " on line {}", line)?,
            _ => {}
        }
        write!(f, ": {}", self.message)
    }
}

/// Parse error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A bold or italic opener with no matching closer.
    UnterminatedSpan,
    /// Emphasis nested deeper than the parser allows.
    NestingTooDeep,
}

/// A syntactic failure, located at the token that opened the construct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error on line {line}, token '{token}': {message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// Line of the offending token.
    pub line: u32,
    /// Text of the offending token (the delimiter for unterminated spans).
    pub token: String,
}

impl ParseError {
    /// Opener `delimiter` on `line` was never closed.
    pub fn unterminated(span_name: &str, delimiter: &str, line: u32) -> Self {
        Self {
            kind: ParseErrorKind::UnterminatedSpan,
            message: format!("missing closing {} ({})", span_name, delimiter),
            line,
            token: delimiter.to_string(),
        }
    }

    /// Emphasis opened at `line` exceeded `limit` levels of nesting.
    pub fn nesting_too_deep(delimiter: &str, line: u32, limit: usize) -> Self {
        Self {
            kind: ParseErrorKind::NestingTooDeep,
            message: format!("emphasis nested deeper than {} levels", limit),
            line,
            token: delimiter.to_string(),
        }
    }
}

/// Validation rule categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    EmptyDocument,
    EmptyHeading,
    EmptyEmphasis,
    ListNumbering { expected: u64, found: u64 },
    /// An item follows one numbered `u64::MAX`, which has no successor.
    NumberingOverflow { previous: u64 },
    MissingUrl,
    MalformedUrl { url: String },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::EmptyDocument => f.write_str("empty document"),
            ValidationErrorKind::EmptyHeading => f.write_str("empty heading"),
            ValidationErrorKind::EmptyEmphasis => f.write_str("empty emphasis"),
            ValidationErrorKind::ListNumbering { expected, found } => write!(
                f,
                "incorrect numbering: expected {}, found {}",
                expected, found
            ),
            ValidationErrorKind::NumberingOverflow { previous } => write!(
                f,
                "incorrect numbering: no number follows {}",
                previous
            ),
            ValidationErrorKind::MissingUrl => f.write_str("missing URL"),
            ValidationErrorKind::MalformedUrl { url } => write!(f, "malformed URL: {}", url),
        }
    }
}

/// A structural rule violation found in the AST.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Element name of the offending node, if the rule targets one.
    pub element: Option<&'static str>,
    pub line: Option<u32>,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, element: Option<&'static str>, line: Option<u32>) -> Self {
        Self {
            kind,
            element,
            line,
        }
    }

    /// Document-level failure with no element or line.
    pub fn empty_document() -> Self {
        Self::new(ValidationErrorKind::EmptyDocument, None, None)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation error")?;
        match (self.line, self.element) {
            (Some(line), Some(element)) => {
                write!(f, " on line {}, element '{}'", line, element)?
            }
            (Some(line), None) => write!(f, " on line {}", line)?,
            (None, Some(element)) => write!(f, " in element '{}'", element)?,
            (None, None) => {}
        }
        write!(f, ": {}", self.kind)
    }
}

/// Generation-time failure. The generator currently has no failing paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("generation error: {message}")]
pub struct GenerationError {
    pub message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
