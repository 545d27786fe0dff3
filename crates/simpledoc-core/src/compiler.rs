//! One-call façade over the four pipeline stages.

use crate::ast::Node;
use crate::error::{ParseError, Result, ValidationError};
use crate::html::HtmlGenerator;
use crate::lexer::Lexer;
use crate::level::{Features, Level};
use crate::parser::Parser;
use crate::token::Token;
use crate::validator::Validator;

/// Compiles SimpleDoc source to HTML at a fixed level.
///
/// A compiler holds only its configuration, so one instance can be shared
/// across threads and reused for any number of inputs.
///
/// ```rust
/// use simpledoc_core::{Compiler, Level};
///
/// let compiler = Compiler::new(Level::Intermediate).with_title("Notes");
/// let html = compiler.compile("# Notes\n- **first**\n").unwrap();
/// assert!(html.contains("<title>Notes</title>"));
/// assert!(html.contains("<li>**first**</li>"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiler {
    level: Level,
    features: Features,
    generator: HtmlGenerator,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

impl Compiler {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            features: level.features(),
            generator: HtmlGenerator::new(),
        }
    }

    /// Build a compiler from an arbitrary integer, clamping it into `1..=3`.
    pub fn from_level(level: i64) -> Self {
        Self::new(Level::clamped(level))
    }

    /// Replace the `<title>` of generated documents.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.generator = HtmlGenerator::with_title(title);
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn title(&self) -> &str {
        self.generator.title()
    }

    pub fn tokenize<'a>(&self, source: &'a str) -> Vec<Token<'a>> {
        Lexer::with_features(self.features).tokenize(source)
    }

    pub fn parse<'a>(&self, tokens: &[Token<'a>]) -> std::result::Result<Node<'a>, ParseError> {
        Parser::with_features(self.features).parse(tokens)
    }

    pub fn validate(&self, document: &Node<'_>) -> std::result::Result<(), ValidationError> {
        Validator::with_features(self.features).validate(document)
    }

    pub fn generate(&self, document: &Node<'_>) -> String {
        self.generator.generate(document)
    }

    /// Run lexing, parsing, validation and generation in order.
    ///
    /// The first failing stage aborts the pipeline and its error is returned.
    pub fn compile(&self, source: &str) -> Result<String> {
        let tokens = self.tokenize(source);
        let document = self.parse(&tokens)?;
        self.validate(&document)?;
        Ok(self.generate(&document))
    }
}
