//! # SimpleDoc Core
//!
//! A small, level-gated document markup compiler producing HTML.
//!
//! Source text flows through four stages: the [`lexer`] turns lines into
//! [`Token`]s, the [`parser`] builds a [`Node`] tree, the [`validator`]
//! checks semantic rules, and the [`html`] generator renders a complete HTML
//! document. Each stage only recognizes the constructs its [`Level`] enables.
//!
//! ## Quick Start
//!
//! ```rust
//! use simpledoc_core::{Compiler, Level};
//!
//! let source = "# Hello\n\nSome **bold** text and a [link](https://example.com).";
//! let html = Compiler::new(Level::Advanced).compile(source).unwrap();
//!
//! assert!(html.contains("<h1>Hello</h1>"));
//! assert!(html.contains("<strong>bold</strong>"));
//! assert!(html.contains("<a href=\"https://example.com\">link</a>"));
//! ```
//!
//! ## Running stages separately
//!
//! ```rust
//! use simpledoc_core::{parse, tokenize, validate, Level};
//!
//! let tokens = tokenize("## Part\n- a\n- b", Level::Intermediate);
//! let document = parse(&tokens, Level::Intermediate).unwrap();
//! validate(&document, Level::Intermediate).unwrap();
//!
//! println!("{}", document.dump());
//! ```
//!
//! ## Levels
//!
//! - `Level::Basic` - headings and paragraphs
//! - `Level::Intermediate` - adds bold, italic and lists
//! - `Level::Advanced` - adds code blocks, links and images

pub mod ast;
pub mod compiler;
pub mod error;
pub mod html;
pub mod lexer;
pub mod level;
pub mod parser;
pub mod token;
pub mod validator;

pub use ast::{CowStr, Node, NodeKind};
pub use compiler::Compiler;
pub use error::{
    Error, GenerationError, LexError, ParseError, ParseErrorKind, Result, ValidationError,
    ValidationErrorKind,
};
pub use html::{escape, generate, HtmlGenerator};
pub use lexer::{tokenize, Lexer};
pub use level::{Features, Level};
pub use parser::{parse, Parser};
pub use token::{Token, TokenKind};
pub use validator::{validate, Validator};
