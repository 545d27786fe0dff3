//! SimpleDoc CLI - Compile, validate, and inspect SimpleDoc documents
//!
//! Usage:
//!   sdoc <COMMAND> [OPTIONS] <FILE>
//!
//! Commands:
//!   build   Compile a document to HTML
//!   check   Lex, parse and validate without writing output
//!   tokens  Dump the token stream
//!   ast     Dump the syntax tree
//!   stats   Show document statistics

mod config;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use simpledoc_core::{Compiler, Error, Level, Node, NodeKind, Token, TokenKind};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "sdoc", version)]
#[command(about = "Compile SimpleDoc documents to HTML")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a document to HTML
    Build(BuildArgs),
    /// Check a document for errors without writing output
    Check(InspectArgs),
    /// Print the token stream
    Tokens(InspectArgs),
    /// Print the syntax tree
    Ast(InspectArgs),
    /// Show document statistics
    Stats(CommonArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input SimpleDoc file
    file: PathBuf,

    /// Complexity level (1 = basic, 2 = intermediate, 3 = advanced)
    #[arg(short = 'c', long = "level", value_parser = parse_level)]
    level: Option<Level>,

    /// TOML config file (defaults to ./simpledoc.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BuildArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output HTML file, or `-` for stdout (defaults to input name with .html extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Print tokens, tree, validation result and an HTML preview to stderr
    #[arg(short, long)]
    debug: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output in JSON format
    #[arg(short, long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Build(args) => cmd_build(&args),
        Command::Check(args) => cmd_check(&args),
        Command::Tokens(args) => cmd_tokens(&args),
        Command::Ast(args) => cmd_ast(&args),
        Command::Stats(args) => cmd_stats(&args),
    }
}

fn parse_level(value: &str) -> Result<Level, String> {
    let n: u8 = value
        .parse()
        .map_err(|_| format!("invalid level '{}'", value))?;
    Level::try_from(n).map_err(|n| format!("level must be 1, 2 or 3 (got {})", n))
}

// =============================================================================
// Settings
// =============================================================================

/// Effective settings after merging the config file with command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    level: Level,
    title: Option<String>,
}

impl Settings {
    fn resolve(common: &CommonArgs, title: Option<&str>) -> Self {
        let config = match &common.config {
            Some(path) => {
                if !path.exists() {
                    eprintln!("warning: config file '{}' not found", path.display());
                }
                Config::load(path)
            }
            None => Config::load(Path::new(config::DEFAULT_PATH)),
        };
        Self::merge(config, common.level, title)
    }

    fn merge(config: Config, level: Option<Level>, title: Option<&str>) -> Self {
        Self {
            level: level.or_else(|| config.level()).unwrap_or_default(),
            title: title.map(str::to_string).or(config.title),
        }
    }

    fn compiler(&self) -> Compiler {
        let compiler = Compiler::new(self.level);
        match &self.title {
            Some(title) => compiler.with_title(title.as_str()),
            None => compiler,
        }
    }
}

fn read_source(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

// =============================================================================
// Build Command
// =============================================================================

fn cmd_build(args: &BuildArgs) -> Result<(), String> {
    let settings = Settings::resolve(&args.common, args.title.as_deref());
    let compiler = settings.compiler();
    let source = read_source(&args.common.file)?;

    let html = if args.debug {
        compile_debug(&compiler, &source)
    } else {
        compiler.compile(&source)
    }
    .map_err(|e| e.to_string())?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| output_path(&args.common.file));

    if output.as_os_str() == "-" {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(html.as_bytes())
            .and_then(|_| stdout.write_all(b"\n"))
            .map_err(|e| format!("failed to write to stdout: {}", e))?;
        return Ok(());
    }

    fs::write(&output, html)
        .map_err(|e| format!("failed to write '{}': {}", output.display(), e))?;
    println!("Created {}", output.display());
    Ok(())
}

/// Default output path: `.sd` / `.simpledoc` become `.html`, anything else
/// gets `.html` appended.
fn output_path(input: &Path) -> PathBuf {
    match input.extension().and_then(|ext| ext.to_str()) {
        Some("sd" | "simpledoc") => input.with_extension("html"),
        _ => {
            let mut name = input.as_os_str().to_owned();
            name.push(".html");
            PathBuf::from(name)
        }
    }
}

fn compile_debug(compiler: &Compiler, source: &str) -> Result<String, Error> {
    let tokens = compiler.tokenize(source);
    eprintln!("--- tokens ---");
    for token in &tokens {
        eprintln!("{}", token);
    }

    let document = compiler.parse(&tokens).inspect_err(|e| {
        eprintln!("\n--- compilation failed ---\n{}", e);
    })?;
    eprintln!("\n--- ast ---");
    eprint!("{}", document.dump());

    compiler.validate(&document).inspect_err(|e| {
        eprintln!("\n--- compilation failed ---\n{}", e);
    })?;
    eprintln!("\n--- validation passed ---");

    let html = compiler.generate(&document);
    eprintln!("\n--- html ---");
    eprintln!("{}", preview(&html, 200));
    Ok(html)
}

/// First `limit` characters of `text`, with `...` appended if it was cut.
fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

// =============================================================================
// Check Command
// =============================================================================

#[derive(Serialize)]
struct JsonCheck<'a> {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError<'a>>,
}

#[derive(Serialize)]
struct JsonError<'a> {
    stage: &'a str,
    line: Option<u32>,
    message: String,
}

fn cmd_check(args: &InspectArgs) -> Result<(), String> {
    let settings = Settings::resolve(&args.common, None);
    let compiler = settings.compiler();
    let source = read_source(&args.common.file)?;

    let outcome = check(&compiler, &source);

    if args.json {
        let report = JsonCheck {
            valid: outcome.is_ok(),
            error: outcome.as_ref().err().map(|e| JsonError {
                stage: e.stage(),
                line: e.line(),
                message: e.to_string(),
            }),
        };
        print_json(&report)?;
    } else if outcome.is_ok() {
        println!("Valid: no errors found (level {})", settings.level);
    }

    outcome.map_err(|e| e.to_string())
}

fn check(compiler: &Compiler, source: &str) -> Result<(), Error> {
    let tokens = compiler.tokenize(source);
    let document = compiler.parse(&tokens)?;
    compiler.validate(&document)?;
    Ok(())
}

// =============================================================================
// Tokens Command
// =============================================================================

#[derive(Serialize)]
struct JsonToken<'a> {
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<u64>,
    text: &'a str,
    line: u32,
    column: u32,
}

fn convert_token<'a>(token: &'a Token<'_>) -> JsonToken<'a> {
    JsonToken {
        kind: token.kind.name(),
        number: match token.kind {
            TokenKind::OrderedListItem(n) => Some(n),
            _ => None,
        },
        text: &token.text,
        line: token.line,
        column: token.column,
    }
}

fn cmd_tokens(args: &InspectArgs) -> Result<(), String> {
    let settings = Settings::resolve(&args.common, None);
    let source = read_source(&args.common.file)?;
    let tokens = settings.compiler().tokenize(&source);

    if args.json {
        let json: Vec<_> = tokens.iter().map(convert_token).collect();
        print_json(&json)
    } else {
        for token in &tokens {
            println!("{}", token);
        }
        Ok(())
    }
}

// =============================================================================
// Ast Command
// =============================================================================

#[derive(Serialize)]
struct JsonNode<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonNode<'a>>,
}

fn convert_node<'a>(node: &'a Node<'_>) -> JsonNode<'a> {
    JsonNode {
        kind: node.name(),
        line: node.line,
        value: node.value.as_deref(),
        url: node.url(),
        number: node.number(),
        children: node.children.iter().map(convert_node).collect(),
    }
}

fn cmd_ast(args: &InspectArgs) -> Result<(), String> {
    let settings = Settings::resolve(&args.common, None);
    let compiler = settings.compiler();
    let source = read_source(&args.common.file)?;

    let tokens = compiler.tokenize(&source);
    let document = compiler
        .parse(&tokens)
        .map_err(|e| e.to_string())?;

    if args.json {
        print_json(&convert_node(&document))
    } else {
        print!("{}", document.dump());
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize JSON: {}", e))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(args: &CommonArgs) -> Result<(), String> {
    let settings = Settings::resolve(args, None);
    let compiler = settings.compiler();
    let source = read_source(&args.file)?;

    let tokens = compiler.tokenize(&source);
    let document = compiler
        .parse(&tokens)
        .map_err(|e| e.to_string())?;
    let validation = compiler.validate(&document);
    let html = compiler.generate(&document);

    let stats = DocumentStats::from_document(&document, &source, &html);

    println!("Document Statistics");
    println!("-------------------");
    println!("Level:        {}", settings.level);
    println!("Tokens:       {}", tokens.len());
    match &validation {
        Ok(()) => println!("Valid:        yes"),
        Err(e) => println!("Valid:        no ({})", e),
    }
    println!();
    println!("Content:");
    println!("  Headings:       {}", stats.headings);
    println!("  Paragraphs:     {}", stats.paragraphs);
    println!("  List items:     {}", stats.list_items);
    println!("  Emphasis:       {}", stats.emphasis);
    println!("  Links:          {}", stats.links);
    println!("  Images:         {}", stats.images);
    println!("  Code blocks:    {}", stats.code_blocks);
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);
    println!("  HTML bytes:     {}", stats.html_bytes);

    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct DocumentStats {
    headings: usize,
    paragraphs: usize,
    list_items: usize,
    emphasis: usize,
    links: usize,
    images: usize,
    code_blocks: usize,
    chars: usize,
    words: usize,
    lines: usize,
    html_bytes: usize,
}

impl DocumentStats {
    fn from_document(doc: &Node<'_>, input: &str, html: &str) -> Self {
        let mut stats = Self {
            // paragraphs as the generator groups them
            paragraphs: html.matches("<p>").count(),
            chars: input.chars().count(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
            html_bytes: html.len(),
            ..Self::default()
        };

        stats.count_nodes(&doc.children);
        stats
    }

    fn count_nodes(&mut self, nodes: &[Node<'_>]) {
        for node in nodes {
            match node.kind {
                NodeKind::Heading1 | NodeKind::Heading2 | NodeKind::Heading3 => self.headings += 1,
                NodeKind::ListItem | NodeKind::OrderedListItem { .. } => self.list_items += 1,
                NodeKind::Bold | NodeKind::Italic => self.emphasis += 1,
                NodeKind::Link { .. } => self.links += 1,
                NodeKind::Image { .. } => self.images += 1,
                NodeKind::CodeBlock => self.code_blocks += 1,
                _ => {}
            }
            self.count_nodes(&node.children);
        }
    }
}
