//! Structural validation of a parsed document.
//!
//! Validation is a fixed sequence of independent, level-gated tree walks.
//! Each walk is depth-first in sibling order and stops at the first
//! violation; later walks do not run once one fails.

use crate::ast::{list_run_successor, Node, NodeKind};
use crate::error::{ValidationError, ValidationErrorKind};
use crate::level::{Features, Level};

/// URL prefixes accepted for links.
pub const LINK_PREFIXES: [&str; 5] = ["http://", "https://", "mailto:", "tel:", "/"];

/// URL prefixes accepted for images.
pub const IMAGE_PREFIXES: [&str; 3] = ["http://", "https://", "/"];

/// Validate `document` with the rules enabled at `level`.
#[inline]
pub fn validate(document: &Node<'_>, level: Level) -> Result<(), ValidationError> {
    Validator::new(level).validate(document)
}

/// Level-gated document validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    features: Features,
}

type Check<'n, 'a> = dyn FnMut(&'n [Node<'a>], usize) -> Result<(), ValidationError> + 'n;

impl Validator {
    #[inline]
    pub fn new(level: Level) -> Self {
        Self::with_features(level.features())
    }

    #[inline]
    pub fn with_features(features: Features) -> Self {
        Self { features }
    }

    /// Run every enabled walk in order, failing on the first violation.
    pub fn validate(&self, document: &Node<'_>) -> Result<(), ValidationError> {
        let features = self.features;

        check_structure(document)?;
        if features.emphasis {
            walk(document, &mut check_emphasis)?;
        }
        if features.lists {
            walk(document, &mut check_numbering)?;
        }
        if features.links {
            walk(document, &mut |siblings, i| match siblings[i].kind {
                NodeKind::Link { .. } => check_target(&siblings[i], &LINK_PREFIXES),
                _ => Ok(()),
            })?;
        }
        if features.images {
            walk(document, &mut |siblings, i| match siblings[i].kind {
                NodeKind::Image { .. } => check_target(&siblings[i], &IMAGE_PREFIXES),
                _ => Ok(()),
            })?;
        }
        if features.code_blocks {
            // code blocks carry no constraints yet
            walk(document, &mut |_, _| Ok(()))?;
        }

        Ok(())
    }
}

/// Visit every descendant of `node`, calling `check` with the sibling slice
/// and index before descending into that child.
fn walk<'n, 'a>(node: &'n Node<'a>, check: &mut Check<'n, 'a>) -> Result<(), ValidationError> {
    for (i, child) in node.children.iter().enumerate() {
        check(&node.children, i)?;
        if !child.children.is_empty() {
            walk(child, check)?;
        }
    }
    Ok(())
}

fn violation(kind: ValidationErrorKind, node: &Node<'_>) -> ValidationError {
    ValidationError::new(kind, Some(node.name()), Some(node.line))
}

/// The document has content and no heading is blank.
fn check_structure(document: &Node<'_>) -> Result<(), ValidationError> {
    if document.kind == NodeKind::Document && document.children.is_empty() {
        return Err(ValidationError::empty_document());
    }

    walk(document, &mut |siblings, i| {
        let node = &siblings[i];
        if node.is_heading() && node.text().trim().is_empty() {
            return Err(violation(ValidationErrorKind::EmptyHeading, node));
        }
        Ok(())
    })
}

/// Bold and italic spans wrap at least one element.
fn check_emphasis(siblings: &[Node<'_>], i: usize) -> Result<(), ValidationError> {
    let node = &siblings[i];
    if matches!(node.kind, NodeKind::Bold | NodeKind::Italic) && node.children.is_empty() {
        return Err(violation(ValidationErrorKind::EmptyEmphasis, node));
    }
    Ok(())
}

/// Ordered items in one run count up by exactly one.
fn check_numbering(siblings: &[Node<'_>], i: usize) -> Result<(), ValidationError> {
    let Some(previous) = siblings[i].number() else {
        return Ok(());
    };
    let Some(next) = list_run_successor(siblings, i).map(|j| &siblings[j]) else {
        return Ok(());
    };

    let Some(found) = next.number() else {
        return Ok(());
    };
    match previous.checked_add(1) {
        Some(expected) if found == expected => Ok(()),
        Some(expected) => Err(violation(
            ValidationErrorKind::ListNumbering { expected, found },
            next,
        )),
        None => Err(violation(
            ValidationErrorKind::NumberingOverflow { previous },
            next,
        )),
    }
}

/// Links and images carry a URL with an accepted prefix.
fn check_target(node: &Node<'_>, prefixes: &[&str]) -> Result<(), ValidationError> {
    let url = node.url().unwrap_or("");
    if url.is_empty() {
        return Err(violation(ValidationErrorKind::MissingUrl, node));
    }
    if !prefixes.iter().any(|prefix| url.starts_with(prefix)) {
        return Err(violation(
            ValidationErrorKind::MalformedUrl {
                url: url.to_string(),
            },
            node,
        ));
    }
    Ok(())
}
