//! Complexity levels and the grammar features they unlock.
//!
//! A [`Level`] is chosen once per compiler and turned into a [`Features`]
//! set. Every stage asks the feature set a single question per construct,
//! so enabling level 3 never hides a level 2 construct (or the reverse).

use std::fmt;

/// Grammar complexity level.
///
/// - `Basic` (1): headings and plain text
/// - `Intermediate` (2): adds bold/italic emphasis and list items
/// - `Advanced` (3): adds fenced code blocks, links and images
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    Basic = 1,
    Intermediate = 2,
    #[default]
    Advanced = 3,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Level; 3] = [Level::Basic, Level::Intermediate, Level::Advanced];

    /// Clamp an arbitrary integer into the `1..=3` range.
    pub fn clamped(value: i64) -> Self {
        match value {
            i64::MIN..=1 => Level::Basic,
            2 => Level::Intermediate,
            _ => Level::Advanced,
        }
    }

    /// Numeric value of this level.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Capability set enabled at this level.
    #[inline]
    pub const fn features(self) -> Features {
        Features::for_level(self)
    }
}

impl TryFrom<u8> for Level {
    type Error = u8;

    /// Strict conversion; out-of-range values are handed back unchanged.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Level::Basic),
            2 => Ok(Level::Intermediate),
            3 => Ok(Level::Advanced),
            other => Err(other),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Immutable set of grammar capabilities derived from a [`Level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Features {
    /// `#`, `##` and `###` headings.
    pub headings: bool,
    /// `**bold**` and `*italic*` spans.
    pub emphasis: bool,
    /// `- item` and `N. item` lines.
    pub lists: bool,
    /// ```` ```code``` ```` blocks.
    pub code_blocks: bool,
    /// `[text](url)` links.
    pub links: bool,
    /// `![alt](url)` images.
    pub images: bool,
}

impl Features {
    /// Capabilities for the given level.
    pub const fn for_level(level: Level) -> Self {
        let n = level as u8;
        Self {
            headings: n >= 1,
            emphasis: n >= 2,
            lists: n >= 2,
            code_blocks: n >= 3,
            links: n >= 3,
            images: n >= 3,
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::for_level(Level::default())
    }
}
