//! Marker patterns, one compiled regex per (marker, comment syntax) pair.
//!
//! Each pattern requires the marker to be followed by a colon or whitespace
//! and captures the rest of the comment as group 1. The table is ordered
//! marker-major, syntax-minor; the first matching entry wins for a line.

use crate::models::Marker;
use regex::Regex;
use std::sync::LazyLock;

/// Comment syntaxes recognized around a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSyntax {
    /// `// TODO: ...`
    DoubleSlash,
    /// `# TODO: ...`
    Hash,
    /// `/* TODO: ... */`, or unterminated to end of line
    Block,
    /// `<!-- TODO: ... -->`
    Markup,
}

impl CommentSyntax {
    pub const ALL: [CommentSyntax; 4] = [
        CommentSyntax::DoubleSlash,
        CommentSyntax::Hash,
        CommentSyntax::Block,
        CommentSyntax::Markup,
    ];
}

/// A compiled marker pattern.
#[derive(Debug)]
pub struct CommentPattern {
    pub marker: Marker,
    pub syntax: CommentSyntax,
    pub regex: Regex,
}

const PATTERN_TABLE: [(Marker, CommentSyntax, &str); 24] = [
    (Marker::Todo, CommentSyntax::DoubleSlash, r"//\s*TODO[:\s]+(.+)"),
    (Marker::Todo, CommentSyntax::Hash, r"#\s*TODO[:\s]+(.+)"),
    (Marker::Todo, CommentSyntax::Block, r"/\*\s*TODO[:\s]+(.+?)(?:\s*\*/|$)"),
    (Marker::Todo, CommentSyntax::Markup, r"<!--\s*TODO[:\s]+(.+?)\s*-->"),
    (Marker::Fixme, CommentSyntax::DoubleSlash, r"//\s*FIXME[:\s]+(.+)"),
    (Marker::Fixme, CommentSyntax::Hash, r"#\s*FIXME[:\s]+(.+)"),
    (Marker::Fixme, CommentSyntax::Block, r"/\*\s*FIXME[:\s]+(.+?)(?:\s*\*/|$)"),
    (Marker::Fixme, CommentSyntax::Markup, r"<!--\s*FIXME[:\s]+(.+?)\s*-->"),
    (Marker::Hack, CommentSyntax::DoubleSlash, r"//\s*HACK[:\s]+(.+)"),
    (Marker::Hack, CommentSyntax::Hash, r"#\s*HACK[:\s]+(.+)"),
    (Marker::Hack, CommentSyntax::Block, r"/\*\s*HACK[:\s]+(.+?)(?:\s*\*/|$)"),
    (Marker::Hack, CommentSyntax::Markup, r"<!--\s*HACK[:\s]+(.+?)\s*-->"),
    (Marker::Xxx, CommentSyntax::DoubleSlash, r"//\s*XXX[:\s]+(.+)"),
    (Marker::Xxx, CommentSyntax::Hash, r"#\s*XXX[:\s]+(.+)"),
    (Marker::Xxx, CommentSyntax::Block, r"/\*\s*XXX[:\s]+(.+?)(?:\s*\*/|$)"),
    (Marker::Xxx, CommentSyntax::Markup, r"<!--\s*XXX[:\s]+(.+?)\s*-->"),
    (Marker::Bug, CommentSyntax::DoubleSlash, r"//\s*BUG[:\s]+(.+)"),
    (Marker::Bug, CommentSyntax::Hash, r"#\s*BUG[:\s]+(.+)"),
    (Marker::Bug, CommentSyntax::Block, r"/\*\s*BUG[:\s]+(.+?)(?:\s*\*/|$)"),
    (Marker::Bug, CommentSyntax::Markup, r"<!--\s*BUG[:\s]+(.+?)\s*-->"),
    (Marker::Note, CommentSyntax::DoubleSlash, r"//\s*NOTE[:\s]+(.+)"),
    (Marker::Note, CommentSyntax::Hash, r"#\s*NOTE[:\s]+(.+)"),
    (Marker::Note, CommentSyntax::Block, r"/\*\s*NOTE[:\s]+(.+?)(?:\s*\*/|$)"),
    (Marker::Note, CommentSyntax::Markup, r"<!--\s*NOTE[:\s]+(.+?)\s*-->"),
];

static PATTERNS: LazyLock<Vec<CommentPattern>> = LazyLock::new(|| {
    PATTERN_TABLE
        .iter()
        .map(|&(marker, syntax, source)| CommentPattern {
            marker,
            syntax,
            regex: Regex::new(source).expect("valid marker regex"),
        })
        .collect()
});

/// The compiled pattern table in matching priority order.
pub fn patterns() -> &'static [CommentPattern] {
    &PATTERNS
}

/// Match one source line. Returns the winning pattern and the trimmed
/// description. The first pattern that matches decides the line; if its
/// description is blank the line yields nothing.
pub fn match_line(line: &str) -> Option<(&'static CommentPattern, String)> {
    let (pattern, caps) = patterns()
        .iter()
        .find_map(|pattern| pattern.regex.captures(line).map(|caps| (pattern, caps)))?;
    let description = caps.get(1)?.as_str().trim();
    if description.is_empty() {
        None
    } else {
        Some((pattern, description.to_string()))
    }
}
