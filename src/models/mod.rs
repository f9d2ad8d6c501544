//! Data models for rusky entities.
//!
//! This module defines the core data structures:
//! - `DebtItem` - A tracked unit of technical debt, persisted in the item file
//! - `DebtStatus` - Open / completed workflow state
//! - `Marker` - The fixed vocabulary of comment markers (TODO, FIXME, ...)
//! - `ScanResult` - An ephemeral finding produced by the scanner

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a debt item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtStatus {
    #[default]
    Open,
    Completed,
}

impl DebtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtStatus::Open => "open",
            DebtStatus::Completed => "completed",
        }
    }

    /// Status symbol used by list and browser output.
    pub fn symbol(&self) -> &'static str {
        match self {
            DebtStatus::Open => "●",
            DebtStatus::Completed => "✓",
        }
    }
}

impl fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Comment marker keywords recognized by the scanner.
///
/// The declaration order is the matching priority: when a line carries more
/// than one marker, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Marker {
    Todo,
    Fixme,
    Hack,
    Xxx,
    Bug,
    Note,
}

impl Marker {
    /// All markers in matching priority order.
    pub const ALL: [Marker; 6] = [
        Marker::Todo,
        Marker::Fixme,
        Marker::Hack,
        Marker::Xxx,
        Marker::Bug,
        Marker::Note,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::Todo => "TODO",
            Marker::Fixme => "FIXME",
            Marker::Hack => "HACK",
            Marker::Xxx => "XXX",
            Marker::Bug => "BUG",
            Marker::Note => "NOTE",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A technical debt item tracked by rusky.
///
/// Provenance fields (`file_path`, `line_number`, `comment_type`) are present
/// exactly when `is_scanned` is true. `completed_at` is present exactly when
/// `status` is `Completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtItem {
    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Completion timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Unique identifier (UUID v4)
    pub id: String,

    /// Free-text description
    pub description: String,

    /// Current status
    #[serde(default)]
    pub status: DebtStatus,

    /// Source file, relative to the scan root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// 1-based line in `file_path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,

    /// Marker that produced this item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_type: Option<Marker>,

    /// True for items imported from a scan
    #[serde(default)]
    pub is_scanned: bool,
}

impl DebtItem {
    /// Create a new, manually added item.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            created_at: Utc::now(),
            completed_at: None,
            id: uuid::Uuid::new_v4().to_string(),
            description: description.into(),
            status: DebtStatus::Open,
            file_path: None,
            line_number: None,
            comment_type: None,
            is_scanned: false,
        }
    }

    /// Create an open item carrying the provenance of a scan finding.
    pub fn from_scan(result: &ScanResult) -> Self {
        Self {
            file_path: Some(result.file_path.clone()),
            line_number: Some(result.line_number),
            comment_type: Some(result.comment_type),
            is_scanned: true,
            ..Self::new(result.description.clone())
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == DebtStatus::Completed
    }

    /// Mark the item completed. Returns false if it already was, in which
    /// case the original completion timestamp is kept.
    pub fn complete(&mut self) -> bool {
        if self.is_completed() {
            return false;
        }
        self.status = DebtStatus::Completed;
        self.completed_at = Some(Utc::now());
        true
    }

    /// Mark the item open again. Returns false if it already was open.
    pub fn reopen(&mut self) -> bool {
        if !self.is_completed() {
            return false;
        }
        self.status = DebtStatus::Open;
        self.completed_at = None;
        true
    }

    /// Flip between open and completed.
    pub fn toggle(&mut self) {
        if self.is_completed() {
            self.reopen();
        } else {
            self.complete();
        }
    }

    /// `path:line` for scanned items.
    pub fn location(&self) -> Option<String> {
        match (&self.file_path, self.line_number) {
            (Some(path), Some(line)) => Some(format!("{}:{}", path, line)),
            _ => None,
        }
    }
}

/// Display order of the item browser: indices of open items followed by
/// indices of completed items, each group in collection order.
pub fn visual_order(items: &[DebtItem]) -> Vec<usize> {
    let (mut order, completed): (Vec<usize>, Vec<usize>) =
        (0..items.len()).partition(|&i| !items[i].is_completed());
    order.extend(completed);
    order
}

/// A marker found in a source file, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Path relative to the scan root
    pub file_path: String,
    /// 1-based line number
    pub line_number: usize,
    pub comment_type: Marker,
    /// Text following the marker, trimmed
    pub description: String,
    /// The full source line, trimmed, for previews
    pub line: String,
}
