//! TUI Views module
//!
//! Contains the item browser and the scan selector, plus the small
//! formatting helpers they share.

mod browser;
mod selector;

pub use browser::BrowserView;
pub use selector::{MIN_VISIBLE_ROWS, SelectorOutcome, SelectorView, visible_range};

use chrono::{DateTime, Utc};

/// Format relative time since `then`, as seen at `now`.
pub fn relative_time_from(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(then);

    if duration.num_seconds() < 60 {
        "just now".to_string()
    } else if duration.num_minutes() < 60 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_hours() < 24 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_days() < 7 {
        format!("{}d ago", duration.num_days())
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}

pub fn relative_time(then: DateTime<Utc>) -> String {
    relative_time_from(then, Utc::now())
}

/// Shorten `text` to at most `max` characters, marking the cut with "...".
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
