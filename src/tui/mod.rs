//! Terminal User Interface module for rusky
//!
//! This module provides the keyboard-driven screens:
//! - the item browser, launched when rusky runs without a subcommand
//! - the scan selector, launched by `rusky scan` to review findings

#[cfg(feature = "tui")]
mod app;
#[cfg(feature = "tui")]
mod views;

#[cfg(feature = "tui")]
pub use app::{run_browser, run_selector};
#[cfg(feature = "tui")]
pub use views::{
    BrowserView, MIN_VISIBLE_ROWS, SelectorOutcome, SelectorView, relative_time, visible_range,
};
