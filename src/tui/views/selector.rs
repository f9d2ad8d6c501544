//! Scan Selector View - choose which scan findings become debt items
//!
//! Every finding starts selected. Confirming imports the selected findings
//! in one write and ends the session; cancelling ends it without writing.

use std::ops::Range;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::truncate;
use crate::commands::Manager;
use crate::models::ScanResult;
use crate::storage::StorageBackend;

/// Fewest finding rows shown, however small the terminal.
pub const MIN_VISIBLE_ROWS: usize = 5;

/// How a selector session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorOutcome {
    /// Selected findings were persisted
    Added(usize),
    /// The user left without persisting
    Cancelled,
}

/// Window of `len` rows, at most `max_visible` tall, centered on `cursor`
/// and clamped to the ends of the list.
pub fn visible_range(len: usize, cursor: usize, max_visible: usize) -> Range<usize> {
    let max_visible = max_visible.max(1);
    if len <= max_visible {
        return 0..len;
    }

    let mut start = cursor.saturating_sub(max_visible / 2);
    let mut end = start + max_visible;
    if end > len {
        end = len;
        start = len - max_visible;
    }
    start..end
}

/// State for the scan selector
pub struct SelectorView {
    /// Findings under review
    pub results: Vec<ScanResult>,
    /// Selection flag per finding
    pub selected: Vec<bool>,
    /// Cursor into `results`
    pub cursor: usize,
    /// Last save error, shown inline
    pub error: Option<String>,
    outcome: Option<SelectorOutcome>,
}

impl SelectorView {
    pub fn new(results: Vec<ScanResult>) -> Self {
        let selected = vec![true; results.len()];
        Self {
            results,
            selected,
            cursor: 0,
            error: None,
            outcome: None,
        }
    }

    pub fn outcome(&self) -> Option<SelectorOutcome> {
        self.outcome
    }

    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// Move cursor down
    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.results.len() {
            self.cursor += 1;
        }
    }

    /// Move cursor up
    pub fn select_previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn toggle_current(&mut self) {
        if let Some(flag) = self.selected.get_mut(self.cursor) {
            *flag = !*flag;
        }
    }

    pub fn select_all(&mut self) {
        self.selected.iter_mut().for_each(|s| *s = true);
    }

    pub fn deselect_all(&mut self) {
        self.selected.iter_mut().for_each(|s| *s = false);
    }

    pub fn cancel(&mut self) {
        self.outcome = Some(SelectorOutcome::Cancelled);
    }

    /// Persist the selected findings. On failure the session stays open with
    /// the error shown.
    pub fn confirm<B: StorageBackend>(&mut self, manager: &mut Manager<B>) {
        let chosen: Vec<ScanResult> = self
            .results
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(result, _)| result.clone())
            .collect();

        match manager.import(&chosen) {
            Ok(imported) => {
                self.error = None;
                self.outcome = Some(SelectorOutcome::Added(imported.len()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save selected findings");
                self.error = Some(format!("Save failed: {}", e));
            }
        }
    }

    /// Render the view
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(MIN_VISIBLE_ROWS as u16 + 2),
                Constraint::Length(3), // Key hints
            ])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " Select Items to Add",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({}/{} selected)", self.selected_count(), self.results.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        // Two rows are reserved for the scroll hints
        let inner_height = chunks[1].height.saturating_sub(2) as usize;
        let max_visible = inner_height.saturating_sub(2).max(MIN_VISIBLE_ROWS);
        let range = visible_range(self.results.len(), self.cursor, max_visible);

        let mut rows: Vec<ListItem> = Vec::new();
        if range.start > 0 {
            rows.push(ListItem::new(Span::styled(
                format!("   ... {} more items above", range.start),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let desc_width = (chunks[1].width as usize).saturating_sub(40).max(20);
        for idx in range.clone() {
            let result = &self.results[idx];
            let checkbox = if self.selected[idx] { "[✓]" } else { "[ ]" };
            let pointer = if idx == self.cursor { ">" } else { " " };

            let line = Line::from(vec![
                Span::raw(format!(" {} ", pointer)),
                Span::styled(
                    checkbox,
                    if self.selected[idx] {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    },
                ),
                Span::styled(
                    format!(" [{}]", result.comment_type),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!(" {}:{}", result.file_path, result.line_number),
                    Style::default().fg(Color::Blue),
                ),
                Span::raw(format!(" - {}", truncate(&result.description, desc_width))),
            ]);

            let style = if idx == self.cursor {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            rows.push(ListItem::new(line).style(style));
        }

        if range.end < self.results.len() {
            rows.push(ListItem::new(Span::styled(
                format!("   ... {} more items below", self.results.len() - range.end),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let list = List::new(rows).block(Block::default().borders(Borders::ALL));
        frame.render_widget(list, chunks[1]);

        let status = match &self.error {
            Some(err) => Paragraph::new(format!(" {}", err)).style(Style::default().fg(Color::Red)),
            None => Paragraph::new(format!(
                " j/k:Navigate  Space:Toggle  a:All  n:None  Enter:Add ({} selected)  q:Cancel",
                self.selected_count()
            ))
            .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(status.block(Block::default().borders(Borders::ALL)), chunks[2]);
    }
}
