//! Item Browser View - open items first, then completed items
//!
//! The cursor moves over the visual ordering, which is recomputed from the
//! collection after every toggle.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::{relative_time, truncate};
use crate::commands::Manager;
use crate::models::{DebtItem, visual_order};
use crate::storage::StorageBackend;

/// State for the item browser
pub struct BrowserView {
    /// Collection in storage order
    pub items: Vec<DebtItem>,
    /// Indices into `items`, open before completed
    order: Vec<usize>,
    /// Cursor position within `order`
    pub selected: usize,
    /// List widget state
    pub list_state: ListState,
    /// Last save error, shown inline
    pub error: Option<String>,
    /// True while the collection on disk is behind `items`
    pub dirty: bool,
}

impl BrowserView {
    pub fn new(items: Vec<DebtItem>) -> Self {
        let order = visual_order(&items);
        Self {
            items,
            order,
            selected: 0,
            list_state: ListState::default(),
            error: None,
            dirty: false,
        }
    }

    /// Item under the cursor.
    pub fn current(&self) -> Option<&DebtItem> {
        self.order.get(self.selected).map(|&idx| &self.items[idx])
    }

    pub fn open_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_completed()).count()
    }

    pub fn completed_count(&self) -> usize {
        self.items.len() - self.open_count()
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.order.len() - 1);
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Jump to top
    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Jump to bottom
    pub fn select_last(&mut self) {
        self.selected = self.order.len().saturating_sub(1);
    }

    /// Flip the item under the cursor and persist the whole collection.
    ///
    /// The cursor follows the item into its new group. A failed save keeps
    /// the in-memory change and marks the view dirty, so the next toggle
    /// writes everything again.
    pub fn toggle_selected<B: StorageBackend>(&mut self, manager: &mut Manager<B>) {
        let Some(&idx) = self.order.get(self.selected) else {
            return;
        };

        self.items[idx].toggle();
        self.order = visual_order(&self.items);
        self.selected = self
            .order
            .iter()
            .position(|&i| i == idx)
            .unwrap_or(0);

        match manager.save(&self.items) {
            Ok(()) => {
                self.error = None;
                self.dirty = false;
            }
            Err(e) => {
                tracing::warn!(id = %self.items[idx].id, error = %e, "failed to save toggle");
                self.error = Some(format!("Save failed: {}", e));
                self.dirty = true;
            }
        }
    }

    fn item_line(&self, item: &DebtItem, is_selected: bool, width: usize) -> Line<'static> {
        let pointer = if is_selected { ">" } else { " " };
        let symbol_style = if item.is_completed() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let text_style = if item.is_completed() {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default()
        };

        let when = match item.completed_at {
            Some(done) => format!("done {}", relative_time(done)),
            None => relative_time(item.created_at),
        };

        let mut spans = vec![
            Span::raw(format!(" {} ", pointer)),
            Span::styled(item.status.symbol(), symbol_style),
            Span::raw(" "),
            Span::styled(truncate(&item.description, width), text_style),
        ];
        if let (Some(location), Some(marker)) = (item.location(), item.comment_type) {
            spans.push(Span::styled(
                format!("  [{}] {}", marker, location),
                Style::default().fg(Color::Blue),
            ));
        }
        spans.push(Span::styled(
            format!("  {}", when),
            Style::default().fg(Color::DarkGray),
        ));
        Line::from(spans)
    }

    /// Render the view
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.items.is_empty() {
            let empty = Paragraph::new(
                "No technical debt items. Use 'rusky add' or 'rusky scan' to create some.",
            )
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Items "));
            frame.render_widget(empty, area);
            return;
        }

        let width = (area.width as usize).saturating_sub(40).max(20);
        let open = self.open_count();
        let completed = self.completed_count();

        let mut rows: Vec<ListItem> = Vec::new();
        let mut selected_row = 0;

        for (pos, &idx) in self.order.iter().enumerate() {
            if pos == 0 && open > 0 {
                rows.push(ListItem::new(Span::styled(
                    format!(" Open Items ({})", open),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            if pos == open && completed > 0 {
                if open > 0 {
                    rows.push(ListItem::new(""));
                }
                rows.push(ListItem::new(Span::styled(
                    format!(" Completed Items ({})", completed),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )));
            }

            let is_selected = pos == self.selected;
            if is_selected {
                selected_row = rows.len();
            }
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            rows.push(ListItem::new(self.item_line(&self.items[idx], is_selected, width)).style(style));
        }

        self.list_state.select(Some(selected_row));
        let list = List::new(rows).block(Block::default().borders(Borders::ALL));
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}
