//! Item commands: add, complete, reopen and list.

use super::manager::{Manager, StatusChange};
use super::{Output, json_string};
use crate::Result;
use crate::models::{DebtItem, DebtStatus};
use crate::storage::StorageBackend;
use chrono::Local;
use serde::Serialize;

/// Which items `list` shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, item: &DebtItem) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Open => item.status == DebtStatus::Open,
            StatusFilter::Completed => item.status == DebtStatus::Completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemAdded {
    #[serde(flatten)]
    pub item: DebtItem,
}

impl Output for ItemAdded {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Added debt item: {}\nDescription: {}",
            self.item.id, self.item.description
        )
    }
}

pub fn add<B: StorageBackend>(manager: &mut Manager<B>, description: &str) -> Result<ItemAdded> {
    let item = manager.add(description)?;
    Ok(ItemAdded { item })
}

/// Result of `complete` or `reopen`.
#[derive(Debug, Serialize)]
pub struct StatusChanged {
    #[serde(flatten)]
    pub item: DebtItem,
    pub changed: bool,
}

impl From<StatusChange> for StatusChanged {
    fn from(change: StatusChange) -> Self {
        Self {
            item: change.item,
            changed: change.changed,
        }
    }
}

impl Output for StatusChanged {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        let verb = match (self.item.status, self.changed) {
            (DebtStatus::Completed, true) => "Completed debt item",
            (DebtStatus::Completed, false) => "Already completed",
            (DebtStatus::Open, true) => "Reopened debt item",
            (DebtStatus::Open, false) => "Already open",
        };
        format!(
            "{}: {}\nDescription: {}",
            verb, self.item.id, self.item.description
        )
    }
}

pub fn complete<B: StorageBackend>(
    manager: &mut Manager<B>,
    identifier: &str,
) -> Result<StatusChanged> {
    Ok(manager.complete(identifier)?.into())
}

pub fn reopen<B: StorageBackend>(
    manager: &mut Manager<B>,
    identifier: &str,
) -> Result<StatusChanged> {
    Ok(manager.reopen(identifier)?.into())
}

/// An item together with its 1-based position in the unfiltered collection.
#[derive(Debug, Serialize)]
pub struct ListedItem {
    pub index: usize,
    #[serde(flatten)]
    pub item: DebtItem,
}

#[derive(Debug, Serialize)]
pub struct ItemList {
    pub filter: StatusFilter,
    pub items: Vec<ListedItem>,
    pub count: usize,
    pub open: usize,
    pub completed: usize,
}

impl Output for ItemList {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        let mut lines = Vec::new();

        if self.items.is_empty() {
            match self.filter {
                StatusFilter::All => {
                    lines.push("No technical debt items found.".to_string());
                    lines.push("Use 'rusky add <description>' to add your first item.".to_string());
                }
                StatusFilter::Open => lines.push("No open items found.".to_string()),
                StatusFilter::Completed => lines.push("No completed items found.".to_string()),
            }
            return lines.join("\n");
        }

        lines.push(format!(
            "{:<4} {:<12} {:<20} {}",
            "IDX", "STATUS", "CREATED", "DESCRIPTION"
        ));
        lines.push("-".repeat(80));

        for entry in &self.items {
            let item = &entry.item;
            let status = if item.is_completed() {
                format!("{} {}", item.status.symbol(), item.status)
            } else {
                item.status.to_string()
            };
            let created = item
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string();

            let mut line = format!(
                "{:<4} {:<12} {:<20} {}",
                entry.index, status, created, item.description
            );
            if let Some(location) = item.location() {
                match item.comment_type {
                    Some(marker) => line.push_str(&format!("  {} [{}]", location, marker)),
                    None => line.push_str(&format!("  {}", location)),
                }
            }
            lines.push(line);
        }

        lines.push(String::new());
        lines.push(format!(
            "Total: {} items ({} open, {} completed)",
            self.count, self.open, self.completed
        ));
        lines.join("\n")
    }
}

pub fn list<B: StorageBackend>(manager: &Manager<B>, filter: StatusFilter) -> Result<ItemList> {
    let items: Vec<ListedItem> = manager
        .list()?
        .into_iter()
        .enumerate()
        .filter(|(_, item)| filter.matches(item))
        .map(|(idx, item)| ListedItem {
            index: idx + 1,
            item,
        })
        .collect();

    let completed = items.iter().filter(|e| e.item.is_completed()).count();
    Ok(ItemList {
        filter,
        count: items.len(),
        open: items.len() - completed,
        completed,
        items,
    })
}
