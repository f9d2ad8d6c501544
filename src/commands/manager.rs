//! Business logic over the debt item collection.
//!
//! Every operation loads the whole collection from the backend, applies its
//! change and writes the whole collection back. Callers construct one
//! `Manager` per command invocation (or per interactive session) and pass it
//! explicitly to whatever needs it.

use crate::models::{DebtItem, ScanResult};
use crate::storage::StorageBackend;
use crate::{Error, Result};

/// Outcome of a status transition on one item.
#[derive(Debug, Clone)]
pub struct StatusChange {
    /// The item after the transition
    pub item: DebtItem,
    /// False when the item already had the requested status
    pub changed: bool,
}

/// Debt item manager over an injected storage backend.
pub struct Manager<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> Manager<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Append a new open item. The description must be non-empty exactly as
    /// given; nothing is persisted on failure.
    pub fn add(&mut self, description: &str) -> Result<DebtItem> {
        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        let mut items = self.backend.load()?;
        let item = DebtItem::new(description);
        items.push(item.clone());
        self.backend.save(&items)?;

        tracing::debug!(id = %item.id, "added item");
        Ok(item)
    }

    /// Mark the item matching `identifier` completed.
    ///
    /// Completing an already completed item changes nothing and does not
    /// rewrite the collection.
    pub fn complete(&mut self, identifier: &str) -> Result<StatusChange> {
        self.transition(identifier, DebtItem::complete)
    }

    /// Mark the item matching `identifier` open again.
    pub fn reopen(&mut self, identifier: &str) -> Result<StatusChange> {
        self.transition(identifier, DebtItem::reopen)
    }

    /// The full collection in storage order.
    pub fn list(&self) -> Result<Vec<DebtItem>> {
        self.backend.load()
    }

    /// Replace the persisted collection.
    pub fn save(&mut self, items: &[DebtItem]) -> Result<()> {
        self.backend.save(items)
    }

    /// Append one open, scanned item per finding in a single write.
    pub fn import(&mut self, results: &[ScanResult]) -> Result<Vec<DebtItem>> {
        let mut items = self.backend.load()?;
        let imported: Vec<DebtItem> = results.iter().map(DebtItem::from_scan).collect();
        if imported.is_empty() {
            return Ok(imported);
        }

        items.extend(imported.iter().cloned());
        self.backend.save(&items)?;

        tracing::debug!(count = imported.len(), "imported scan results");
        Ok(imported)
    }

    /// Where the collection is stored.
    pub fn location(&self) -> String {
        self.backend.location()
    }

    fn transition(
        &mut self,
        identifier: &str,
        apply: fn(&mut DebtItem) -> bool,
    ) -> Result<StatusChange> {
        let mut items = self.backend.load()?;
        let idx = find_index(&items, identifier)
            .ok_or_else(|| Error::NotFound(identifier.to_string()))?;

        let changed = apply(&mut items[idx]);
        if changed {
            self.backend.save(&items)?;
        }

        Ok(StatusChange {
            item: items[idx].clone(),
            changed,
        })
    }
}

/// Resolve an id or a 1-based position in load order. An id match always
/// takes precedence over a position.
pub fn find_index(items: &[DebtItem], identifier: &str) -> Option<usize> {
    if let Some(idx) = items.iter().position(|item| item.id == identifier) {
        return Some(idx);
    }

    match identifier.parse::<usize>() {
        Ok(n) if n >= 1 && n <= items.len() => Some(n - 1),
        _ => None,
    }
}
