//! Storage backend trait.
//!
//! The item collection is the unit of persistence: backends load and save the
//! whole ordered sequence at once, never individual items.

use crate::Result;
use crate::models::DebtItem;

/// Trait for storage backends that persist the debt item collection.
pub trait StorageBackend {
    /// Load every item in storage order. A missing store is an empty collection.
    fn load(&self) -> Result<Vec<DebtItem>>;

    /// Replace the stored collection with `items`.
    fn save(&mut self, items: &[DebtItem]) -> Result<()>;

    /// Get the storage location description (for display purposes).
    fn location(&self) -> String;
}
