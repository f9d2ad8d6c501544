//! JSON file storage backend.
//!
//! Stores the whole item collection as a single pretty-printed JSON document:
//!
//! ```json
//! {
//!   "version": "0.2.0",
//!   "items": [ { "id": "...", "description": "...", "status": "open", ... } ]
//! }
//! ```
//!
//! Writes go to a temporary file in the same directory which is then renamed
//! over the target, so readers never observe a half-written document. There is
//! no locking: concurrent writers race and the last rename wins.

use super::backend::StorageBackend;
use crate::models::DebtItem;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Document version written before scanned items existed.
pub const VERSION_0_1_0: &str = "0.1.0";

/// Document version that introduced provenance fields.
pub const VERSION_0_2_0: &str = "0.2.0";

/// Version tag written on every save.
pub const CURRENT_VERSION: &str = VERSION_0_2_0;

/// On-disk layout of the item file.
#[derive(Debug, Serialize, Deserialize)]
struct ItemDocument {
    #[serde(default)]
    version: String,
    #[serde(default)]
    items: Vec<DebtItem>,
}

/// Storage backend backed by one JSON file.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<DebtItem>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "item file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let document: ItemDocument =
            serde_json::from_str(&data).map_err(|source| Error::Parse {
                path: self.path.clone(),
                source,
            })?;

        // Older documents only lack optional fields, which default on read.
        // An untagged document is read the same way.
        let known = [VERSION_0_1_0, VERSION_0_2_0];
        if !document.version.is_empty() && !known.contains(&document.version.as_str()) {
            tracing::warn!(
                path = %self.path.display(),
                version = %document.version,
                "unrecognized item file version, reading anyway"
            );
        }

        tracing::debug!(
            path = %self.path.display(),
            version = %document.version,
            count = document.items.len(),
            "loaded items"
        );
        Ok(document.items)
    }

    fn save(&mut self, items: &[DebtItem]) -> Result<()> {
        #[derive(Serialize)]
        struct DocumentRef<'a> {
            version: &'a str,
            items: &'a [DebtItem],
        }

        let json = serde_json::to_string_pretty(&DocumentRef {
            version: CURRENT_VERSION,
            items,
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        // NamedTempFile is created owner read/write only on Unix.
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!(path = %self.path.display(), count = items.len(), "saved items");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
