//! redb storage implementation

use std::fmt;
use std::path::{Path, PathBuf};
use redb::{Database, ReadableTable};
use serde::Serialize;
use crate::Result;
use crate::snippet::{decode, encode, Snippet};
use super::schema::{self, META_TABLE, SEQUENCE_KEY, SNIPPETS_TABLE};

/// redb-backed storage for snippets
pub struct SnippetStore {
    db: Database,
    path: Option<PathBuf>,
}

impl SnippetStore {
    /// Open a database file, creating it and its parent directory if needed
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Database::create(path)?;
        let store = Self { db, path: Some(path.to_path_buf()) };
        store.initialize_tables()?;
        tracing::debug!(path = %path.display(), "opened snippet store");
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let store = Self { db, path: None };
        store.initialize_tables()?;
        Ok(store)
    }

    /// Path of the backing file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Create both tables so read transactions never see them missing
    fn initialize_tables(&self) -> Result<()> {
        let txn = self.db.begin_write()?;
        txn.open_table(SNIPPETS_TABLE)?;
        txn.open_table(META_TABLE)?;
        txn.commit()?;
        Ok(())
    }

    // ========== Write Operations ==========

    /// Store a new snippet under its primary and index keys.
    ///
    /// The id comes from the database sequence and is written back into
    /// `snippet` only once the transaction has committed.
    pub fn create(&self, snippet: &mut Snippet) -> Result<u64> {
        snippet.validate()?;

        let txn = self.db.begin_write()?;
        let id = {
            let mut meta = txn.open_table(META_TABLE)?;
            let id = meta.get(SEQUENCE_KEY)?.map(|v| v.value()).unwrap_or(0) + 1;
            meta.insert(SEQUENCE_KEY, id)?;

            let mut stored = snippet.clone();
            stored.id = id;
            let encoded = encode(&stored)?;

            let mut table = txn.open_table(SNIPPETS_TABLE)?;
            for key in schema::keys_for(&stored) {
                table.insert(key.as_str(), encoded.as_slice())?;
            }
            id
        };
        txn.commit()?;

        snippet.id = id;
        tracing::info!(id, language = %snippet.language, tags = snippet.tags.len(), "created snippet");
        Ok(id)
    }

    /// Remove a snippet and all of its index copies.
    ///
    /// The stored record is read inside the same transaction, so the key set
    /// always matches the one written at creation. Returns the removed
    /// snippet, or `None` if the id was not present.
    pub fn delete(&self, id: u64) -> Result<Option<Snippet>> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut table = txn.open_table(SNIPPETS_TABLE)?;
            let existing = match table.get(schema::primary_key(id).as_str())? {
                Some(value) => Some(decode(value.value())?),
                None => None,
            };
            if let Some(snippet) = &existing {
                for key in schema::keys_for(snippet) {
                    table.remove(key.as_str())?;
                }
            }
            existing
        };
        txn.commit()?;

        match &removed {
            Some(_) => tracing::info!(id, "deleted snippet"),
            None => tracing::debug!(id, "delete of absent snippet"),
        }
        Ok(removed)
    }

    // ========== Read Operations ==========

    /// Get a snippet by id
    pub fn get_by_id(&self, id: u64) -> Result<Option<Snippet>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(SNIPPETS_TABLE)?;
        let snippet = match table.get(schema::primary_key(id).as_str())? {
            Some(value) => Some(decode(value.value())?),
            None => None,
        };
        tracing::debug!(id, found = snippet.is_some(), "lookup by id");
        Ok(snippet)
    }

    /// Find snippets written in `language`, ascending by id
    pub fn list_by_language(&self, language: &str) -> Result<Vec<Snippet>> {
        let mut snippets = self.scan_index(language)?;
        snippets.retain(|s| s.language == language);
        Ok(snippets)
    }

    /// Find snippets carrying `tag`, ascending by id
    pub fn list_by_tag(&self, tag: &str) -> Result<Vec<Snippet>> {
        let mut snippets = self.scan_index(tag)?;
        snippets.retain(|s| s.tags.contains(tag));
        Ok(snippets)
    }

    /// All stored snippets, ascending by id
    pub fn list_all(&self) -> Result<Vec<Snippet>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(SNIPPETS_TABLE)?;

        let mut snippets = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            if schema::is_primary_key(key.value()) {
                snippets.push(decode(value.value())?);
            }
        }
        snippets.sort_by_key(|s| s.id);
        Ok(snippets)
    }

    /// Ordered scan over every key starting with `value:`.
    ///
    /// Languages and tags share the key space, so callers filter the result
    /// by the attribute they asked for. Keys sort lexicographically (`go:10`
    /// before `go:2`); the result is re-sorted by numeric id.
    fn scan_index(&self, value: &str) -> Result<Vec<Snippet>> {
        let prefix = schema::scan_prefix(value);
        let txn = self.db.begin_read()?;
        let table = txn.open_table(SNIPPETS_TABLE)?;

        let mut snippets = Vec::new();
        for entry in table.range(prefix.as_str()..)? {
            let (key, value) = entry?;
            if !key.value().starts_with(prefix.as_str()) {
                break;
            }
            snippets.push(decode(value.value())?);
        }
        snippets.sort_by_key(|s| s.id);
        tracing::debug!(prefix = %prefix, matches = snippets.len(), "prefix scan");
        Ok(snippets)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<StoreStats> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(SNIPPETS_TABLE)?;
        let meta = txn.open_table(META_TABLE)?;

        let mut stats = StoreStats {
            snippets: 0,
            keys: 0,
            last_id: meta.get(SEQUENCE_KEY)?.map(|v| v.value()).unwrap_or(0),
        };
        for entry in table.iter()? {
            let (key, _) = entry?;
            stats.keys += 1;
            if schema::is_primary_key(key.value()) {
                stats.snippets += 1;
            }
        }
        Ok(stats)
    }
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Stored snippets (primary keys)
    pub snippets: usize,
    /// Physical keys, primary and index
    pub keys: usize,
    /// Last id handed out by the sequence
    pub last_id: u64,
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Snippets: {}", self.snippets)?;
        writeln!(f, "  Keys: {}", self.keys)?;
        write!(f, "  Last id: {}", self.last_id)
    }
}
