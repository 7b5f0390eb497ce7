//! # Snippets - personal snippet manager
//!
//! Stores text snippets tagged with a language and free-form tags in an
//! embedded `redb` file.
//!
//! Snippets provides:
//! - A `Snippet` record with a JSON codec
//! - A transactional store with lookups by id, language and tag
//! - Content sources (file, clipboard, stdin) for the CLI
//! - TOML configuration and terminal output helpers

pub mod snippet;
pub mod storage;
pub mod source;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use snippet::Snippet;
pub use source::ContentSource;
pub use storage::{SnippetStore, StoreStats};

/// Result type alias for snippet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for snippet operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] redb::Error),

    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snippet: {0}")]
    InvalidSnippet(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Snippet not found: {0}")]
    SnippetNotFound(u64),
}

// redb reports each phase (open, begin, table, read/write, commit) with its own
// error type; all of them fold into `redb::Error`.
macro_rules! storage_error_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Error {
                fn from(err: $ty) -> Self {
                    Error::Storage(err.into())
                }
            }
        )*
    };
}

storage_error_from!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);
