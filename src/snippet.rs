//! Snippet record and its byte codec
//!
//! A snippet is stored as self-describing JSON so that every physical copy
//! (primary and index keys) decodes without external metadata.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Character joining an index value to an id in storage keys.
pub const KEY_SEPARATOR: char = ':';

/// A stored code or text fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Store-assigned identifier, `0` until the snippet has been created
    pub id: u64,
    /// Short display title
    pub title: String,
    /// Language name, used as an index key
    pub language: String,
    /// Snippet body
    pub content: String,
    /// Free-form tags, each used as an index key
    pub tags: BTreeSet<String>,
    /// When the snippet was constructed
    pub created_at: DateTime<Utc>,
}

impl Snippet {
    /// Create an unstored snippet
    pub fn new<I, T>(
        title: impl Into<String>,
        language: impl Into<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
        tags: I,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            id: 0,
            title: title.into(),
            language: language.into(),
            content: content.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            created_at,
        }
    }

    /// Check the constraints that keep index keys unambiguous.
    ///
    /// Title and language must be non-empty; language and tags must not
    /// contain the key separator.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidSnippet("title must not be empty".to_string()));
        }
        check_index_value("language", &self.language)?;
        for tag in &self.tags {
            check_index_value("tag", tag)?;
        }
        Ok(())
    }

    /// Tags joined with commas, in stored order
    pub fn tags_joined(&self) -> String {
        self.tags.iter().map(String::as_str).collect::<Vec<_>>().join(",")
    }
}

fn check_index_value(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidSnippet(format!("{} must not be empty", field)));
    }
    if value.contains(KEY_SEPARATOR) {
        return Err(Error::InvalidSnippet(format!(
            "{} '{}' must not contain '{}'",
            field, value, KEY_SEPARATOR
        )));
    }
    Ok(())
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] - {}", self.id, self.title)
    }
}

/// Encode a snippet into its stored byte form
pub fn encode(snippet: &Snippet) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(snippet)?)
}

/// Decode a stored byte form back into a snippet
pub fn decode(bytes: &[u8]) -> Result<Snippet> {
    Ok(serde_json::from_slice(bytes)?)
}
