//! Table definitions and key derivation

use crate::snippet::{KEY_SEPARATOR, Snippet};
use redb::TableDefinition;
use std::collections::BTreeSet;

/// Primary and index copies of every snippet, keyed by `id`, `language:id` or `tag:id`
pub const SNIPPETS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("snippets");

/// Per-database counters
pub const META_TABLE: TableDefinition<&str, u64> = TableDefinition::new("snippets_meta");

/// Key of the id sequence in `META_TABLE`
pub const SEQUENCE_KEY: &str = "sequence";

/// Primary key: the decimal id alone
pub fn primary_key(id: u64) -> String {
    id.to_string()
}

/// Index key for a language or tag value
pub fn index_key(value: &str, id: u64) -> String {
    format!("{}{}{}", value, KEY_SEPARATOR, id)
}

/// Prefix shared by every index key of `value`.
///
/// Ends with the separator so that `go` never matches `gopher:3`.
pub fn scan_prefix(value: &str) -> String {
    format!("{}{}", value, KEY_SEPARATOR)
}

/// Primary keys never contain the separator
pub fn is_primary_key(key: &str) -> bool {
    !key.contains(KEY_SEPARATOR)
}

/// Every key a stored snippet is written under.
///
/// A tag equal to the language yields the same key, so the set may hold
/// fewer than `2 + tags` entries.
pub fn keys_for(snippet: &Snippet) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    keys.insert(primary_key(snippet.id));
    keys.insert(index_key(&snippet.language, snippet.id));
    for tag in &snippet.tags {
        keys.insert(index_key(tag, snippet.id));
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_keys_for() {
        let mut snippet = Snippet::new("Hello world", "go", "", Utc::now(), ["basic", "beginner"]);
        snippet.id = 12;

        let keys: Vec<_> = keys_for(&snippet).into_iter().collect();
        assert_eq!(keys, vec!["12", "basic:12", "beginner:12", "go:12"]);
    }

    #[test]
    fn test_tag_equal_to_language_shares_key() {
        let mut snippet = Snippet::new("t", "go", "", Utc::now(), ["go"]);
        snippet.id = 3;
        assert_eq!(keys_for(&snippet).len(), 2);
    }

    #[test]
    fn test_key_shapes() {
        assert_eq!(primary_key(10), "10");
        assert_eq!(index_key("rust", 10), "rust:10");
        assert_eq!(scan_prefix("go"), "go:");
        assert!(is_primary_key("10"));
        assert!(!is_primary_key("go:10"));
        assert!(!index_key("gopher", 3).starts_with(&scan_prefix("go")));
    }
}
