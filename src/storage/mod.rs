//! Storage Layer - redb-backed persistence
//!
//! One database file with two tables:
//! - snippets(key -> encoded snippet), keys `id`, `language:id`, `tag:id`
//! - snippets_meta(name -> u64), holding the id sequence

pub mod schema;
pub mod store;

pub use store::{SnippetStore, StoreStats};
