use crate::{emit_success, OutputMode};
use chrono::Utc;
use snippets::config::{self, SnippetsConfig};
use snippets::ui;
use snippets::{ContentSource, Error, Snippet, SnippetStore};
use std::path::PathBuf;

pub struct Context {
    pub output_mode: OutputMode,
    pub config: Option<SnippetsConfig>,
    pub config_path: Option<PathBuf>,
    pub db: Option<PathBuf>,
}

impl Context {
    fn open_store(&self) -> anyhow::Result<SnippetStore> {
        let path = config::resolve_database_path(self.db.clone(), self.config.as_ref());
        tracing::debug!(path = %path.display(), "opening database");
        Ok(SnippetStore::open(&path)?)
    }
}

/// Split a comma-separated tag list, dropping blanks
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

pub fn run_create(
    ctx: &Context,
    title: String,
    language: String,
    file: Option<PathBuf>,
    clipboard: bool,
    tags: Option<String>,
) -> anyhow::Result<()> {
    let source = ContentSource::from_flags(file, clipboard)
        .ok_or_else(|| anyhow::anyhow!("a content source is required: --file <PATH> or --clipboard"))?;
    let content = source.read()?;

    let mut snippet = Snippet::new(title, language, content, Utc::now(), parse_tags(tags.as_deref()));
    // Reject bad input before the database file is created or locked.
    snippet.validate()?;

    let store = ctx.open_store()?;
    let id = store.create(&mut snippet)?;

    if ctx.output_mode.is_human() {
        ui::success(&format!("Created {}", ui::snippet_line(&snippet)));
        ui::info("Source", &source.describe());
        if let Some(path) = store.path() {
            ui::info("Database", &path.display().to_string());
        }
    } else {
        emit_success("create", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

pub fn run_view(
    ctx: &Context,
    id: Option<u64>,
    language: Option<String>,
    tag: Option<String>,
) -> anyhow::Result<()> {
    let store = ctx.open_store()?;

    let snippets = match (id, language, tag) {
        (Some(id), _, _) => {
            let snippet = store.get_by_id(id)?.ok_or(Error::SnippetNotFound(id))?;
            if ctx.output_mode.is_human() {
                println!("{}", snippet.content);
            } else {
                emit_success("view", serde_json::to_value(&snippet)?)?;
            }
            return Ok(());
        }
        (None, Some(language), _) => store.list_by_language(&language)?,
        (None, None, Some(tag)) => store.list_by_tag(&tag)?,
        (None, None, None) => anyhow::bail!("nothing to view: pass --id, --language or --tag"),
    };

    if ctx.output_mode.is_human() {
        if snippets.is_empty() {
            ui::warn("No snippets found");
        }
        for snippet in &snippets {
            println!("{}", ui::snippet_line(snippet));
        }
    } else {
        emit_success("view", serde_json::to_value(&snippets)?)?;
    }
    Ok(())
}

pub fn run_list(ctx: &Context) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let snippets = store.list_all()?;

    if ctx.output_mode.is_human() {
        if snippets.is_empty() {
            ui::warn("No snippets stored yet");
        }
        for snippet in &snippets {
            println!("{}", ui::snippet_summary(snippet));
        }
    } else {
        emit_success("list", serde_json::to_value(&snippets)?)?;
    }
    Ok(())
}

pub fn run_delete(ctx: &Context, id: u64) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let removed = store.delete(id)?;

    if ctx.output_mode.is_human() {
        match &removed {
            Some(snippet) => ui::success(&format!("Deleted {}", ui::snippet_line(snippet))),
            None => ui::warn(&format!("Snippet {} not found, nothing deleted", id)),
        }
    } else {
        emit_success("delete", serde_json::json!({ "id": id, "deleted": removed.is_some() }))?;
    }
    Ok(())
}

pub fn run_stats(ctx: &Context) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let stats = store.stats()?;

    if ctx.output_mode.is_human() {
        ui::header("Snippet Statistics");
        if let Some(path) = store.path() {
            ui::info("Database", &ui::dim(&path.display().to_string()));
        }
        println!("{}", ui::stats_table(&stats));
    } else {
        emit_success("stats", serde_json::to_value(&stats)?)?;
    }
    Ok(())
}

pub fn run_init(ctx: &Context, database: Option<String>, force: bool) -> anyhow::Result<()> {
    let path = ctx.config_path.clone().unwrap_or_else(config::default_config_path);
    let database = database.unwrap_or_else(|| config::default_database_path().display().to_string());
    let new_config = SnippetsConfig { database: Some(database) };
    config::write_config(&path, &new_config, force)?;

    if ctx.output_mode.is_human() {
        ui::success(&format!("Wrote config to {}", path.display()));
        if let Some(db) = &new_config.database {
            ui::info("Database", db);
        }
    } else {
        emit_success("init", serde_json::json!({
            "config": path.display().to_string(),
            "database": new_config.database,
        }))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert!(parse_tags(None).is_empty());
        assert!(parse_tags(Some("")).is_empty());
        assert_eq!(parse_tags(Some("basic,beginner")), vec!["basic", "beginner"]);
        assert_eq!(parse_tags(Some(" basic , ,beginner,")), vec!["basic", "beginner"]);
    }
}
