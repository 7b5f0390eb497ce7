use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = ".snippets.toml";
const DATABASE_FILE: &str = ".snippets.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SnippetsConfig {
    pub database: Option<String>,
}

fn home_or_cwd() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_config_path() -> PathBuf {
    home_or_cwd().join(CONFIG_FILE)
}

pub fn default_database_path() -> PathBuf {
    default_database_path_in(&home_or_cwd())
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(DATABASE_FILE)
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<SnippetsConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: SnippetsConfig = toml::from_str(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &SnippetsConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// `--db` flag, then the config file, then `~/.snippets.db`
pub fn resolve_database_path(flag: Option<PathBuf>, config: Option<&SnippetsConfig>) -> PathBuf {
    flag.or_else(|| config.and_then(|c| c.database.as_ref()).map(PathBuf::from))
        .unwrap_or_else(default_database_path)
}
