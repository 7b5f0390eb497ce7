//! Content sources for new snippets

use crate::{Error, Result};
use std::io::Read;
use std::path::PathBuf;

/// Where the body of a new snippet is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// A file on disk
    File(PathBuf),
    /// Standard input, selected with the path `-`
    Stdin,
    /// The system clipboard
    Clipboard,
}

impl ContentSource {
    /// Pick a source from CLI flags; the clipboard wins over a file path.
    pub fn from_flags(file: Option<PathBuf>, clipboard: bool) -> Option<Self> {
        if clipboard {
            return Some(ContentSource::Clipboard);
        }
        file.map(|path| {
            if path.as_os_str() == "-" {
                ContentSource::Stdin
            } else {
                ContentSource::File(path)
            }
        })
    }

    /// Read the full content as text
    pub fn read(&self) -> Result<String> {
        match self {
            ContentSource::File(path) => {
                tracing::debug!(path = %path.display(), "reading snippet from file");
                Ok(std::fs::read_to_string(path)?)
            }
            ContentSource::Stdin => {
                let mut content = String::new();
                std::io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
            ContentSource::Clipboard => {
                let mut clipboard =
                    arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
                clipboard.get_text().map_err(|e| Error::Clipboard(e.to_string()))
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ContentSource::File(path) => path.display().to_string(),
            ContentSource::Stdin => "stdin".to_string(),
            ContentSource::Clipboard => "clipboard".to_string(),
        }
    }
}
