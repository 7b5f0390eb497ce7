use crate::snippet::Snippet;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;
use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Status lines are hidden when `SNIPPETS_QUIET` is `1` or `true`; data output is not.
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("SNIPPETS_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::SNIPPET, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

/// `[id] - title`
pub fn snippet_line(snippet: &Snippet) -> String {
    format!("[{}] - {}", snippet.id.style(theme().id.clone()), snippet.title)
}

/// `[id] - title (language) #tag ...`
pub fn snippet_summary(snippet: &Snippet) -> String {
    let mut line = format!(
        "{} ({})",
        snippet_line(snippet),
        snippet.language.style(theme().language.clone())
    );
    for tag in &snippet.tags {
        line.push_str(&format!(" {}", format!("#{}", tag).style(theme().tag.clone())));
    }
    line
}
