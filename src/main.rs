//! Snippet CLI - store and recall code snippets from the terminal

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "snippet")]
#[command(version)]
#[command(about = "Personal snippet manager - keep code fragments by language and tag")]
#[command(long_about = r#"
Snippet stores code fragments in a local database, indexed by language and tags.

Example usage:
  snippet create -t "Hello world" -l go -f hello.go --tags basic,beginner
  snippet create -t "From clipboard" -l rust -c
  snippet view --id 1
  snippet view -l go
  snippet view --tag basic
  snippet delete --id 1
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (defaults to ~/.snippets.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Path to the config file (defaults to ~/.snippets.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a new snippet
    Create {
        /// Snippet title
        #[arg(short, long)]
        title: String,

        /// Snippet language
        #[arg(short, long)]
        language: String,

        /// File to read the snippet from (`-` for stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Read the snippet from the clipboard
        #[arg(short, long)]
        clipboard: bool,

        /// Tags separated by commas
        #[arg(long)]
        tags: Option<String>,
    },

    /// Show a snippet by id, or list snippets by language or tag
    View {
        /// Snippet id
        #[arg(long, conflicts_with_all = ["language", "tag"])]
        id: Option<u64>,

        /// List snippets in this language
        #[arg(short, long, conflicts_with = "tag")]
        language: Option<String>,

        /// List snippets with this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// List every stored snippet
    List,

    /// Delete a snippet by id
    Delete {
        /// Snippet id
        #[arg(long)]
        id: u64,
    },

    /// Show statistics about the snippet database
    Stats,

    /// Write a config file
    Init {
        /// Database path to record in the config
        #[arg(long)]
        database: Option<String>,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Text
    }
}

/// Print a JSON envelope for machine-readable output
pub fn emit_success(command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    let envelope = serde_json::json!({
        "status": "ok",
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        snippets::ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = snippets::config::load_config(cli.config.as_deref())?;
    let ctx = commands::Context {
        output_mode: cli.format,
        config,
        config_path: cli.config,
        db: cli.db,
    };

    match cli.command {
        Commands::Create { title, language, file, clipboard, tags } => {
            commands::run_create(&ctx, title, language, file, clipboard, tags)
        }
        Commands::View { id, language, tag } => commands::run_view(&ctx, id, language, tag),
        Commands::List => commands::run_list(&ctx),
        Commands::Delete { id } => commands::run_delete(&ctx, id),
        Commands::Stats => commands::run_stats(&ctx),
        Commands::Init { database, force } => commands::run_init(&ctx, database, force),
    }
}
