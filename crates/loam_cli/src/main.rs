//! Loam CLI - command-line interface for the knowledge base mirror.

mod commands;
mod config;
mod progress;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "loam")]
#[command(version)]
#[command(about = "A personal knowledge base that mirrors repositories")]
#[command(
    long_about = "Loam registers sources (remote repositories, links, local folders) and \
mirrors their text files into a local database. Remote sources are synced from a \
GitHub-style hosting API: eligible files are filtered by type, size, and extension, \
fetched in bounded batches, and upserted so repeated syncs never duplicate rows."
)]
#[command(after_long_help = r#"EXAMPLES
    Mirror a repository's default branch:
        $ loam sync rust-lang/mdBook

    Mirror a specific branch, capped at 100 files:
        $ loam sync octocat/notes --branch drafts --max-files 100

    Register a source without mirroring file contents:
        $ loam sync octocat/notes --no-files

    List registered sources and their sync history:
        $ loam source list
        $ loam log list

    Generate shell completions:
        $ loam completions bash > ~/.local/share/bash-completion/completions/loam

CONFIGURATION
    Loam reads configuration from:
      1. ~/.config/loam/config.toml (or $XDG_CONFIG_HOME/loam/config.toml)
      2. Environment variables (LOAM_* prefix, e.g., LOAM_GITHUB_TOKEN)
      3. .env file in current directory

ENVIRONMENT VARIABLES
    LOAM_DATABASE_URL     Database connection string (default: ~/.local/state/loam/loam.db)
    LOAM_GITHUB_TOKEN     GitHub personal access token
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    #[cfg(feature = "migrate")]
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Mirror a remote repository into the knowledge base
    #[cfg(feature = "github")]
    Sync {
        /// Repository origin as owner/repo
        origin: String,

        /// Branch to sync (defaults to the repository's default branch)
        #[arg(short, long)]
        branch: Option<String>,

        /// Maximum number of files to mirror (default from config or 500)
        #[arg(short = 'm', long)]
        max_files: Option<usize>,

        /// Register the source without mirroring file contents
        #[arg(long)]
        no_files: bool,

        /// Overall deadline in seconds
        #[arg(short = 't', long)]
        timeout: Option<u64>,
    },
    /// Manage registered sources
    Source {
        #[command(subcommand)]
        action: SourceAction,
    },
    /// Inspect sync logs
    Log {
        #[command(subcommand)]
        action: LogAction,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Generate man page(s)
    Man {
        /// Output directory for man pages (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(feature = "migrate")]
#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Rollback the last migration
    Down,
    /// Show migration status
    Status,
    /// Fresh install - drop all tables and reapply migrations
    Fresh,
}

#[derive(Subcommand)]
enum SourceAction {
    /// List registered sources
    List,
    /// Delete a source and its mirrored files
    Delete {
        /// Source id (UUID) or origin (owner/repo)
        source: String,
    },
    /// Show a source's mirrored files
    Files {
        /// Source id (UUID) or origin (owner/repo)
        source: String,
    },
}

#[derive(Subcommand)]
enum LogAction {
    /// List sync logs, most recent first
    List {
        /// Only show logs for this origin (owner/repo)
        #[arg(short, long)]
        origin: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Structured logging only when not attached to a terminal; interactive
    // runs report through the progress printer instead.
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("loam=info,loam_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let config = config::Config::load();

    let cli = Cli::parse();

    // Handle commands that don't require database access first
    match &cli.command {
        Commands::Completions { shell } => {
            commands::meta::handle_completions(*shell)?;
            return Ok(());
        }
        Commands::Man { output } => {
            commands::meta::handle_man(output.clone())?;
            return Ok(());
        }
        _ => {}
    }

    let database_url = config
        .database_url()
        .ok_or("Failed to determine database URL")?;

    // Ensure the database directory exists for SQLite
    if database_url.starts_with("sqlite://") {
        let db_path = database_url.trim_start_matches("sqlite://");
        // Strip query parameters (e.g., ?mode=rwc) before path operations
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        let db_path = std::path::Path::new(db_path);

        if db_path.is_relative() && !db_path.as_os_str().is_empty() {
            tracing::warn!(
                "Database path '{}' is relative - behavior depends on current directory. \
                 Consider using an absolute path.",
                db_path.display()
            );
        }

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    match cli.command {
        #[cfg(feature = "migrate")]
        Commands::Migrate { action } => {
            commands::migrate::handle_migrate(action, &database_url).await?;
        }
        #[cfg(feature = "github")]
        Commands::Sync {
            origin,
            branch,
            max_files,
            no_files,
            timeout,
        } => {
            commands::sync::handle_sync(
                commands::sync::SyncArgs {
                    origin,
                    branch,
                    max_files,
                    no_files,
                    timeout,
                },
                &config,
                &database_url,
            )
            .await?;
        }
        Commands::Source { action } => {
            commands::source::handle_source(action, &database_url).await?;
        }
        Commands::Log { action } => {
            commands::log::handle_log(action, &database_url).await?;
        }
        Commands::Completions { .. } | Commands::Man { .. } => {}
    }

    Ok(())
}
