//! Configuration file support for loam.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `LOAM_`, e.g., `LOAM_DATABASE_URL`)
//! 3. Config file (~/.config/loam/config.toml or ./loam.toml)
//! 4. Built-in defaults
//!
//! The database URL defaults to `sqlite://~/.local/state/loam/loam.db` on
//! Linux (using the XDG state directory) if not explicitly configured.
//!
//! Example config file:
//! ```toml
//! [database]
//! url = "sqlite://~/.local/state/loam/loam.db"  # optional, this is the default
//!
//! [github]
//! token = "ghp_..."  # or use LOAM_GITHUB_TOKEN env var
//!
//! [sync]
//! max_files = 500
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// GitHub configuration.
    pub github: GitHubConfig,
    /// Default sync options.
    pub sync: SyncConfig,
}

/// Database configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL.
    /// Supports sqlite:// and postgres:// schemes.
    /// Defaults to `sqlite://~/.local/state/loam/loam.db` if not specified.
    pub url: Option<String>,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token.
    /// Can also be set via LOAM_GITHUB_TOKEN environment variable.
    pub token: Option<String>,
}

/// Default sync options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Maximum number of files to mirror per sync.
    pub max_files: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_files: loam::sync::DEFAULT_MAX_FILES,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/loam/config.toml)
    /// 3. Local config file (./loam.toml)
    /// 4. Environment variables with LOAM_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(proj_dirs) = ProjectDirs::from("", "", "loam") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        // Local config file overrides the XDG one
        let local_config = PathBuf::from("loam.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./loam.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // LOAM_ prefixed environment variables,
        // e.g. LOAM_DATABASE_URL -> database.url
        builder = builder.add_source(
            Environment::with_prefix("LOAM")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the database URL, falling back to the default state directory path.
    ///
    /// The `mode=rwc` parameter enables read-write access and creates the
    /// file if it doesn't exist.
    pub fn database_url(&self) -> Option<String> {
        self.database.url.clone().or_else(|| {
            Self::default_state_dir().map(|state_dir| {
                let db_path = state_dir.join("loam.db");
                format!("sqlite://{}?mode=rwc", db_path.display())
            })
        })
    }

    /// Get the GitHub token.
    #[cfg(feature = "github")]
    pub fn github_token(&self) -> Option<String> {
        self.github.token.clone()
    }

    /// Get the default state directory path.
    ///
    /// On Linux, this is `$XDG_STATE_HOME/loam` or `~/.local/state/loam`.
    /// On macOS/Windows, falls back to the data directory.
    pub fn default_state_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "loam").map(|dirs| {
            // state_dir() returns None on macOS/Windows, fall back to data_dir
            dirs.state_dir()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| dirs.data_dir().to_path_buf())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.sync.max_files, 500);
        assert!(config.database.url.is_none());
        assert!(config.github.token.is_none());
    }

    #[test]
    fn toml_string_parses() {
        let toml_content = r#"
            [database]
            url = "sqlite:///tmp/test.db"

            [github]
            token = "ghp_test123"

            [sync]
            max_files = 50
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();
        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(
            config.database.url,
            Some("sqlite:///tmp/test.db".to_string())
        );
        assert_eq!(config.github.token, Some("ghp_test123".to_string()));
        assert_eq!(config.sync.max_files, 50);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let toml_content = r#"
            [sync]
            max_files = 10
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();
        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(config.sync.max_files, 10);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn database_url_defaults_to_state_dir() {
        let config = Config::default();
        let url = config.database_url().expect("default url");
        assert!(url.starts_with("sqlite://"));
        assert!(url.contains("loam.db"));
        assert!(url.ends_with("?mode=rwc"));
    }

    #[test]
    fn database_url_respects_configured_value() {
        let toml_content = r#"
            [database]
            url = "postgres://localhost/loam"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();
        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(
            config.database_url(),
            Some("postgres://localhost/loam".to_string())
        );
    }
}
