//! Configuration for the `flashcards` binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "flashcards.toml";

/// Where "now" comes from when scheduling reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    /// Wall-clock time.
    #[default]
    System,
    /// The date stored in the database, moved forward with `advance-day`.
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorConfig {
    /// SQLite file holding card collections.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    /// Owner used when `--owner` is not given.
    #[serde(default = "default_owner")]
    pub default_owner: String,
    /// Maximum number of cards listed by `due`.
    #[serde(default = "default_due_limit")]
    pub due_limit: usize,
    #[serde(default)]
    pub clock: ClockMode,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("db.sqlite3")
}
fn default_owner() -> String {
    "default".to_string()
}
fn default_due_limit() -> usize {
    10
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            default_owner: default_owner(),
            due_limit: default_due_limit(),
            clock: ClockMode::default(),
        }
    }
}

/// Load config from an explicit path, or `flashcards.toml` in the current directory.
///
/// Environment variable overrides: `FLASHCARDS_DB`, `FLASHCARDS_OWNER`.
pub fn load_config_from(path: Option<&Path>) -> Result<TutorConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => Some(PathBuf::from(CONFIG_FILE_NAME)).filter(|local| local.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => TutorConfig::default(),
    };

    if let Ok(db) = std::env::var("FLASHCARDS_DB") {
        config.database_path = PathBuf::from(db);
    }
    if let Ok(owner) = std::env::var("FLASHCARDS_OWNER") {
        config.default_owner = owner;
    }

    Ok(config)
}

pub fn parse_config(content: &str) -> Result<TutorConfig> {
    Ok(toml::from_str(content)?)
}
