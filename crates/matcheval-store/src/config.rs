//! Arena configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level matcheval configuration.
///
/// Every key has a default, so a missing or empty `matcheval.toml` still
/// yields a working setup that points at the directories `matcheval init`
/// creates. All values are immutable for one invocation; a change on disk
/// takes effect on the next run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Directory of source collections, one `;`-delimited CSV per collection.
    #[serde(default = "default_vacancies_dir")]
    pub vacancies_dir: PathBuf,
    /// Directory the rating ledgers are written to, one file per collection.
    #[serde(default = "default_ledger_dir")]
    pub ledger_dir: PathBuf,
    /// Directory of vocabulary files supplying the known-subject set.
    #[serde(default = "default_vocabulary_dir")]
    pub vocabulary_dir: PathBuf,
    /// Per-collection cap on queue candidates.
    #[serde(default = "default_evaluate_limit")]
    pub evaluate_limit: usize,
    /// Rating scale size K; accepted scores are 1..=K.
    #[serde(default = "default_rating_scale")]
    pub rating_scale: u8,
    /// Whether the left/right table assignment is randomized per record.
    #[serde(default = "default_true")]
    pub randomize_sides: bool,
    /// Headers for the full-detail table; the single-column side uses only
    /// the first.
    #[serde(default = "default_result_headers")]
    pub result_headers: Vec<String>,
    /// 1-based sub-field indices extracted from the structured payload.
    /// Empty keeps every sub-field.
    #[serde(default = "default_structured_fields")]
    pub structured_fields: Vec<usize>,
    /// Column holding subject names in the vocabulary files.
    #[serde(default = "default_subject_column")]
    pub subject_column: String,
}

fn default_vacancies_dir() -> PathBuf {
    PathBuf::from("data/vacancies")
}
fn default_ledger_dir() -> PathBuf {
    PathBuf::from("data/arena")
}
fn default_vocabulary_dir() -> PathBuf {
    PathBuf::from("data/subjects")
}
fn default_evaluate_limit() -> usize {
    10
}
fn default_rating_scale() -> u8 {
    10
}
fn default_true() -> bool {
    true
}
fn default_result_headers() -> Vec<String> {
    vec!["Course".to_string(), "University".to_string()]
}
fn default_structured_fields() -> Vec<usize> {
    vec![2, 3]
}
fn default_subject_column() -> String {
    "Subject".to_string()
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            vacancies_dir: default_vacancies_dir(),
            ledger_dir: default_ledger_dir(),
            vocabulary_dir: default_vocabulary_dir(),
            evaluate_limit: default_evaluate_limit(),
            rating_scale: default_rating_scale(),
            randomize_sides: true,
            result_headers: default_result_headers(),
            structured_fields: default_structured_fields(),
            subject_column: default_subject_column(),
        }
    }
}

impl ArenaConfig {
    /// The structured-payload extract indices, or `None` when every
    /// sub-field should be kept.
    pub fn extract_fields(&self) -> Option<&[usize]> {
        if self.structured_fields.is_empty() {
            None
        } else {
            Some(&self.structured_fields)
        }
    }
}

/// Loads configuration from well-known paths.
///
/// Search order:
/// 1. `matcheval.toml` in the current directory
/// 2. `~/.config/matcheval/config.toml`
///
/// Environment override: `MATCHEVAL_LEDGER_DIR` replaces `ledger_dir`.
pub fn load_config() -> Result<ArenaConfig> {
    load_config_from(None)
}

/// Loads config from an explicit path, or searches the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ArenaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("matcheval.toml");
        if local.exists() {
            Some(local)
        } else if let Some(global) = global_config_path() {
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ArenaConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ArenaConfig::default(),
    };

    apply_env_overrides(&mut config);

    anyhow::ensure!(config.rating_scale >= 1, "rating_scale must be at least 1");
    anyhow::ensure!(config.evaluate_limit >= 1, "evaluate_limit must be at least 1");

    Ok(config)
}

fn apply_env_overrides(config: &mut ArenaConfig) {
    if let Ok(dir) = std::env::var("MATCHEVAL_LEDGER_DIR") {
        if !dir.is_empty() {
            config.ledger_dir = PathBuf::from(dir);
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("matcheval").join("config.toml"))
}
