//! Rulebook configuration.
//!
//! [`RulebookLoader`] produces the [`RuleSettings`] a validator is built
//! with. The core crate never reads files or the environment itself.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables `LIBRIS_RULES__<FIELD>`
//! 2. Rulebook file (`[rules]` table, TOML)
//! 3. Built-in defaults (always present)
//!
//! ```toml
//! [rules]
//! max_items_per_loan = 4
//! reborrow_delta_days = 21
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use libris_core::domain::RuleSettings;
use serde::Deserialize;
use tracing::{debug, info};

const DEFAULT_ENV_PREFIX: &str = "LIBRIS";

/// Shape of the whole rulebook document; only `[rules]` is read.
#[derive(Debug, Deserialize)]
struct Rulebook {
    #[serde(default)]
    rules: RuleSettings,
}

/// Layered loader for lending rules.
#[derive(Debug, Clone)]
pub struct RulebookLoader {
    file: Option<PathBuf>,
    env_prefix: String,
    env_source: Option<config::Map<String, String>>,
    load_dotenv: bool,
}

impl Default for RulebookLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RulebookLoader {
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: DEFAULT_ENV_PREFIX.into(),
            env_source: None,
            load_dotenv: false,
        }
    }

    /// Read this file instead of the default location. The file must exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Resolve overrides from this map instead of the process environment.
    pub fn with_env_source<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_source = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Load a `.env` file from the working directory before reading variables.
    pub fn with_dotenv(mut self, enabled: bool) -> Self {
        self.load_dotenv = enabled;
        self
    }

    /// Path to the default rulebook.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `libris.toml` in the current directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("org", "libris", "libris")
            .map(|d| d.config_dir().join("libris.toml"))
            .unwrap_or_else(|| PathBuf::from("libris.toml"))
    }

    /// Build and validate the settings.
    pub fn load(&self) -> anyhow::Result<RuleSettings> {
        if self.load_dotenv {
            match dotenvy::dotenv() {
                Ok(path) => debug!(path = %path.display(), "Loaded .env"),
                Err(e) => debug!(error = %e, "No .env loaded"),
            }
        }

        let (path, required) = match &self.file {
            Some(path) => (path.clone(), true),
            None => (Self::default_path(), false),
        };

        let rules = self
            .read(&path, required)
            .with_context(|| format!("Failed to load rulebook from {}", path.display()))?;

        rules.validate().context("Rulebook contains an invalid setting")?;

        info!(
            path = %path.display(),
            max_items_per_loan = rules.max_items_per_loan,
            max_items_per_day = rules.max_items_per_day,
            period_days = rules.period_days,
            "Rulebook loaded"
        );
        Ok(rules)
    }

    fn read(&self, path: &Path, required: bool) -> Result<RuleSettings, config::ConfigError> {
        let mut builder = Config::builder();
        for (name, value) in RuleSettings::default().entries() {
            builder = builder.set_default(format!("rules.{name}"), i64::from(value))?;
        }

        let environment = Environment::with_prefix(&self.env_prefix)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(self.env_source.clone());

        let rulebook: Rulebook = builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        Ok(rulebook.rules)
    }
}
