//! Layered runtime configuration.
//!
//! # Responsibility
//! - Resolve database and logging settings without code changes.
//! - Merge built-in defaults, an optional TOML file and environment variables.
//!
//! # Invariants
//! - Environment variables override file values, which override defaults.
//! - Nested keys use `__` in variable names (`CUSTREPO_DATABASE__PATH`).

use crate::logging::default_log_level;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "CUSTREPO";
const DEFAULT_DB_PATH: &str = "customers.db";
const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
/// SQLite takes the busy timeout as a C `int` of milliseconds.
const MAX_BUSY_TIMEOUT_MS: u32 = i32::MAX as u32;

/// Connection settings handed to the connection provider at construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DbConfig {
    /// SQLite database file.
    pub path: PathBuf,
    /// When `false`, a missing database file is a connection error.
    #[serde(default)]
    pub create_if_missing: bool,
    /// Values above `i32::MAX` are clamped when applied.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_if_missing: false,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.busy_timeout_ms.min(MAX_BUSY_TIMEOUT_MS)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    pub level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    pub database: DbConfig,
    pub logging: LogConfig,
}

impl AppConfig {
    /// Loads configuration using the default `CUSTREPO` environment prefix.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_prefix(file, ENV_PREFIX)
    }

    /// Loads configuration with an explicit environment prefix.
    ///
    /// # Errors
    /// - Returns an error when `file` is given but missing or malformed.
    /// - Returns an error when a merged value has the wrong type.
    pub fn load_with_prefix(file: Option<&Path>, env_prefix: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("database.path", DEFAULT_DB_PATH)?
            .set_default("database.create_if_missing", false)?
            .set_default(
                "database.busy_timeout_ms",
                i64::from(DEFAULT_BUSY_TIMEOUT_MS),
            )?
            .set_default("logging.level", default_log_level())?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<AppConfig>()
    }
}

fn default_busy_timeout_ms() -> u32 {
    DEFAULT_BUSY_TIMEOUT_MS
}
