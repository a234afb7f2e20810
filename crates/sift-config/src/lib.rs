//! # sift-config
//!
//! Layered configuration loading for sift using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SIFT_*` prefix, `__` as separator)
//! 2. Project file: `sift.toml` in the working directory, or an explicit path
//! 3. User-level `~/.config/sift/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SIFT_GENERAL__THREADS` -> `general.threads`. Index
//! definitions are arrays of tables and only come from TOML files.
//!
//! # Usage
//!
//! ```no_run
//! use sift_config::SiftConfig;
//!
//! let config = SiftConfig::load_with_dotenv(None).expect("config");
//! for index in &config.indexes {
//!     println!("{} -> {}", index.name, index.output_path().display());
//! }
//! ```

mod error;
mod general;
mod index;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use index::IndexDefinition;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Project file looked up in the working directory when no path is given.
pub const PROJECT_FILE: &str = "sift.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiftConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default, rename = "index")]
    pub indexes: Vec<IndexDefinition>,
}

impl SiftConfig {
    /// Load configuration from all sources and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env`
    /// support.
    ///
    /// # Errors
    /// Fails when `path` is given but missing, when a source does not
    /// deserialize, or when [`Self::validate`] fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path
            && !path.exists()
        {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory, then [`Self::load`].
    ///
    /// # Errors
    /// See [`Self::load`].
    pub fn load_with_dotenv(path: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env is not an error.
        let _ = dotenvy::dotenv();
        Self::load(path)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project config
        let project = path.map_or_else(|| PathBuf::from(PROJECT_FILE), Path::to_path_buf);
        if project.exists() {
            figment = figment.merge(Toml::file(project));
        }

        // Layer 3: Environment variables
        figment.merge(Env::prefixed("SIFT_").split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sift").join("config.toml"))
    }

    /// Check every index definition and reject duplicate index names.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for index in &self.indexes {
            index.validate()?;
            if !seen.insert(index.name.as_str()) {
                return Err(ConfigError::DuplicateIndex {
                    name: index.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Look up an index definition by name.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownIndex`] if no index has that name.
    pub fn index(&self, name: &str) -> Result<&IndexDefinition, ConfigError> {
        self.indexes
            .iter()
            .find(|index| index.name == name)
            .ok_or_else(|| ConfigError::UnknownIndex {
                name: name.to_string(),
            })
    }

    /// The named indexes in the order given, or every index when `names` is
    /// empty.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownIndex`] for the first unknown name.
    pub fn select(&self, names: &[String]) -> Result<Vec<&IndexDefinition>, ConfigError> {
        if names.is_empty() {
            return Ok(self.indexes.iter().collect());
        }
        names.iter().map(|name| self.index(name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_indexes() {
        let config = SiftConfig::default();
        assert!(config.indexes.is_empty());
        assert!(config.general.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_index_is_reported_by_name() {
        let err = SiftConfig::default().index("crum").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownIndex { ref name } if name == "crum"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = SiftConfig::load(Some(Path::new("/nonexistent/sift.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }
}
