//! # mk-config
//!
//! Layered configuration loading for modelkit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MKIT_*` prefix, `__` as separator)
//! 2. An explicit file passed by the caller (e.g. `mkit --config`)
//! 3. Project-level `.modelkit/config.toml`
//! 4. User-level `~/.config/modelkit/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MKIT_VALIDATION__COERCION` -> `validation.coercion`,
//! `MKIT_OUTPUT__PRETTY` -> `output.pretty`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use mk_config::MkConfig;
//!
//! let config = MkConfig::load_with_dotenv().expect("config");
//! let opts = config.validation.options();
//! ```

mod error;
mod output;
mod validation;

pub use error::ConfigError;
pub use output::OutputConfig;
pub use validation::ValidationConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "MKIT_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MkConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl MkConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed or a value has
    /// the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment(None).extract().map_err(ConfigError::from)
    }

    /// Load configuration, merging `file` above the standard TOML layers.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if `file` does not exist, plus every
    /// case listed on [`Self::load`].
    pub fn load_from(file: &Path) -> Result<Self, ConfigError> {
        Self::figment(Some(file)).extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// [`Self::load_from`] with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load_from`].
    pub fn load_from_with_dotenv(file: &Path) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load_from(file)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can extract from it directly or add providers on top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".modelkit/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Caller-supplied file, which must exist
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("modelkit").join("config.toml"))
    }
}
