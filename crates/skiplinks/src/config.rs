//! Configuration management for skiplinks.
//!
//! This module provides the settings consulted by the renderer and checker,
//! an explicit store to hold them, and loading from TOML files and
//! environment variables using figment.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::route::RouteId;

/// Default project configuration file name.
pub const PROJECT_CONFIG_FILE_NAME: &str = "skiplinks.toml";

/// Default user configuration file name.
const USER_CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the user configuration directory.
const CONFIG_DIR_NAME: &str = "skiplinks";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "SKIPLINKS_";

/// Skip links settings.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `SKIPLINKS_`)
/// 2. Project config file (`./skiplinks.toml` or an explicit path)
/// 3. User config file at `~/.config/skiplinks/config.toml`
/// 4. Default values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Routes exempt from the skip links presence check, formatted
    /// `<controller>#<action>`.
    pub whitelisted_routes: Vec<String>,
    /// Skip the presence check entirely, even in test execution.
    pub disable_validation: bool,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom project config path.
    ///
    /// Whitelist entries are not rejected; malformed ones are logged.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let project_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::load_layers(&Self::user_config_path(), &project_file)
    }

    /// Load configuration from an explicit user file and project file.
    ///
    /// Precedence, lowest first: defaults, `user_file`, `project_file`,
    /// `SKIPLINKS_` environment variables. Missing files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a file or variable can't be parsed.
    pub fn load_layers(user_file: &Path, project_file: &Path) -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(user_file))
            .merge(Toml::file(project_file))
            .merge(Env::prefixed(ENV_PREFIX));

        let config: Config = figment.extract()?;
        for route in config.malformed_routes() {
            warn!(route = %route, "Whitelisted route is not of the form <controller>#<action>");
        }
        Ok(config)
    }

    /// Load configuration and reject malformed whitelist entries.
    ///
    /// # Errors
    ///
    /// Returns a load error, or [`Error::ConfigValidation`] from
    /// [`Config::validate`].
    pub fn load_validated(config_path: Option<PathBuf>) -> Result<Self> {
        let config = Self::load_from(config_path)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default project configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from(PROJECT_CONFIG_FILE_NAME)
    }

    /// Get the user configuration file path.
    #[must_use]
    pub fn user_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(USER_CONFIG_FILE_NAME)
    }

    /// Whitelist entries that are not of the form `<controller>#<action>`.
    #[must_use]
    pub fn malformed_routes(&self) -> Vec<&str> {
        self.whitelisted_routes
            .iter()
            .map(String::as_str)
            .filter(|route| !RouteId::is_well_formed(route))
            .collect()
    }

    /// Validate the configuration strictly.
    ///
    /// Loading never calls this; it backs `skiplinks config validate`.
    ///
    /// # Errors
    ///
    /// Returns an error naming every malformed whitelist entry.
    pub fn validate(&self) -> Result<()> {
        let malformed = self.malformed_routes();
        if malformed.is_empty() {
            return Ok(());
        }
        Err(Error::ConfigValidation {
            message: format!(
                "whitelisted routes must be of the form <controller>#<action>: {}",
                malformed.join(", ")
            ),
        })
    }

    /// Check whether a route is exempt from the presence check.
    ///
    /// Matching is exact string equality.
    #[must_use]
    pub fn is_whitelisted(&self, route: &RouteId) -> bool {
        self.whitelisted_routes
            .iter()
            .any(|entry| entry == route.as_str())
    }
}

/// Holder for the active [`Config`].
///
/// Defaults are created on first access. Callers own the store and pass the
/// config it yields to the renderer and checker by reference.
#[derive(Debug, Default)]
pub struct ConfigStore {
    config: OnceCell<Config>,
}

impl ConfigStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a loaded configuration.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self {
            config: OnceCell::from(config),
        }
    }

    /// Current settings, creating defaults on first call.
    #[must_use]
    pub fn get(&self) -> &Config {
        self.config.get_or_init(Config::default)
    }

    /// Mutate the current settings in place.
    pub fn configure<F>(&mut self, mutator: F)
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.config.take().unwrap_or_default();
        mutator(&mut config);
        self.config = OnceCell::from(config);
    }

    /// Discard all prior mutations and restore defaults.
    pub fn reset(&mut self) {
        self.config = OnceCell::from(Config::default());
    }
}
