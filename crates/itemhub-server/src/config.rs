//! Server settings, read from the environment

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "../frontend";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// `DATABASE_URL`; selects persistent storage when non-empty
    #[serde(default)]
    pub database_url: Option<String>,
    /// `BIND_HOST`; interface to listen on
    pub bind_host: String,
    pub port: u16,
    /// Frontend assets served next to the API
    pub static_dir: PathBuf,
}

impl Settings {
    /// Load from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(Environment::default())
    }

    /// Load from an explicit variable map instead of the process environment
    pub fn from_vars(vars: config::Map<String, String>) -> Result<Self, ConfigError> {
        Self::build(Environment::default().source(Some(vars)))
    }

    fn build(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_host", DEFAULT_BIND_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("static_dir", DEFAULT_STATIC_DIR)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// The database URL, if one is configured and non-blank
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
