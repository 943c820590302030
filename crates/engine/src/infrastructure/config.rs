//! Process configuration read from the environment.

use std::path::PathBuf;

use modmaker_domain::CivilizationDeletePolicy;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_PATH: &str = "modmaker.db";
const DEFAULT_RESOURCE_DIR: &str = "resources";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {var}: '{value}' is not a port number")]
    InvalidPort { var: &'static str, value: String },

    #[error("Invalid CIVILIZATION_DELETE_POLICY: {0}")]
    InvalidDeletePolicy(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub resource_dir: PathBuf,
    pub delete_policy: CivilizationDeletePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            resource_dir: PathBuf::from(DEFAULT_RESOURCE_DIR),
            delete_policy: CivilizationDeletePolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Unset and blank values
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let server_host = get("SERVER_HOST").unwrap_or(defaults.server_host);

        let server_port = match get("SERVER_PORT")
            .map(|v| ("SERVER_PORT", v))
            .or_else(|| get("PORT").map(|v| ("PORT", v)))
        {
            Some((var, value)) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { var, value })?,
            None => defaults.server_port,
        };

        let database_path = get("DATABASE_PATH").unwrap_or(defaults.database_path);
        let resource_dir = get("RESOURCE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.resource_dir);

        let delete_policy = match get("CIVILIZATION_DELETE_POLICY") {
            Some(value) => value
                .parse::<CivilizationDeletePolicy>()
                .map_err(|e| ConfigError::InvalidDeletePolicy(e.to_string()))?,
            None => defaults.delete_policy,
        };

        Ok(Self {
            server_host,
            server_port,
            database_path,
            resource_dir,
            delete_policy,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
