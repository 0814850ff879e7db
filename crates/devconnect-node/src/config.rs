//! Node configuration.
//!
//! Sources are layered, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional configuration file (TOML, YAML or JSON, by extension)
//! 3. the conventional variables `MONGO_URI`, `DATABASE_URL`, `JWT_SECRET`,
//!    `GITHUB_TOKEN` and `PORT`
//! 4. `DEVCONNECT__*` variables, e.g. `DEVCONNECT__LOG_FORMAT=json`
//!
//! Command-line flags are applied on top by the binary.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::observability::LogFormat;

/// Prefix of the namespaced environment variables.
pub const ENV_PREFIX: &str = "DEVCONNECT";

/// Conventional variable names and the keys they set.
const CONVENTIONAL_ENV: &[(&str, &str)] = &[
    ("MONGO_URI", "database_url"),
    ("DATABASE_URL", "database_url"),
    ("JWT_SECRET", "jwt_secret"),
    ("GITHUB_TOKEN", "github_token"),
    ("PORT", "port"),
];

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum NodeConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("jwt_secret must be set (JWT_SECRET or DEVCONNECT__JWT_SECRET)")]
    MissingJwtSecret,
}

/// Configuration for the DevConnect node.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeConfig {
    /// Document store connection string (`memory://` or `rocksdb://<path>`).
    pub database_url: String,
    /// HMAC secret for session tokens.
    pub jwt_secret: String,
    /// Credential sent to the GitHub API.
    #[serde(default)]
    pub github_token: Option<String>,
    /// GitHub API base URL.
    pub github_api_url: String,
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Log level.
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            database_url: "memory://".to_string(),
            jwt_secret: String::new(),
            github_token: None,
            github_api_url: devconnect_github::DEFAULT_API_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl NodeConfig {
    /// Load from the process environment and an optional file.
    pub fn load(file: Option<&Path>) -> Result<Self, NodeConfigError> {
        Self::load_from(file, std::env::vars().collect())
    }

    /// Load from an explicit set of environment variables.
    pub fn load_from(
        file: Option<&Path>,
        env: HashMap<String, String>,
    ) -> Result<Self, NodeConfigError> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("database_url", defaults.database_url)?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("github_api_url", defaults.github_api_url)?
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "pretty")?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let conventional: HashMap<String, String> = CONVENTIONAL_ENV
            .iter()
            .filter_map(|(var, key)| {
                env.get(*var)
                    .filter(|v| !v.is_empty())
                    .map(|v| (key.to_string(), v.clone()))
            })
            .collect();

        let config: Self = builder
            .add_source(Environment::default().source(Some(conventional)))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .source(Some(env)),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check invariants that deserialization cannot express.
    pub fn validate(&self) -> Result<(), NodeConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(NodeConfigError::MissingJwtSecret);
        }
        Ok(())
    }

    /// Address to bind the HTTP listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
