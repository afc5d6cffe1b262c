//! Configuration loading and validation for the `cryptohelper` CLI.
//!
//! Values are read from `CRYPTOHELPER_*` environment variables at startup.
//! Command-line flags override them where both exist.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Prefix shared by every environment variable this binary reads.
pub const ENV_PREFIX: &str = "CRYPTOHELPER";

/// Validated CLI configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Default base64 key used when `--key` is not given (`CRYPTOHELPER_KEY`).
    #[serde(default)]
    pub key: Option<String>,

    /// Tracing log level (`CRYPTOHELPER_LOG_LEVEL`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env)
            .build()
            .context("failed to build cryptohelper configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise cryptohelper configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if let Some(key) = &self.key {
            if key.trim().is_empty() {
                anyhow::bail!("{ENV_PREFIX}_KEY must not be empty when set");
            }
        }
        EnvFilter::try_new(&self.log_level)
            .with_context(|| format!("{ENV_PREFIX}_LOG_LEVEL is not a valid filter directive"))?;
        Ok(())
    }
}
