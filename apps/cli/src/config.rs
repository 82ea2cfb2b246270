//! CLI configuration module.
//!
//! The policy is layered: built-in defaults, then the TOML file given by
//! `--config` (or `SOLARBOOKS_CONFIG`), then `SOLARBOOKS__*` environment
//! variables. Nested keys use a double underscore, so
//! `SOLARBOOKS__SUBSIDY__RATE_TIER_1=32000` sets `subsidy.rate_tier_1`.

use config::{Config, Environment, File, Source};
use solarbooks_core::{CoreError, PolicyConfig};
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "SOLARBOOKS";

/// Separator between the prefix and nested keys.
pub const ENV_SEPARATOR: &str = "__";

/// Loads and validates the policy.
pub fn load(path: Option<&Path>) -> Result<PolicyConfig, ConfigError> {
    let file = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            info!(path = %path.display(), "loading policy configuration");
            Some(File::from(path).required(true))
        }
        None => None,
    };

    build(
        file,
        Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR),
    )
}

fn build<S>(file: Option<S>, env: Environment) -> Result<PolicyConfig, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    let mut builder = Config::builder();
    if let Some(file) = file {
        builder = builder.add_source(file);
    }

    let policy: PolicyConfig = builder.add_source(env).build()?.try_deserialize()?;
    policy.validate()?;

    Ok(policy)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] CoreError),
}
