//! CLI subcommands.

pub mod migrate;
pub mod seed;

use bugstore_api::config::{ApiConfig, ConfigError};
use secrecy::SecretString;

/// Resolve the database URL, which every command needs.
pub(crate) fn database_url() -> Result<SecretString, ConfigError> {
    ApiConfig::from_env()?
        .database_url
        .ok_or_else(|| ConfigError::MissingEnvVar("BUGSTORE_DATABASE_URL".to_owned()))
}
