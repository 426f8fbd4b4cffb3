//! Configuration for `appcfg`, read from environment variables.

use std::collections::BTreeMap;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::Deserialize;

/// Environment file loaded by [`read`].
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Configuration read from environment variables.
///
/// TODO: every field is declared as `String`; set the correct data type for
/// each one. Fields that are not `Option` are required, so a missing variable
/// fails the whole read.
#[derive(Debug, Clone, Default, Deserialize)]
#[expect(non_snake_case, reason = "field names mirror the environment keys")]
pub struct Config {
    /// TODO: set the correct data type.
    #[serde(rename = "DEMO_APP_NAME")]
    pub DemoAppName: String,
    /// TODO: set the correct data type.
    #[serde(rename = "DEMO_PORT")]
    pub DemoPort: String,
    /// TODO: set the correct data type.
    #[serde(rename = "DEMO_DEBUG")]
    pub DemoDebug: String,
    /// TODO: set the correct data type.
    #[serde(rename = "DEMO_RATIO")]
    pub DemoRatio: String,
    /// TODO: set the correct data type.
    #[serde(rename = "DEMO_ZIP_CODE")]
    pub DemoZipCode: String,
    /// TODO: set the correct data type.
    #[serde(rename = "DEMO_EMPTY_VAL")]
    pub DemoEmptyVal: String,
}

/// Errors raised while reading [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The environment file could not be loaded.
    #[error("loading env vars from {path}: {source}")]
    Load {
        /// Environment file that failed to load.
        path: String,
        /// Loader failure.
        #[source]
        source: dotenvy::Error,
    },
    /// The environment does not satisfy [`Config`].
    #[error("processing env vars: {0}")]
    Process(#[from] figment::Error),
}

/// Reads configuration after loading [`DEFAULT_ENV_FILE`] into the process
/// environment.
///
/// # Errors
///
/// Fails when the file cannot be loaded or a required variable is missing.
pub fn read() -> Result<Config, ConfigError> {
    read_from_env_file(DEFAULT_ENV_FILE)
}

/// Reads configuration after loading `env_file_path` into the process
/// environment.
///
/// # Errors
///
/// Fails when the file cannot be loaded or a required variable is missing.
pub fn read_from_env_file(env_file_path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    read_with(env_file_path.as_ref(), load_env_file, extract_config)
}

fn load_env_file(path: &Path) -> Result<(), dotenvy::Error> {
    dotenvy::from_path(path)
}

/// Extracts [`Config`] from the process environment, keeping every value as
/// raw text so `8080` or `true` still fill `String` fields.
fn extract_config() -> Result<Config, figment::Error> {
    let vars: BTreeMap<String, String> = Env::raw()
        .lowercase(false)
        .iter()
        .map(|(key, value)| (key.into_string(), value))
        .collect();
    Figment::from(Serialized::defaults(vars)).extract()
}

fn read_with<L, P>(path: &Path, load: L, process: P) -> Result<Config, ConfigError>
where
    L: FnOnce(&Path) -> Result<(), dotenvy::Error>,
    P: FnOnce() -> Result<Config, figment::Error>,
{
    load(path).map_err(|source| ConfigError::Load {
        path: path.display().to_string(),
        source,
    })?;
    Ok(process()?)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
