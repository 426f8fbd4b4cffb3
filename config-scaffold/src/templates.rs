//! Template bodies for the scaffolded configuration module.
//!
//! The main module template only uses doc comments because formatting drops
//! ordinary comments.

/// Placeholder replaced with the target package name.
pub const PACKAGE_NAME_PLACEHOLDER: &str = "package_name";

/// Placeholder replaced with the `Config` struct declaration.
pub const CONFIG_STRUCT_PLACEHOLDER: &str = "config_struct";

/// Template name of the main module.
pub const CONFIG_MAIN_TEMPLATE_NAME: &str = "config_main";

/// Template name of the test module.
pub const CONFIG_TEST_TEMPLATE_NAME: &str = "config_test";

/// Template name of the sample environment file.
pub const ENV_FILE_TEMPLATE_NAME: &str = "env_file";

/// `Config` struct used when no environment file is supplied.
pub const DEFAULT_CONFIG_STRUCT: &str = r#"/// Configuration read from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
#[expect(non_snake_case, reason = "field names mirror the environment keys")]
pub struct Config {
    /// Sample value; rename and retype it to suit the package.
    #[serde(rename = "SAMPLE_ENV_VAR")]
    pub SampleEnvVar: String,
}
"#;

/// Main module exposing `Config`, `read` and `read_from_env_file`.
pub const CONFIG_MAIN_TEMPLATE: &str = r#"//! Configuration for `{{ package_name }}`, read from environment variables.

use std::collections::BTreeMap;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::Deserialize;

/// Environment file loaded by [`read`].
pub const DEFAULT_ENV_FILE: &str = ".env";

{{ config_struct }}

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
"#;

/// Test module exercising `read_with` through stubbed load and extract steps.
pub const CONFIG_TEST_TEMPLATE: &str = r#"//! Tests for reading `{{ package_name }}` configuration.

use std::io;
use std::path::Path;

use super::*;

fn loaded(_: &Path) -> Result<(), dotenvy::Error> {
    Ok(())
}

fn load_failure(_: &Path) -> Result<(), dotenvy::Error> {
    Err(dotenvy::Error::Io(io::Error::other("random error")))
}

fn processed() -> Result<Config, figment::Error> {
    Ok(Config::default())
}

fn process_failure() -> Result<Config, figment::Error> {
    Err(figment::Error::from(String::from("random error")))
}

#[test]
fn read_with_returns_config_when_both_steps_succeed() {
    let config = read_with(Path::new(DEFAULT_ENV_FILE), loaded, processed);
    assert!(config.is_ok());
}

#[test]
fn read_with_reports_load_failures() {
    let err = read_with(Path::new(DEFAULT_ENV_FILE), load_failure, processed).unwrap_err();
    assert!(matches!(err, ConfigError::Load { .. }));
    assert!(err.to_string().starts_with("loading env vars from .env: "));
}

#[test]
fn read_with_reports_processing_failures() {
    let err = read_with(Path::new("path/to/.env"), loaded, process_failure).unwrap_err();
    assert!(matches!(err, ConfigError::Process(_)));
    assert!(err.to_string().starts_with("processing env vars: "));
}

#[test]
fn read_from_env_file_reports_missing_files() {
    let err = read_from_env_file("path/to/missing.env").unwrap_err();
    assert!(err.to_string().starts_with("loading env vars from path/to/missing.env: "));
}
"#;

/// Sample environment file written next to a default scaffold.
pub const ENV_FILE_TEMPLATE: &str = "SAMPLE_ENV_VAR=some value\n";
