//! Layered settings for a scaffolding run.
//!
//! Settings merge, lowest precedence first: built-in defaults, a TOML file,
//! `CONFIG_SCAFFOLD_*` environment variables and finally the command line.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::Args;
use crate::error::{Result, ScaffoldError};
use crate::generator::GenerationRequest;

/// Prefix of environment variables read as settings.
pub const ENV_PREFIX: &str = "CONFIG_SCAFFOLD_";

/// Settings file discovered in the working directory when no path is given.
pub const DEFAULT_SETTINGS_FILE: &str = ".config-scaffold.toml";

/// Merged settings before validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScaffoldSettings {
    /// Module directory to generate.
    #[serde(default)]
    pub package_name: Option<String>,
    /// Environment file whose keys become `Config` fields.
    #[serde(default)]
    pub env_file: Option<Utf8PathBuf>,
    /// Output root.
    pub out_dir: Utf8PathBuf,
}

impl Default for ScaffoldSettings {
    fn default() -> Self {
        Self {
            package_name: None,
            env_file: None,
            out_dir: Utf8PathBuf::from("."),
        }
    }
}

impl ScaffoldSettings {
    /// Validates the settings into a generation request and output root.
    ///
    /// Blank package names count as missing and an empty `env_file` means
    /// "use the defaults".
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::MissingPackageName`] when no layer supplied a
    /// package name.
    pub fn into_request(self) -> Result<(GenerationRequest, Utf8PathBuf)> {
        let package_name = self
            .package_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(ScaffoldError::MissingPackageName)?;
        let request = GenerationRequest {
            package_name,
            env_file: self.env_file.filter(|path| !path.as_str().is_empty()),
        };
        Ok((request, self.out_dir))
    }
}

#[derive(Debug, Serialize)]
struct Defaults {
    out_dir: Utf8PathBuf,
}

#[derive(Debug, Serialize)]
struct CliOverrides<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    package_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    env_file: Option<&'a Utf8Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out_dir: Option<&'a Utf8Path>,
}

impl<'a> From<&'a Args> for CliOverrides<'a> {
    fn from(args: &'a Args) -> Self {
        Self {
            package_name: args.package_name.as_deref(),
            env_file: args.env_file.as_deref(),
            out_dir: args.out_dir.as_deref(),
        }
    }
}

/// Merges every settings layer for `args`.
///
/// # Errors
///
/// Returns [`ScaffoldError::MissingSettingsFile`] when `--config-path` names
/// a missing file and [`ScaffoldError::Settings`] when a layer fails to
/// parse.
pub fn load_settings(args: &Args) -> Result<ScaffoldSettings> {
    let mut figment = Figment::from(Serialized::defaults(Defaults {
        out_dir: ScaffoldSettings::default().out_dir,
    }));
    if let Some(path) = settings_file(args)? {
        debug!(path = %path, "merging settings file");
        figment = figment.merge(Toml::file(path.as_std_path()));
    }
    let settings = figment
        .merge(Serialized::defaults(prefixed_env_vars()))
        .merge(Serialized::defaults(CliOverrides::from(args)))
        .extract::<ScaffoldSettings>()?;
    debug!(?settings, "settings resolved");
    Ok(settings)
}

/// Collects `CONFIG_SCAFFOLD_*` variables with the prefix stripped, leaving
/// values as text so a name such as `2024` is not read as a number.
fn prefixed_env_vars() -> BTreeMap<String, String> {
    Env::prefixed(ENV_PREFIX)
        .iter()
        .map(|(key, value)| (key.into_string(), value))
        .collect()
}

fn settings_file(args: &Args) -> Result<Option<Utf8PathBuf>> {
    match &args.config_path {
        Some(path) if path.is_file() => Ok(Some(path.clone())),
        Some(path) => Err(ScaffoldError::MissingSettingsFile(path.clone())),
        None => {
            let implicit = Utf8Path::new(DEFAULT_SETTINGS_FILE);
            Ok(implicit.is_file().then(|| implicit.to_path_buf()))
        }
    }
}
