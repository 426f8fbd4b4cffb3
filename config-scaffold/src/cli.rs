//! Command-line interface definitions for `config-scaffold`.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};

/// Parsed CLI arguments for `config-scaffold`.
///
/// Every option is optional here; [`crate::settings::load_settings`] merges
/// them over the settings file and environment before validation.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "config-scaffold")]
#[command(about = "Scaffold a Rust configuration module from an environment file")]
#[command(version)]
pub struct Args {
    /// Name of the module directory to generate.
    #[arg(short = 'p', long, alias = "packageName", value_name = "NAME")]
    pub package_name: Option<String>,
    /// Environment file whose keys become `Config` fields.
    #[arg(short = 'e', long, alias = "envFile", value_name = "PATH")]
    pub env_file: Option<Utf8PathBuf>,
    /// Directory the module and sample `.env` are written under.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub out_dir: Option<Utf8PathBuf>,
    /// TOML settings file to read instead of `.config-scaffold.toml`.
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config_path: Option<Utf8PathBuf>,
    /// Increase log verbosity (repeatable).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}
