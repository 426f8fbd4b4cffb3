//! Error types for `config-scaffold`.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::format::FormatError;
use crate::template::TemplateError;

/// Errors surfaced by the scaffolding pipeline.
///
/// Every variant names the operation that failed together with the path or
/// template involved, so the message printed by the binary is enough to
/// locate the problem.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The package directory could not be created.
    #[error("creating dir {path}: {source}")]
    DirectoryCreation {
        /// Directory that failed to be created.
        path: Utf8PathBuf,
        /// Underlying filesystem failure.
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be created.
    #[error("creating file {path}: {source}")]
    FileCreation {
        /// File that failed to be created.
        path: Utf8PathBuf,
        /// Underlying filesystem failure.
        #[source]
        source: std::io::Error,
    },

    /// The source environment file could not be opened.
    #[error("opening env file {path}: {source}")]
    FileOpen {
        /// Environment file that failed to open.
        path: Utf8PathBuf,
        /// Underlying filesystem failure.
        #[source]
        source: std::io::Error,
    },

    /// A generated source file could not be read back for formatting.
    #[error("reading source file {path}: {source}")]
    FileRead {
        /// File that failed to be read.
        path: Utf8PathBuf,
        /// Underlying filesystem failure.
        #[source]
        source: std::io::Error,
    },

    /// Rendered content could not be written to its file.
    #[error("writing file {path}: {source}")]
    FileWrite {
        /// File that failed to be written.
        path: Utf8PathBuf,
        /// Underlying filesystem failure.
        #[source]
        source: std::io::Error,
    },

    /// A template body failed to parse.
    #[error("parsing template {name}: {source}")]
    TemplateParse {
        /// Name of the template being parsed.
        name: String,
        /// Template engine diagnostic.
        #[source]
        source: TemplateError,
    },

    /// A parsed template failed to render.
    #[error("executing template {name}: {source}")]
    TemplateExecution {
        /// Name of the template being rendered.
        name: String,
        /// Template engine diagnostic.
        #[source]
        source: TemplateError,
    },

    /// The source environment file faulted while being read line by line.
    #[error("generating struct from env file {path}: scanning: {source}")]
    Scan {
        /// Environment file being scanned.
        path: Utf8PathBuf,
        /// Read fault reported by the line source.
        #[source]
        source: std::io::Error,
    },

    /// Generated source is not valid Rust and cannot be formatted.
    #[error("formatting source file {path}: {source}")]
    Format {
        /// Generated file that failed to format.
        path: Utf8PathBuf,
        /// Formatter diagnostic.
        #[source]
        source: FormatError,
    },

    /// Layered settings could not be merged or extracted.
    #[error("loading settings: {0}")]
    Settings(#[source] Box<figment::Error>),

    /// An explicitly requested settings file does not exist.
    #[error("settings file {0} not found")]
    MissingSettingsFile(Utf8PathBuf),

    /// No package name was supplied by any settings layer.
    #[error("package name is required; pass --package-name")]
    MissingPackageName,

    /// The output root could not be opened.
    #[error("opening output dir {path}: {source}")]
    OutputRoot {
        /// Output root requested by the caller.
        path: Utf8PathBuf,
        /// Underlying filesystem failure.
        #[source]
        source: std::io::Error,
    },
}

impl From<figment::Error> for ScaffoldError {
    fn from(err: figment::Error) -> Self {
        Self::Settings(Box::new(err))
    }
}

/// Convenience alias for results produced by this crate.
pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;
