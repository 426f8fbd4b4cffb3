//! Canonical formatting of generated Rust source.

use thiserror::Error;

/// Diagnostic produced when source cannot be formatted.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FormatError {
    message: String,
}

impl FormatError {
    /// Creates an error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<syn::Error> for FormatError {
    fn from(err: syn::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Re-lays out source text in canonical style.
pub trait SourceFormatter {
    /// Formats `source`.
    ///
    /// # Errors
    ///
    /// Returns an error when `source` is not syntactically valid.
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// [`SourceFormatter`] that parses with `syn` and prints with `prettyplease`.
///
/// Ordinary `//` comments do not survive the round trip; doc comments do.
/// It works without `rustfmt` on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustFormatter;

impl SourceFormatter for RustFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let file = syn::parse_file(source)?;
        Ok(prettyplease::unparse(&file))
    }
}
