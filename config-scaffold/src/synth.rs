//! Synthesis of the `Config` struct from an environment file.

use std::io;

use tracing::trace;

use crate::lines::LineSource;
use crate::naming::to_identifier;

/// Opening of every synthesized struct, up to and including its brace.
pub const STRUCT_HEADER: &str = "\
/// Configuration read from environment variables.
///
/// TODO: every field is declared as `String`; set the correct data type for
/// each one. Fields that are not `Option` are required, so a missing variable
/// fails the whole read.
#[derive(Debug, Clone, Default, Deserialize)]
#[expect(non_snake_case, reason = \"field names mirror the environment keys\")]
pub struct Config {
";

/// Type given to every synthesized field until a developer specialises it.
pub const PLACEHOLDER_TYPE: &str = "String";

/// A struct field derived from one `KEY=VALUE` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Rust identifier of the field.
    pub identifier: String,
    /// Environment variable the field is read from.
    pub key: String,
}

impl FieldSpec {
    /// Parses a `KEY=VALUE` line, splitting on the first `=`.
    ///
    /// Returns `None` for lines without `=` and for keys that produce an empty
    /// identifier.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let (key, _value) = line.split_once('=')?;
        let identifier = to_identifier(key);
        if identifier.is_empty() {
            return None;
        }
        Some(Self {
            identifier,
            key: key.to_owned(),
        })
    }

    fn write_declaration(&self, out: &mut String) {
        out.push_str("    /// TODO: set the correct data type.\n");
        out.push_str(&format!("    #[serde(rename = {:?})]\n", self.key));
        out.push_str(&format!("    pub {}: {PLACEHOLDER_TYPE},\n", self.identifier));
    }
}

/// Builds the `Config` struct declaration from the lines of an environment
/// file.
///
/// Malformed lines are skipped silently. The only failure is a read fault
/// reported by `source` once it stops yielding lines.
///
/// # Errors
///
/// Returns the fault recorded by the line source.
pub fn synthesize_struct(source: &mut dyn LineSource) -> io::Result<String> {
    let mut block = String::from(STRUCT_HEADER);
    while source.scan() {
        let line = source.text();
        match FieldSpec::parse(line) {
            Some(field) => field.write_declaration(&mut block),
            None => trace!(line = %line, "skipping malformed env line"),
        }
    }
    block.push_str("}\n");
    match source.take_err() {
        Some(err) => Err(err),
        None => Ok(block),
    }
}
