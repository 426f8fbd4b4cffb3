//! Conversion of environment variable names into Rust identifiers.

/// Converts an underscore-delimited environment variable name into an
/// upper camel case identifier.
///
/// Each token is lower-cased and then has its first character upper-cased.
/// Characters that have no case, such as digits, pass through unchanged.
///
/// # Examples
///
/// ```
/// use config_scaffold::naming::to_identifier;
///
/// assert_eq!(to_identifier("DATABASE_URL"), "DatabaseUrl");
/// assert_eq!(to_identifier("sample_env_var"), "SampleEnvVar");
/// ```
#[must_use]
pub fn to_identifier(name: &str) -> String {
    name.split('_').map(capitalise).collect()
}

fn capitalise(token: &str) -> String {
    let lowered = token.to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
