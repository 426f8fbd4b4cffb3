//! Template parsing and rendering.
//!
//! Templates use `{{ placeholder }}` substitution. The production engine is
//! backed by `minijinja` with strict undefined handling: rendering a template
//! that names a placeholder missing from the context fails instead of
//! producing empty text.

use std::collections::BTreeMap;
use std::io::Write;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use thiserror::Error;

/// Placeholder names mapped to their substitution text.
pub type TemplateContext = BTreeMap<&'static str, String>;

/// Diagnostic produced while parsing or rendering a template.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TemplateError {
    message: String,
}

impl TemplateError {
    /// Creates an error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<minijinja::Error> for TemplateError {
    fn from(err: minijinja::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Parses named template bodies.
pub trait TemplateEngine {
    /// Validates `text` and returns an executor bound to it.
    ///
    /// # Errors
    ///
    /// Returns an error when the template syntax is malformed.
    fn parse(&self, name: &str, text: &str) -> Result<Box<dyn TemplateExecutor>, TemplateError>;
}

/// Renders a parsed template.
pub trait TemplateExecutor {
    /// Substitutes `context` into the template and writes the result to
    /// `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error when a placeholder is missing from `context` or the
    /// sink rejects the output.
    fn execute(&self, sink: &mut dyn Write, context: &TemplateContext)
    -> Result<(), TemplateError>;
}

/// [`TemplateEngine`] backed by `minijinja`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JinjaEngine;

impl TemplateEngine for JinjaEngine {
    fn parse(&self, name: &str, text: &str) -> Result<Box<dyn TemplateExecutor>, TemplateError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template_owned(name.to_owned(), text.to_owned())?;
        Ok(Box::new(JinjaExecutor {
            env,
            name: name.to_owned(),
        }))
    }
}

struct JinjaExecutor {
    env: Environment<'static>,
    name: String,
}

impl TemplateExecutor for JinjaExecutor {
    fn execute(
        &self,
        sink: &mut dyn Write,
        context: &TemplateContext,
    ) -> Result<(), TemplateError> {
        let template = self.env.get_template(&self.name)?;
        template.render_captured_to(context, sink)?;
        Ok(())
    }
}
