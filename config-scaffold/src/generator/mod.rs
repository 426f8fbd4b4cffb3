//! Orchestration of a single scaffolding run.
//!
//! A run moves through `Init → DirEnsured → MainFileWritten →
//! TestFileWritten → (EnvFileWritten) → Done`. The first failing step aborts
//! the run; files written before it stay on disk.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::{Result, ScaffoldError};
use crate::format::{RustFormatter, SourceFormatter};
use crate::fs::{CapFileSystem, FileSystem};
use crate::lines::BufLineSource;
use crate::synth::synthesize_struct;
use crate::template::{JinjaEngine, TemplateContext, TemplateEngine};
use crate::templates::{
    CONFIG_MAIN_TEMPLATE, CONFIG_MAIN_TEMPLATE_NAME, CONFIG_STRUCT_PLACEHOLDER,
    CONFIG_TEST_TEMPLATE, CONFIG_TEST_TEMPLATE_NAME, DEFAULT_CONFIG_STRUCT, ENV_FILE_TEMPLATE,
    ENV_FILE_TEMPLATE_NAME, PACKAGE_NAME_PLACEHOLDER,
};

/// File name of the generated main module.
pub const CONFIG_FILE_NAME: &str = "config.rs";

/// File name of the generated test module.
pub const CONFIG_TEST_FILE_NAME: &str = "config_test.rs";

/// File name of the sample environment file.
pub const ENV_FILE_NAME: &str = ".env";

/// Input of one scaffolding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Directory, relative to the output root, receiving the module.
    pub package_name: String,
    /// Environment file whose keys become `Config` fields.
    pub env_file: Option<Utf8PathBuf>,
}

impl GenerationRequest {
    /// Creates a request that scaffolds the default single-field module.
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            env_file: None,
        }
    }

    /// Uses `env_file` as the source of `Config` fields.
    #[must_use]
    pub fn with_env_file(mut self, env_file: impl Into<Utf8PathBuf>) -> Self {
        self.env_file = Some(env_file.into());
        self
    }
}

/// Rendered file content waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Destination relative to the output root.
    pub path: Utf8PathBuf,
    /// Rendered bytes.
    pub content: Vec<u8>,
}

/// Writes a configuration module, its tests and optionally a sample
/// environment file.
///
/// The filesystem, template engine and formatter are supplied by the caller,
/// so tests can swap any of them for fakes.
#[derive(Debug)]
pub struct Generator<Fs, Engine, Fmt> {
    request: GenerationRequest,
    fs: Fs,
    engine: Engine,
    formatter: Fmt,
}

impl Generator<CapFileSystem, JinjaEngine, RustFormatter> {
    /// Builds a generator writing under `out_dir` with the production engine
    /// and formatter.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::OutputRoot`] when `out_dir` cannot be created
    /// or opened.
    pub fn with_defaults(request: GenerationRequest, out_dir: &Utf8Path) -> Result<Self> {
        let fs = CapFileSystem::open_ambient(out_dir).map_err(|source| ScaffoldError::OutputRoot {
            path: out_dir.to_path_buf(),
            source,
        })?;
        Ok(Self::new(request, fs, JinjaEngine, RustFormatter))
    }
}

impl<Fs, Engine, Fmt> Generator<Fs, Engine, Fmt>
where
    Fs: FileSystem,
    Engine: TemplateEngine,
    Fmt: SourceFormatter,
{
    /// Creates a generator for `request` from explicit capabilities.
    pub const fn new(request: GenerationRequest, fs: Fs, engine: Engine, formatter: Fmt) -> Self {
        Self {
            request,
            fs,
            engine,
            formatter,
        }
    }

    /// Runs the generation the request asks for.
    ///
    /// An empty `env_file` path counts as absent.
    ///
    /// # Errors
    ///
    /// Propagates the first failing step.
    pub fn generate(&self) -> Result<Vec<Utf8PathBuf>> {
        match self.request.env_file.as_deref() {
            Some(path) if !path.as_str().is_empty() => self.generate_from_env_file(path),
            _ => self.generate_default(),
        }
    }

    /// Writes the default module, its tests and a sample `.env`.
    ///
    /// Returns the main module, test module and `.env` paths, in that order.
    ///
    /// # Errors
    ///
    /// Propagates the first failing step.
    pub fn generate_default(&self) -> Result<Vec<Utf8PathBuf>> {
        self.ensure_package_dir()?;
        let main = self.write_main_file(DEFAULT_CONFIG_STRUCT.to_owned())?;
        let test = self.write_test_file()?;
        let env = self.write_env_file()?;
        debug!(package = %self.request.package_name, "scaffold complete");
        Ok(vec![main, test, env])
    }

    /// Writes a module whose `Config` fields come from `env_file_path`, plus
    /// its tests.
    ///
    /// Returns the main module and test module paths, in that order.
    ///
    /// # Errors
    ///
    /// Propagates the first failing step.
    pub fn generate_from_env_file(&self, env_file_path: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
        self.ensure_package_dir()?;
        let config_struct = self.synthesize_from(env_file_path)?;
        let main = self.write_main_file(config_struct)?;
        let test = self.write_test_file()?;
        debug!(package = %self.request.package_name, env_file = %env_file_path, "scaffold complete");
        Ok(vec![main, test])
    }

    fn package_dir(&self) -> &Utf8Path {
        Utf8Path::new(&self.request.package_name)
    }

    fn ensure_package_dir(&self) -> Result<()> {
        let dir = self.package_dir();
        self.fs
            .make_dir(dir)
            .map_err(|source| ScaffoldError::DirectoryCreation {
                path: dir.to_path_buf(),
                source,
            })?;
        debug!(dir = %dir, "package dir ensured");
        Ok(())
    }

    fn synthesize_from(&self, env_file_path: &Utf8Path) -> Result<String> {
        let file = self
            .fs
            .open(env_file_path)
            .map_err(|source| ScaffoldError::FileOpen {
                path: env_file_path.to_path_buf(),
                source,
            })?;
        let mut lines = BufLineSource::new(BufReader::new(file));
        synthesize_struct(&mut lines).map_err(|source| ScaffoldError::Scan {
            path: env_file_path.to_path_buf(),
            source,
        })
    }

    fn write_main_file(&self, config_struct: String) -> Result<Utf8PathBuf> {
        let mut context = self.package_context();
        context.insert(CONFIG_STRUCT_PLACEHOLDER, config_struct);
        let artifact = self.render(
            self.package_dir().join(CONFIG_FILE_NAME),
            CONFIG_MAIN_TEMPLATE_NAME,
            CONFIG_MAIN_TEMPLATE,
            &context,
        )?;
        let path = self.write_artifact(&artifact)?;
        self.format_source_file(&path)?;
        Ok(path)
    }

    fn write_test_file(&self) -> Result<Utf8PathBuf> {
        let artifact = self.render(
            self.package_dir().join(CONFIG_TEST_FILE_NAME),
            CONFIG_TEST_TEMPLATE_NAME,
            CONFIG_TEST_TEMPLATE,
            &self.package_context(),
        )?;
        self.write_artifact(&artifact)
    }

    fn write_env_file(&self) -> Result<Utf8PathBuf> {
        let artifact = self.render(
            Utf8PathBuf::from(ENV_FILE_NAME),
            ENV_FILE_TEMPLATE_NAME,
            ENV_FILE_TEMPLATE,
            &TemplateContext::new(),
        )?;
        self.write_artifact(&artifact)
    }

    fn package_context(&self) -> TemplateContext {
        TemplateContext::from([(PACKAGE_NAME_PLACEHOLDER, self.request.package_name.clone())])
    }

    fn render(
        &self,
        path: Utf8PathBuf,
        name: &str,
        text: &str,
        context: &TemplateContext,
    ) -> Result<GeneratedArtifact> {
        let executor = self
            .engine
            .parse(name, text)
            .map_err(|source| ScaffoldError::TemplateParse {
                name: name.to_owned(),
                source,
            })?;
        let mut content = Vec::new();
        executor
            .execute(&mut content, context)
            .map_err(|source| ScaffoldError::TemplateExecution {
                name: name.to_owned(),
                source,
            })?;
        Ok(GeneratedArtifact { path, content })
    }

    fn write_artifact(&self, artifact: &GeneratedArtifact) -> Result<Utf8PathBuf> {
        let path = &artifact.path;
        let mut file = self
            .fs
            .create(path)
            .map_err(|source| ScaffoldError::FileCreation {
                path: path.clone(),
                source,
            })?;
        file.write_all(&artifact.content)
            .and_then(|()| file.flush())
            .map_err(|source| ScaffoldError::FileWrite {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path, bytes = artifact.content.len(), "file written");
        Ok(path.clone())
    }

    fn format_source_file(&self, path: &Utf8Path) -> Result<()> {
        let source = self
            .fs
            .read_all(path)
            .map_err(|source| ScaffoldError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let text = String::from_utf8_lossy(&source);
        let formatted = self
            .formatter
            .format(&text)
            .map_err(|source| ScaffoldError::Format {
                path: path.to_path_buf(),
                source,
            })?;
        self.fs
            .write_all(path, formatted.as_bytes())
            .map_err(|source| ScaffoldError::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path, "source formatted");
        Ok(())
    }
}
