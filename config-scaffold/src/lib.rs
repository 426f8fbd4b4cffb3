//! Library interface for `config-scaffold`.
//!
//! The crate writes a Rust configuration module from templates: a `Config`
//! struct whose fields mirror the keys of an environment file, `read` and
//! `read_from_env_file` accessors, a companion test module and, when no
//! environment file is supplied, a sample `.env`.
//!
//! [`generator::Generator`] drives a run. Its filesystem, template engine and
//! formatter are supplied by the caller; [`settings`] resolves
//! what to generate from files, the environment and the command line.

pub mod cli;
pub mod error;
pub mod format;
pub mod fs;
pub mod generator;
pub mod lines;
pub mod naming;
pub mod settings;
pub mod synth;
pub mod template;
pub mod templates;

#[cfg(test)]
mod test_support;

pub use error::{Result, ScaffoldError};
pub use generator::{GeneratedArtifact, GenerationRequest, Generator};
