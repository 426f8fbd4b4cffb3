//! Configuration module scaffolded by `config-scaffold --package-name appcfg`.

#[path = "appcfg/config.rs"]
pub mod config;
