//! Configuration module scaffolded by
//! `config-scaffold --package-name appcfg --env-file .env-custom`.

#[path = "appcfg/config.rs"]
pub mod config;
