use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Backend url {0} must use the http or https scheme")]
    BackendScheme(String),

    #[error("Backend timeout must be greater than zero")]
    BackendTimeout,

    #[error("Unable to read configuration {file} ({source})")]
    ReadConfig {
        file: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    TomlDeser(#[from] toml::de::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Lang(#[from] unic_langid::LanguageIdentifierError),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;

pub use config::*;
