use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown locale {0}")]
    UnknownLocale(String),

    #[error("At least one catalog is required")]
    NoCatalogs,

    #[error("Unable to read catalog {file} ({source})")]
    ReadCatalog {
        file: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TomlDeser(#[from] toml::de::Error),

    #[error(transparent)]
    LanguageIdentifier(#[from] unic_langid::LanguageIdentifierError),
}

pub type Result<T> = std::result::Result<T, Error>;

pub type LocaleName = String;

mod catalog;
mod locales;

pub use catalog::{Catalog, Messages};
pub use locales::{LocaleInfo, Locales};
