use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use unic_langid::LanguageIdentifier;

use crate::{Error, LocaleName, Result};

pub type Messages = IndexMap<String, String>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogMeta {
    name: Option<String>,
}

/// On disk representation of a catalog.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    meta: CatalogMeta,
    messages: Messages,
}

/// Translations for a single locale.
#[derive(Debug, Clone)]
pub struct Catalog {
    id: LanguageIdentifier,
    code: LocaleName,
    display_name: String,
    messages: Messages,
}

impl Catalog {
    pub fn new<C: AsRef<str>, N: AsRef<str>>(
        code: C,
        display_name: N,
        messages: Messages,
    ) -> Result<Self> {
        let id: LanguageIdentifier = code.as_ref().parse()?;
        Ok(Self {
            code: id.to_string(),
            id,
            display_name: display_name.as_ref().to_string(),
            messages,
        })
    }

    /// Parse a catalog from TOML; the display name defaults to the code.
    pub fn parse<C: AsRef<str>, S: AsRef<str>>(code: C, content: S) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content.as_ref())?;
        let name = file
            .meta
            .name
            .unwrap_or_else(|| code.as_ref().to_string());
        Catalog::new(code, name, file.messages)
    }

    /// Read a catalog file, the file stem is the locale code.
    pub fn read<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let code = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content = std::fs::read_to_string(file).map_err(|source| {
            Error::ReadCatalog {
                file: file.to_path_buf(),
                source,
            }
        })?;
        Catalog::parse(code, content)
    }

    pub fn id(&self) -> &LanguageIdentifier {
        &self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Translation of `key`, blank entries count as untranslated.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages
            .get(key)
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
