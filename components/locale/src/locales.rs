use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;
use unic_langid::LanguageIdentifier;

use config::Config;

use crate::{Catalog, Error, LocaleName, Result};

static TOML: &str = "toml";

static BUILTIN: [(&str, &str); 3] = [
    ("en", include_str!("../locales/en.toml")),
    ("am", include_str!("../locales/am.toml")),
    ("or", include_str!("../locales/or.toml")),
];

/// Entry for a language selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleInfo {
    pub code: LocaleName,
    pub display_name: String,
}

/// Localization state for a session: the available catalogs
/// and the active locale.
///
/// Created once with a default locale and mutated only by an
/// explicit locale change; pass it to whatever renders text.
#[derive(Debug, Clone)]
pub struct Locales {
    catalogs: Vec<Catalog>,
    /// Index of the default catalog.
    fallback: usize,
    /// Index of the active catalog.
    active: usize,
}

impl Locales {
    /// Create the state from catalogs, `default` becomes the active locale.
    pub fn new<S: AsRef<str>>(catalogs: Vec<Catalog>, default: S) -> Result<Self> {
        if catalogs.is_empty() {
            return Err(Error::NoCatalogs);
        }
        let mut locales = Self {
            catalogs: Vec::new(),
            fallback: 0,
            active: 0,
        };
        for catalog in catalogs {
            locales.register(catalog);
        }
        let index = locales
            .position(default.as_ref())
            .ok_or_else(|| Error::UnknownLocale(default.as_ref().to_string()))?;
        locales.fallback = index;
        locales.active = index;
        Ok(locales)
    }

    /// Catalogs bundled with the site.
    pub fn builtin() -> Result<Self> {
        let mut catalogs = Vec::with_capacity(BUILTIN.len());
        for (code, content) in BUILTIN.iter() {
            catalogs.push(Catalog::parse(code, content)?);
        }
        Locales::new(catalogs, config::LANG)
    }

    /// Bundled catalogs overlaid with any catalog files in the
    /// configured locales directory, activating the configured language.
    pub fn load(config: &Config) -> Result<Self> {
        let mut locales = Locales::builtin()?;
        let dir = config.get_locales();
        if dir.is_dir() {
            locales.load_dir(&dir)?;
        } else {
            debug!("No locales directory {}", dir.display());
        }
        let index = locales
            .position(&config.lang)
            .ok_or_else(|| Error::UnknownLocale(config.lang.clone()))?;
        locales.fallback = index;
        locales.active = index;
        Ok(locales)
    }

    fn load_dir(&mut self, dir: &Path) -> Result<()> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().map_or(false, |e| e == TOML) {
                files.push(path);
            }
        }
        files.sort();
        for file in files {
            let catalog = Catalog::read(&file)?;
            info!("{} < {}", catalog.code(), file.display());
            self.register(catalog);
        }
        Ok(())
    }

    /// Add a catalog, replacing any catalog with the same code.
    pub fn register(&mut self, catalog: Catalog) {
        match self.position(catalog.code()) {
            Some(index) => self.catalogs[index] = catalog,
            None => self.catalogs.push(catalog),
        }
    }

    fn position(&self, code: &str) -> Option<usize> {
        let id: LanguageIdentifier = code.parse().ok()?;
        self.catalogs.iter().position(|c| c.id() == &id)
    }

    /// Text for `key` in the active locale, or `key` itself
    /// when the active catalog has no entry.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.catalogs[self.active].get(key).unwrap_or(key)
    }

    /// Switch the active locale, unknown codes leave the state unchanged.
    pub fn set_active_locale(&mut self, code: &str) {
        if let Err(e) = self.try_set_active_locale(code) {
            warn!("{}", e);
        }
    }

    /// Switch the active locale or fail for an unknown code.
    pub fn try_set_active_locale(&mut self, code: &str) -> Result<()> {
        let index = self
            .position(code)
            .ok_or_else(|| Error::UnknownLocale(code.to_string()))?;
        self.active = index;
        Ok(())
    }

    pub fn list_locales(&self) -> Vec<LocaleInfo> {
        self.catalogs
            .iter()
            .map(|c| LocaleInfo {
                code: c.code().to_string(),
                display_name: c.display_name().to_string(),
            })
            .collect()
    }

    pub fn active(&self) -> &str {
        self.catalogs[self.active].code()
    }

    pub fn fallback(&self) -> &str {
        self.catalogs[self.fallback].code()
    }

    pub fn catalog(&self, code: &str) -> Option<&Catalog> {
        self.position(code).map(|index| &self.catalogs[index])
    }

    /// Keys of the default catalog that `code` does not translate.
    pub fn missing_keys(&self, code: &str) -> Result<Vec<&str>> {
        let catalog = self
            .catalog(code)
            .ok_or_else(|| Error::UnknownLocale(code.to_string()))?;
        Ok(self.catalogs[self.fallback]
            .keys()
            .filter(|k| !catalog.contains(k))
            .collect())
    }
}
