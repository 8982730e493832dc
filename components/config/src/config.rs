use std::convert::AsRef;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use log::debug;
use unic_langid::LanguageIdentifier;

use super::{Error, Result};

pub static CONFIG_TOML: &str = "kirkos.toml";
pub static LOCALES: &str = "locales";
pub static LANG: &str = "en";

static BACKEND_URL: &str = "https://project-id.supabase.co";
static BACKEND_KEY: &str = "your-anon-key";
static TIMEOUT: u64 = 30;
static ADMIN_EMAIL: &str = "admin@kirkoslegalaid.org";
static ADMIN_PASSWORD: &str = "kirkos-admin";

static HTTP: &str = "http";
static HTTPS: &str = "https";

fn resolve_cwd() -> Option<PathBuf> {
    if let Ok(cwd) = std::env::current_dir() {
        return Some(cwd);
    }
    None
}

fn resolve_project<P: AsRef<Path>>(f: P) -> Option<PathBuf> {
    let file = f.as_ref();
    if let Some(p) = file.parent() {
        // A bare file name has an empty parent, use the
        // working directory so relative locales resolve
        if p == PathBuf::from("") {
            return resolve_cwd();
        }
        return Some(p.to_path_buf());
    }
    resolve_cwd()
}

pub fn parse_language<S: AsRef<str>>(lang: S) -> Result<LanguageIdentifier> {
    let id: LanguageIdentifier = lang.as_ref().parse()?;
    Ok(id)
}

/// Site configuration loaded from `kirkos.toml`.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Default display language for a new session.
    pub lang: String,
    /// Directory of translation catalogs relative to the project.
    pub locales: Option<PathBuf>,
    pub backend: BackendConfig,
    pub admin: AdminConfig,

    #[serde(skip)]
    project: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lang: String::from(LANG),
            locales: None,
            backend: Default::default(),
            admin: Default::default(),
            project: resolve_cwd().unwrap_or_default(),
        }
    }
}

impl Config {
    /// Parse a configuration from a TOML string.
    pub fn parse<S: AsRef<str>>(content: S) -> Result<Self> {
        let cfg: Config = toml::from_str(content.as_ref())?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let content = std::fs::read_to_string(file).map_err(|source| {
            Error::ReadConfig {
                file: file.to_path_buf(),
                source,
            }
        })?;
        let mut cfg = Config::parse(&content)?;
        if let Some(project) = resolve_project(file) {
            cfg.project = project;
        }
        debug!("Loaded configuration {}", file.display());
        Ok(cfg)
    }

    /// Load a configuration file or fall back to the defaults
    /// when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        if file.exists() {
            return Config::load(file);
        }
        debug!("No configuration at {}, using defaults", file.display());
        let mut cfg: Config = Default::default();
        if let Some(project) = resolve_project(file) {
            cfg.project = project;
        }
        Ok(cfg)
    }

    pub fn project(&self) -> &Path {
        &self.project
    }

    /// Directory containing catalog files for this project.
    pub fn get_locales(&self) -> PathBuf {
        let dir = match self.locales {
            Some(ref dir) => dir.clone(),
            None => PathBuf::from(LOCALES),
        };
        self.project.join(dir)
    }

    pub fn lang_id(&self) -> Result<LanguageIdentifier> {
        parse_language(&self.lang)
    }

    fn validate(&self) -> Result<()> {
        self.lang_id()?;
        self.backend.endpoint()?;
        if self.backend.timeout == 0 {
            return Err(Error::BackendTimeout);
        }
        Ok(())
    }
}

/// Connection settings for the remote data service.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub key: String,
    /// No remote service is wired up, use in-memory data.
    pub mock: bool,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::from(BACKEND_URL),
            key: String::from(BACKEND_KEY),
            mock: true,
            timeout: TIMEOUT,
        }
    }
}

impl BackendConfig {
    pub fn endpoint(&self) -> Result<Url> {
        let url = Url::parse(&self.url)?;
        if url.scheme() != HTTP && url.scheme() != HTTPS {
            return Err(Error::BackendScheme(self.url.clone()));
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Credentials accepted by the in-memory backend.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: String::from(ADMIN_EMAIL),
            password: String::from(ADMIN_PASSWORD),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::{Config, Error, Result};

    #[test]
    fn defaults() -> Result<()> {
        let config = Config::parse("")?;
        assert_eq!("en", config.lang);
        assert!(config.backend.mock);
        assert_eq!(30, config.backend.timeout().as_secs());
        assert_eq!("project-id.supabase.co", config.backend.endpoint()?.host_str().unwrap());
        Ok(())
    }

    #[test]
    fn backend_section() -> Result<()> {
        let config = Config::parse(
            r#"
lang = "am"
locales = "i18n"

[backend]
url = "https://legal.example.org"
key = "secret"
mock = false
timeout = 5
"#,
        )?;
        assert_eq!("am", config.lang_id()?.to_string());
        assert!(!config.backend.mock);
        assert_eq!("secret", config.backend.key);
        assert!(config.get_locales().ends_with(PathBuf::from("i18n")));
        Ok(())
    }

    #[test]
    fn invalid_language() {
        let result = Config::parse("lang = \"not a language\"");
        assert!(matches!(result, Err(Error::Lang(_))));
    }

    #[test]
    fn invalid_scheme() {
        let result = Config::parse("[backend]\nurl = \"ftp://example.org\"");
        assert!(matches!(result, Err(Error::BackendScheme(_))));
    }

    #[test]
    fn zero_timeout() {
        let result = Config::parse("[backend]\ntimeout = 0");
        assert!(matches!(result, Err(Error::BackendTimeout)));
    }

    #[test]
    fn missing_file() -> Result<()> {
        let config = Config::load_or_default("does-not-exist/kirkos.toml")?;
        assert_eq!(PathBuf::from("does-not-exist"), config.project());
        assert_eq!("en", config.lang);
        Ok(())
    }
}
