use std::path::Path;

use log::{debug, info, warn};

use backend::{Backend, Credentials, Session};
use config::Config;
use locale::Locales;

use crate::{Error, Result};

/// Load `kirkos.toml` from a project directory, defaults when absent.
pub fn load_config<P: AsRef<Path>>(project: P) -> Result<Config> {
    let file = project.as_ref().join(config::CONFIG_TOML);
    Ok(Config::load_or_default(file)?)
}

/// Configuration and localization state shared by the commands.
pub struct Project {
    pub config: Config,
    pub locales: Locales,
}

impl Project {
    /// Open a project, `lang` overrides the configured language.
    ///
    /// An unknown language leaves the configured one active.
    pub fn open<P: AsRef<Path>>(project: P, lang: Option<&str>) -> Result<Self> {
        let config = load_config(project)?;
        let mut locales = Locales::load(&config)?;
        if let Some(lang) = lang {
            locales.set_active_locale(lang);
        }
        debug!("Active locale {}", locales.active());
        Ok(Self { config, locales })
    }

    pub fn backend(&self) -> Result<Box<dyn Backend>> {
        Ok(backend::open(&self.config)?)
    }

    /// Sign in with explicit credentials or the configured admin account.
    pub async fn sign_in(
        &self,
        backend: &dyn Backend,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Session> {
        let admin = &self.config.admin;
        let credentials = Credentials {
            email: email.unwrap_or(admin.email.as_str()).to_string(),
            password: password.unwrap_or(admin.password.as_str()).to_string(),
        };
        Ok(backend.sign_in(&credentials).await?)
    }

    /// Warn that writes to the in-memory data do not outlive the process.
    pub(crate) fn warn_ephemeral(&self) {
        if self.config.backend.mock {
            warn!("Using in-memory data, changes are discarded on exit");
        } else {
            info!("Writing to {}", self.config.backend.url);
        }
    }
}

/// Split a `field=value` argument.
pub(crate) fn assignment(arg: &str) -> Result<(String, String)> {
    let mut parts = arg.splitn(2, '=');
    match (parts.next(), parts.next()) {
        (Some(field), Some(value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::Assignment(arg.to_string())),
    }
}

pub mod admin;
pub mod contact;
pub mod dashboard;
pub mod locales;
pub mod route;
pub mod search;
