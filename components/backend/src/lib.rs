use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use collections::{Collection, Draft, EntityKind, Record};
use config::Config;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Sign in failed: {0}")]
    Auth(String),

    #[error("Unable to fetch {kind} records: {message}")]
    Fetch { kind: EntityKind, message: String },

    #[error("Unable to write {kind} record: {message}")]
    Write { kind: EntityKind, message: String },

    #[error(transparent)]
    Collection(#[from] collections::Error),

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::error::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Config(#[from] config::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// An authenticated admin session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub access_token: String,
}

/// Remote persistence and authentication for the admin screens.
///
/// Writes go through the same validation as local mutation so a
/// draft rejected here is rejected everywhere. Dropping a returned
/// future cancels the request.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session>;

    async fn sign_out(&self) -> Result<()>;

    async fn list_records(&self, kind: EntityKind) -> Result<Collection>;

    async fn create_record(&self, draft: &Draft) -> Result<Record>;

    async fn update_record(&self, id: u64, draft: &Draft) -> Result<Record>;

    async fn delete_record(&self, kind: EntityKind, id: u64) -> Result<Record>;
}

/// Backend selected by the configuration, the in-memory
/// implementation while no remote service is wired up.
pub fn open(config: &Config) -> Result<Box<dyn Backend>> {
    if config.backend.mock {
        info!("Using in-memory data");
        return Ok(Box::new(MemoryBackend::seeded(config.admin.clone())?));
    }
    let backend = RestBackend::new(&config.backend)?;
    info!("Using remote data at {}", backend.endpoint());
    Ok(Box::new(backend))
}

mod dashboard;
mod manager;
mod memory;
mod rest;

pub use dashboard::Dashboard;
pub use manager::{Manager, Screen};
pub use memory::MemoryBackend;
pub use rest::RestBackend;
