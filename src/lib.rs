use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error("Unknown log level {0}")]
    UnknownLogLevel(String),

    #[error("Assignment {0} should be of the form field=value")]
    Assignment(String),

    #[error("Refusing to delete {kind} {id} without --yes")]
    Unconfirmed {
        kind: collections::EntityKind,
        id: u64,
    },

    #[error("Panic: {0}")]
    Panic(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::error::Error),

    #[error(transparent)]
    Config(#[from] config::Error),
    #[error(transparent)]
    Locale(#[from] locale::Error),
    #[error(transparent)]
    Collections(#[from] collections::Error),
    #[error(transparent)]
    Validation(#[from] collections::ValidationError),
    #[error(transparent)]
    Backend(#[from] backend::Error),
}

impl Error {
    pub fn new(s: String) -> Self {
        Error::Message(s)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

mod command;
pub mod opts;

pub use crate::command::admin;
pub use crate::command::contact;
pub use crate::command::dashboard;
pub use crate::command::locales;
pub use crate::command::route;
pub use crate::command::search;

pub use crate::command::{load_config, Project};
