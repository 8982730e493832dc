use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No record with id {id}")]
    NotFound { id: u64 },

    #[error("Unknown collection {0}")]
    UnknownKind(String),

    #[error("Record document should be an object")]
    RecordNotAnObject,

    #[error("Record document must have a numeric id")]
    RecordNoId,

    #[error(transparent)]
    Json(#[from] serde_json::error::Error),
}

/// Draft data rejected by an entity schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{kind} requires field {field}")]
    MissingField { kind: EntityKind, field: String },

    #[error("{kind} has no field {field}")]
    UnknownField { kind: EntityKind, field: String },

    #[error("Field {field} expects {expected}")]
    FieldType { field: String, expected: FieldKind },

    #[error("Field {field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    #[error("Field {field} does not allow {value}")]
    InvalidChoice { field: String, value: String },

    #[error("Field {field} is not an email address")]
    InvalidEmail { field: String },

    #[error("The {form} form requires field {field}")]
    MissingInput { form: &'static str, field: String },

    #[error("The {form} form has no field {field}")]
    UnknownInput { form: &'static str, field: String },

    #[error("A {found} draft cannot be applied to {expected}")]
    KindMismatch {
        expected: EntityKind,
        found: EntityKind,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

mod collection;
mod draft;
mod inquiry;
pub mod mutate;
pub mod query;
mod record;
mod schema;
pub mod seed;

pub use collection::Collection;
pub use draft::Draft;
pub use inquiry::{Inquiry, INQUIRY_FIELDS};
pub use query::{distinct_values, filter, group_by, Constraint, FilterSpec};
pub use record::{Fields, Record, Value};
pub use schema::{Choice, EntityKind, FieldKind, FieldSchema, Schema};
