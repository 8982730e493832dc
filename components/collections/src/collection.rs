use log::info;
use serde::{Deserialize, Serialize};

use crate::query::{self, FilterSpec};
use crate::{mutate, Draft, EntityKind, Error, Record, Result, ValidationError};

/// Ordered records of one entity kind owned by a single screen.
///
/// Mutations either apply completely or leave the collection unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    kind: EntityKind,
    records: Vec<Record>,
}

impl Collection {
    pub fn new(kind: EntityKind, records: Vec<Record>) -> Self {
        Self { kind, records }
    }

    pub fn empty(kind: EntityKind) -> Self {
        Collection::new(kind, Vec::new())
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn query(&self, spec: &FilterSpec) -> Vec<&Record> {
        query::filter(&self.records, spec)
    }

    /// Values for the equality filter on `field`.
    pub fn options(&self, field: &str) -> Vec<String> {
        query::distinct_values(&self.records, field)
    }

    fn check_kind(&self, draft: &Draft) -> Result<()> {
        if draft.kind != self.kind {
            return Err(Error::Validation(ValidationError::KindMismatch {
                expected: self.kind,
                found: draft.kind,
            }));
        }
        Ok(())
    }

    /// Append a record built from `draft`, returning the new identifier.
    pub fn create(&mut self, draft: &Draft) -> Result<u64> {
        self.check_kind(draft)?;
        let (records, id) = mutate::create(&self.records, draft)?;
        self.records = records;
        info!("Created {} {}", self.kind, id);
        Ok(id)
    }

    pub fn update(&mut self, id: u64, draft: &Draft) -> Result<&Record> {
        self.check_kind(draft)?;
        self.records = mutate::update(&self.records, id, draft)?;
        info!("Updated {} {}", self.kind, id);
        self.get(id).ok_or(Error::NotFound { id })
    }

    /// Remove the record with `id` and return it.
    pub fn delete(&mut self, id: u64) -> Result<Record> {
        let removed = self.get(id).cloned().ok_or(Error::NotFound { id })?;
        self.records = mutate::delete(&self.records, id)?;
        info!("Deleted {} {}", self.kind, id);
        Ok(removed)
    }
}
