//! Free text and equality filtering over an ordered list of records.
//!
//! Filtering is stable and recomputed on every call, the expected
//! collections hold tens to a few hundred records.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{EntityKind, Record};

/// Requirement on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Constraint {
    Any,
    Equals(String),
}

impl Default for Constraint {
    fn default() -> Self {
        Constraint::Any
    }
}

impl From<Option<String>> for Constraint {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(value) if !value.is_empty() => Constraint::Equals(value),
            _ => Constraint::Any,
        }
    }
}

/// Free text query plus equality constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub query: String,
    /// Fields the free text query is matched against.
    pub search_fields: Vec<String>,
    pub constraints: IndexMap<String, Constraint>,
}

impl FilterSpec {
    /// Filter searching the designated fields of an entity schema.
    pub fn for_kind(kind: EntityKind) -> Self {
        Self {
            query: String::new(),
            search_fields: kind
                .schema()
                .search
                .iter()
                .map(|s| s.to_string())
                .collect(),
            constraints: IndexMap::new(),
        }
    }

    pub fn query<S: Into<String>>(mut self, query: S) -> Self {
        self.query = query.into();
        self
    }

    pub fn constrain<S: Into<String>, C: Into<Constraint>>(
        mut self,
        field: S,
        constraint: C,
    ) -> Self {
        self.constraints.insert(field.into(), constraint.into());
        self
    }

    pub fn equals<S: Into<String>, V: Into<String>>(self, field: S, value: V) -> Self {
        self.constrain(field, Constraint::Equals(value.into()))
    }

    /// Matches every record.
    pub fn is_unrestricted(&self) -> bool {
        self.query.is_empty() && self.constraints.values().all(|c| c == &Constraint::Any)
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_folded(record, &self.query.to_lowercase())
    }

    fn matches_folded(&self, record: &Record, needle: &str) -> bool {
        let text = needle.is_empty()
            || self.search_fields.iter().any(|field| {
                record
                    .get(field)
                    .map_or(false, |value| value.contains_folded(needle))
            });

        text && self.constraints.iter().all(|(field, constraint)| match constraint {
            Constraint::Any => true,
            Constraint::Equals(expected) => {
                record.get(field).map_or(false, |value| value.matches(expected))
            }
        })
    }
}

/// Records matching `spec` in their original order.
pub fn filter<'a>(records: &'a [Record], spec: &FilterSpec) -> Vec<&'a Record> {
    let needle = spec.query.to_lowercase();
    records
        .iter()
        .filter(|record| spec.matches_folded(record, &needle))
        .collect()
}

/// Distinct values of `field` in first seen order.
pub fn distinct_values(records: &[Record], field: &str) -> Vec<String> {
    let mut values = IndexSet::new();
    for record in records {
        if let Some(value) = record.get(field) {
            for item in value.values() {
                if !item.is_empty() {
                    values.insert(item);
                }
            }
        }
    }
    values.into_iter().collect()
}

/// Records bucketed by the display form of `field`, groups and their
/// members both in first seen order. Records without the field are
/// left out.
pub fn group_by<'a, I>(records: I, field: &str) -> IndexMap<String, Vec<&'a Record>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: IndexMap<String, Vec<&'a Record>> = IndexMap::new();
    for record in records {
        if let Some(value) = record.get(field) {
            groups
                .entry(value.to_string())
                .or_insert_with(Vec::new)
                .push(record);
        }
    }
    groups
}
