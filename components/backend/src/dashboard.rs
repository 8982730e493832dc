use serde::Serialize;

use collections::EntityKind;

use crate::{Backend, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Count {
    pub kind: EntityKind,
    pub records: usize,
}

/// Record totals shown on the admin home screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub counts: Vec<Count>,
}

impl Dashboard {
    pub async fn load(backend: &dyn Backend) -> Result<Self> {
        let mut counts = Vec::new();
        for kind in EntityKind::all().iter() {
            let collection = backend.list_records(*kind).await?;
            counts.push(Count {
                kind: *kind,
                records: collection.len(),
            });
        }
        Ok(Self { counts })
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.counts
            .iter()
            .find(|c| c.kind == kind)
            .map_or(0, |c| c.records)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.records).sum()
    }
}
