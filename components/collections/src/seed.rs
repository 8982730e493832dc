//! Records bundled with the site, used until a remote service is connected.

use crate::{Collection, EntityKind, Record, Result};

static LAWYERS: &str = include_str!("../seed/lawyers.json");
static RESOURCES: &str = include_str!("../seed/resources.json");
static EMERGENCY: &str = include_str!("../seed/emergency.json");
static OFFICES: &str = include_str!("../seed/offices.json");

fn parse(content: &str) -> Result<Vec<Record>> {
    Ok(serde_json::from_str(content)?)
}

pub fn lawyers() -> Result<Vec<Record>> {
    parse(LAWYERS)
}

pub fn resources() -> Result<Vec<Record>> {
    parse(RESOURCES)
}

pub fn emergency() -> Result<Vec<Record>> {
    parse(EMERGENCY)
}

pub fn offices() -> Result<Vec<Record>> {
    parse(OFFICES)
}

pub fn collection(kind: EntityKind) -> Result<Collection> {
    let records = match kind {
        EntityKind::Lawyer => lawyers()?,
        EntityKind::Resource => resources()?,
        EntityKind::Emergency => emergency()?,
        EntityKind::Office => offices()?,
    };
    Ok(Collection::new(kind, records))
}
