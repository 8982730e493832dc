use std::path::PathBuf;

use log::info;
use serde::Serialize;

use collections::{
    group_by, Collection, EntityKind, FieldKind, FieldSchema, FilterSpec, Record,
    ValidationError,
};

use super::{assignment, Project};
use crate::Result;

#[derive(Debug)]
pub struct SearchOptions {
    pub project: PathBuf,
    pub kind: EntityKind,
    pub query: String,
    /// Equality constraints as `field=value`.
    pub filters: Vec<String>,
}

#[derive(Debug)]
pub struct FilterOptions {
    pub project: PathBuf,
    pub lang: Option<String>,
    pub kind: EntityKind,
    pub field: String,
}

/// A filter choice with its display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterChoice {
    pub value: String,
    pub label: String,
}

fn schema_field(kind: EntityKind, name: &str) -> Result<&'static FieldSchema> {
    Ok(kind
        .schema()
        .field(name)
        .ok_or_else(|| ValidationError::UnknownField {
            kind,
            field: name.to_string(),
        })?)
}

/// Build the filter for a search from command line arguments.
pub fn filter_spec(kind: EntityKind, query: &str, filters: &[String]) -> Result<FilterSpec> {
    let mut spec = FilterSpec::for_kind(kind).query(query);
    for arg in filters {
        let (field, value) = assignment(arg)?;
        schema_field(kind, &field)?;
        spec = spec.equals(field, value);
    }
    Ok(spec)
}

pub fn find<'a>(collection: &'a Collection, spec: &FilterSpec) -> Vec<&'a Record> {
    let records = collection.query(spec);
    info!(
        "{} of {} {} records",
        records.len(),
        collection.len(),
        collection.kind()
    );
    records
}

/// Search results as JSON, emergency contacts keyed by category.
pub fn render(kind: EntityKind, records: Vec<&Record>) -> Result<String> {
    let json = match kind {
        EntityKind::Emergency => serde_json::to_string_pretty(&group_by(records, "category"))?,
        _ => serde_json::to_string_pretty(&records)?,
    };
    Ok(json)
}

/// Distinct values of a field labelled in the active locale.
pub fn choices(project: &Project, collection: &Collection, field: &str) -> Result<Vec<FilterChoice>> {
    let schema = schema_field(collection.kind(), field)?;
    Ok(collection
        .options(field)
        .into_iter()
        .map(|value| {
            let label = match schema.kind {
                FieldKind::Choice(choices) => choices
                    .iter()
                    .find(|c| c.value == value.as_str())
                    .map(|c| project.locales.resolve(c.label))
                    .unwrap_or(value.as_str())
                    .to_string(),
                _ => value.clone(),
            };
            FilterChoice { value, label }
        })
        .collect())
}

pub async fn search(options: SearchOptions) -> Result<()> {
    let project = Project::open(&options.project, None)?;
    let spec = filter_spec(options.kind, &options.query, &options.filters)?;
    let backend = project.backend()?;
    let collection = backend.list_records(options.kind).await?;
    let records = find(&collection, &spec);
    println!("{}", render(options.kind, records)?);
    Ok(())
}

pub async fn options(options: FilterOptions) -> Result<()> {
    let project = Project::open(&options.project, options.lang.as_deref())?;
    let backend = project.backend()?;
    let collection = backend.list_records(options.kind).await?;
    for choice in choices(&project, &collection, &options.field)? {
        if choice.label == choice.value {
            println!("{}", choice.value);
        } else {
            println!("{}\t{}", choice.value, choice.label);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use collections::{seed, EntityKind};

    use super::{choices, filter_spec, find, render, FilterChoice};
    use crate::command::{tests::fixture, Project};
    use crate::{Error, Result};

    #[test]
    fn search_lawyers() -> Result<()> {
        let lawyers = seed::collection(EntityKind::Lawyer)?;

        let spec = filter_spec(EntityKind::Lawyer, "addis", &[])?;
        let ids: Vec<u64> = find(&lawyers, &spec).iter().map(|r| r.id).collect();
        assert_eq!(vec![1, 2, 5], ids);

        let spec = filter_spec(
            EntityKind::Lawyer,
            "",
            &["specialization=Family Law".to_string()],
        )?;
        let ids: Vec<u64> = find(&lawyers, &spec).iter().map(|r| r.id).collect();
        assert_eq!(vec![1], ids);
        Ok(())
    }

    #[test]
    fn emergency_contacts_by_category() -> Result<()> {
        let emergency = seed::collection(EntityKind::Emergency)?;
        let spec = filter_spec(EntityKind::Emergency, "", &[])?;
        let output = render(EntityKind::Emergency, find(&emergency, &spec))?;
        let headings: Vec<usize> = [
            "General Legal Emergency",
            "Domestic Violence",
            "Criminal Defense",
            "Property Disputes",
        ]
        .iter()
        .filter_map(|category| output.find(&format!("\"{}\": [", category)))
        .collect();
        assert_eq!(4, headings.len());
        assert!(headings.windows(2).all(|w| w[0] < w[1]));

        let grouped: serde_json::Value = serde_json::from_str(&output)?;
        assert_eq!(2, grouped["Domestic Violence"].as_array().map_or(0, |a| a.len()));
        assert_eq!(3, grouped["Domestic Violence"][0]["id"]);

        let lawyers = seed::collection(EntityKind::Lawyer)?;
        let spec = filter_spec(EntityKind::Lawyer, "addis", &[])?;
        let output = render(EntityKind::Lawyer, find(&lawyers, &spec))?;
        let listed: serde_json::Value = serde_json::from_str(&output)?;
        assert_eq!(3, listed.as_array().map_or(0, |a| a.len()));
        Ok(())
    }

    #[test]
    fn unknown_filter_field() {
        let result = filter_spec(EntityKind::Office, "", &["city=Adama".to_string()]);
        assert!(matches!(result, Err(Error::Validation(_))));
        let result = filter_spec(EntityKind::Office, "", &["region".to_string()]);
        assert!(matches!(result, Err(Error::Assignment(_))));
    }

    #[test]
    fn labelled_choices() -> Result<()> {
        let project = Project::open(fixture(), None)?;
        let resources = seed::collection(EntityKind::Resource)?;
        let options = choices(&project, &resources, "category")?;
        assert!(!options.is_empty());
        for choice in options.iter() {
            assert_ne!(choice.value, choice.label);
        }

        let offices = seed::collection(EntityKind::Office)?;
        let regions = choices(&project, &offices, "region")?;
        assert_eq!(
            FilterChoice {
                value: "Addis Ababa".to_string(),
                label: "Addis Ababa".to_string(),
            },
            regions[0]
        );
        assert_eq!(4, regions.len());
        Ok(())
    }
}
