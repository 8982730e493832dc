use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Allowed value of a choice field, the label is a
/// translation key for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Number { min: f64, max: f64 },
    List,
    Choice(&'static [Choice]),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Email => write!(f, "an email address"),
            FieldKind::Number { .. } => write!(f, "a number"),
            FieldKind::List => write!(f, "a list"),
            FieldKind::Choice(_) => write!(f, "one of the listed choices"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Field layout of an entity, drives form controls,
/// validation and the default filters.
#[derive(Debug)]
pub struct Schema {
    pub kind: EntityKind,
    pub fields: &'static [FieldSchema],
    /// Fields matched by free text search.
    pub search: &'static [&'static str],
    /// Fields offered as equality filters.
    pub filters: &'static [&'static str],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|f| f.required)
    }
}

const fn field(
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    required: bool,
) -> FieldSchema {
    FieldSchema {
        name,
        label,
        kind,
        required,
    }
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

static RESOURCE_CATEGORIES: [Choice; 6] = [
    choice("family", "familyLaw"),
    choice("criminal", "criminalLaw"),
    choice("civil", "civilRights"),
    choice("business", "businessLaw"),
    choice("property", "propertyLaw"),
    choice("labor", "laborLaw"),
];

static RESOURCE_TYPES: [Choice; 5] = [
    choice("Guide", "Guide"),
    choice("Manual", "Manual"),
    choice("Article", "Article"),
    choice("Handbook", "Handbook"),
    choice("Form", "Form"),
];

static EMERGENCY_CATEGORIES: [Choice; 4] = [
    choice("General Legal Emergency", "General Legal Emergency"),
    choice("Domestic Violence", "Domestic Violence"),
    choice("Criminal Defense", "Criminal Defense"),
    choice("Property Disputes", "Property Disputes"),
];

static LAWYER: Schema = Schema {
    kind: EntityKind::Lawyer,
    fields: &[
        field("name", "Name", FieldKind::Text, true),
        field("specialization", "specialization", FieldKind::Text, true),
        field("location", "location", FieldKind::Text, true),
        field("phone", "phone", FieldKind::Text, true),
        field("email", "email", FieldKind::Email, true),
        field("rating", "Rating", FieldKind::Number { min: 0.0, max: 5.0 }, true),
        field("experience", "Experience", FieldKind::Text, true),
        field("languages", "Languages", FieldKind::List, true),
        field("image_url", "Image", FieldKind::Text, false),
    ],
    search: &["name", "specialization", "location"],
    filters: &["specialization", "location"],
};

static RESOURCE: Schema = Schema {
    kind: EntityKind::Resource,
    fields: &[
        field("title", "Title", FieldKind::Text, true),
        field("description", "Description", FieldKind::Text, true),
        field("category", "Category", FieldKind::Choice(&RESOURCE_CATEGORIES), true),
        field("type", "Type", FieldKind::Choice(&RESOURCE_TYPES), true),
        field("languages", "Languages", FieldKind::List, true),
        field("file_url", "File", FieldKind::Text, false),
    ],
    search: &["title", "category"],
    filters: &["category", "type"],
};

static EMERGENCY: Schema = Schema {
    kind: EntityKind::Emergency,
    fields: &[
        field("name", "Name", FieldKind::Text, true),
        field("phone", "phone", FieldKind::Text, true),
        field("description", "Description", FieldKind::Text, true),
        field("category", "Category", FieldKind::Choice(&EMERGENCY_CATEGORIES), true),
        field("languages", "Languages", FieldKind::List, true),
        field("available", "available24", FieldKind::Text, true),
    ],
    search: &["name", "category"],
    filters: &["category"],
};

static OFFICE: Schema = Schema {
    kind: EntityKind::Office,
    fields: &[
        field("region", "Region", FieldKind::Text, true),
        field("address", "address", FieldKind::Text, true),
        field("phone", "phone", FieldKind::Text, true),
        field("email", "email", FieldKind::Email, true),
        field("hours", "Hours", FieldKind::Text, true),
    ],
    search: &["region", "address"],
    filters: &["region"],
};

/// The managed entity types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Lawyer,
    Resource,
    Emergency,
    Office,
}

impl EntityKind {
    pub fn all() -> [EntityKind; 4] {
        [
            EntityKind::Lawyer,
            EntityKind::Resource,
            EntityKind::Emergency,
            EntityKind::Office,
        ]
    }

    pub fn schema(&self) -> &'static Schema {
        match self {
            EntityKind::Lawyer => &LAWYER,
            EntityKind::Resource => &RESOURCE,
            EntityKind::Emergency => &EMERGENCY,
            EntityKind::Office => &OFFICE,
        }
    }

    /// Collection name, also the admin path segment.
    pub fn collection_name(&self) -> &'static str {
        match self {
            EntityKind::Lawyer => "lawyers",
            EntityKind::Resource => "resources",
            EntityKind::Emergency => "emergency",
            EntityKind::Office => "offices",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Lawyer => "lawyer",
            EntityKind::Resource => "legal resource",
            EntityKind::Emergency => "emergency contact",
            EntityKind::Office => "regional office",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lawyer" | "lawyers" => Ok(EntityKind::Lawyer),
            "resource" | "resources" => Ok(EntityKind::Resource),
            "emergency" | "emergency-contacts" => Ok(EntityKind::Emergency),
            "office" | "offices" => Ok(EntityKind::Office),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}
