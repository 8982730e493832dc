use serde::{Deserialize, Serialize};

use crate::{EntityKind, FieldKind, FieldSchema, Fields, Record, ValidationError, Value};

pub(crate) type Validation = std::result::Result<(), ValidationError>;

/// Unvalidated data destined to become or replace a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub kind: EntityKind,
    pub fields: Fields,
}

impl Draft {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            fields: Fields::new(),
        }
    }

    /// Start an edit from an existing record. Columns the schema
    /// does not describe, such as `created_at`, are not carried over.
    pub fn from_record(kind: EntityKind, record: &Record) -> Self {
        let schema = kind.schema();
        let fields = record
            .fields
            .iter()
            .filter(|(name, _)| schema.field(name).is_some())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Self { kind, fields }
    }

    pub fn with<S: Into<String>, V: Into<Value>>(mut self, name: S, value: V) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Assign a field from raw form input, lists are comma separated.
    pub fn set_input(&mut self, name: &str, raw: &str) -> Validation {
        let schema = self.kind.schema();
        let field = schema.field(name).ok_or_else(|| ValidationError::UnknownField {
            kind: self.kind,
            field: name.to_string(),
        })?;

        let value = parse_input(field, raw)?;
        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    /// Check the draft against the schema for its entity kind.
    pub fn validate(&self) -> Validation {
        let schema = self.kind.schema();
        for name in self.fields.keys() {
            if schema.field(name).is_none() {
                return Err(ValidationError::UnknownField {
                    kind: self.kind,
                    field: name.to_string(),
                });
            }
        }

        for field in schema.fields.iter() {
            match self.fields.get(field.name) {
                Some(value) if !value.is_blank() => check_value(field, value)?,
                _ if field.required => {
                    return Err(ValidationError::MissingField {
                        kind: self.kind,
                        field: field.name.to_string(),
                    })
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Convert raw form input to the value shape a field expects.
pub(crate) fn parse_input(
    field: &FieldSchema,
    raw: &str,
) -> std::result::Result<Value, ValidationError> {
    let value = match field.kind {
        FieldKind::List => Value::List(
            raw.split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect(),
        ),
        FieldKind::Number { .. } => {
            let number = raw.trim().parse::<f64>().map_err(|_| ValidationError::FieldType {
                field: field.name.to_string(),
                expected: field.kind,
            })?;
            Value::Number(number)
        }
        _ => Value::Text(raw.to_string()),
    };
    Ok(value)
}

pub(crate) fn check_value(field: &FieldSchema, value: &Value) -> Validation {
    let type_error = || ValidationError::FieldType {
        field: field.name.to_string(),
        expected: field.kind,
    };

    match (field.kind, value) {
        (FieldKind::Text, Value::Text(_)) => Ok(()),
        (FieldKind::List, Value::List(_)) => Ok(()),
        (FieldKind::Email, Value::Text(ref s)) => {
            let mut parts = s.trim().splitn(2, '@');
            let local = parts.next().unwrap_or_default();
            let domain = parts.next().unwrap_or_default();
            if local.is_empty() || domain.is_empty() || domain.contains('@') {
                return Err(ValidationError::InvalidEmail {
                    field: field.name.to_string(),
                });
            }
            Ok(())
        }
        (FieldKind::Number { min, max }, Value::Number(n)) => {
            if !(min..=max).contains(n) {
                return Err(ValidationError::OutOfRange {
                    field: field.name.to_string(),
                    min,
                    max,
                });
            }
            Ok(())
        }
        (FieldKind::Choice(choices), Value::Text(ref s)) => {
            if !choices.iter().any(|c| c.value == s.as_str()) {
                return Err(ValidationError::InvalidChoice {
                    field: field.name.to_string(),
                    value: s.clone(),
                });
            }
            Ok(())
        }
        _ => Err(type_error()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Draft, EntityKind, FieldKind, Record, Result, ValidationError, Value};

    fn office() -> Draft {
        Draft::new(EntityKind::Office)
            .with("region", "Hawassa")
            .with("address", "Tabor Sub-city, House No. 12")
            .with("phone", "+251-46-220-1111")
            .with("email", "hawassa@kirkoslegalaid.org")
            .with("hours", "8:00 AM - 5:00 PM")
    }

    #[test]
    fn complete_draft() {
        assert_eq!(Ok(()), office().validate());
    }

    #[test]
    fn missing_and_blank_fields() {
        let mut draft = office();
        draft.fields.shift_remove("hours");
        assert_eq!(
            Err(ValidationError::MissingField {
                kind: EntityKind::Office,
                field: "hours".to_string()
            }),
            draft.validate()
        );

        let draft = office().with("phone", "   ");
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::MissingField { ref field, .. }) if field == "phone"
        ));
    }

    #[test]
    fn optional_fields_may_be_blank() {
        let draft = Draft::new(EntityKind::Resource)
            .with("title", "Land Registration")
            .with("description", "Registering rural land use rights")
            .with("category", "property")
            .with("type", "Form")
            .with("languages", vec!["Amharic".to_string()])
            .with("file_url", "");
        assert_eq!(Ok(()), draft.validate());
    }

    #[test]
    fn edit_of_a_stored_record() -> Result<()> {
        let stored = Record::from_json(json!({
            "id": 2,
            "region": "Dire Dawa",
            "address": "Kezira, near the railway station",
            "phone": "+251-25-111-2222",
            "email": "diredawa@kirkoslegalaid.org",
            "hours": "8:00 AM - 5:00 PM",
            "created_at": "2024-01-15T09:30:00Z"
        }))?;
        assert!(stored.fields.contains_key("created_at"));

        let mut draft = Draft::from_record(EntityKind::Office, &stored);
        assert!(!draft.fields.contains_key("created_at"));
        assert_eq!(5, draft.fields.len());
        assert_eq!(Some(&Value::from("Dire Dawa")), draft.fields.get("region"));

        assert_eq!(Ok(()), draft.set_input("hours", "8:30 AM - 5:30 PM"));
        assert_eq!(Ok(()), draft.validate());
        Ok(())
    }

    #[test]
    fn unknown_field() {
        let draft = office().with("fax", "+251-11-000-0000");
        assert!(matches!(draft.validate(), Err(ValidationError::UnknownField { .. })));
    }

    #[test]
    fn shape_checks() {
        let draft = office().with("email", "hawassa.kirkoslegalaid.org");
        assert!(matches!(draft.validate(), Err(ValidationError::InvalidEmail { .. })));

        let draft = office().with("hours", vec!["8:00".to_string()]);
        assert!(matches!(draft.validate(), Err(ValidationError::FieldType { .. })));

        let mut draft = Draft::new(EntityKind::Resource)
            .with("title", "Tenancy Basics")
            .with("description", "Rights of tenants")
            .with("category", "housing")
            .with("type", "Guide")
            .with("languages", vec!["English".to_string()]);
        assert!(matches!(draft.validate(), Err(ValidationError::InvalidChoice { .. })));
        draft.fields.insert("category".to_string(), Value::from("property"));
        assert_eq!(Ok(()), draft.validate());
    }

    #[test]
    fn form_input() {
        let mut draft = Draft::new(EntityKind::Lawyer);
        assert_eq!(Ok(()), draft.set_input("languages", "Amharic, English,, Oromo "));
        assert_eq!(
            Some(&Value::List(vec![
                "Amharic".to_string(),
                "English".to_string(),
                "Oromo".to_string()
            ])),
            draft.fields.get("languages")
        );

        assert_eq!(Ok(()), draft.set_input("rating", "4.2"));
        assert_eq!(Some(&Value::Number(4.2)), draft.fields.get("rating"));

        assert!(matches!(
            draft.set_input("rating", "excellent"),
            Err(ValidationError::FieldType { expected: FieldKind::Number { .. }, .. })
        ));
        assert!(matches!(
            draft.set_input("salary", "1"),
            Err(ValidationError::UnknownField { .. })
        ));
    }

    #[test]
    fn rating_range() {
        let mut draft = Draft::new(EntityKind::Lawyer);
        for (name, value) in [
            ("name", "Ato Yonas Bekele"),
            ("specialization", "Labor Law"),
            ("location", "Adama"),
            ("phone", "+251-22-111-0000"),
            ("email", "yonas.bekele@law.et"),
            ("rating", "5.5"),
            ("experience", "3 years"),
            ("languages", "Amharic, Oromo"),
        ]
        .iter()
        {
            draft.set_input(name, value).unwrap();
        }
        assert!(matches!(draft.validate(), Err(ValidationError::OutOfRange { .. })));
        draft.set_input("rating", "4.0").unwrap();
        assert_eq!(Ok(()), draft.validate());
    }
}
