use serde::{Deserialize, Serialize};

use crate::draft::{check_value, parse_input, Validation};
use crate::{Choice, FieldKind, FieldSchema, Fields, ValidationError, Value};

static FORM: &str = "inquiry";

static LANGUAGES: [Choice; 3] = [
    Choice {
        value: "en",
        label: "English",
    },
    Choice {
        value: "am",
        label: "አማርኛ (Amharic)",
    },
    Choice {
        value: "or",
        label: "Afaan Oromoo",
    },
];

static URGENCY: [Choice; 3] = [
    Choice {
        value: "normal",
        label: "Normal",
    },
    Choice {
        value: "urgent",
        label: "Urgent",
    },
    Choice {
        value: "emergency",
        label: "Emergency",
    },
];

/// Fields of the contact form in display order.
pub static INQUIRY_FIELDS: [FieldSchema; 7] = [
    FieldSchema {
        name: "name",
        label: "Full Name",
        kind: FieldKind::Text,
        required: true,
    },
    FieldSchema {
        name: "email",
        label: "Email Address",
        kind: FieldKind::Email,
        required: true,
    },
    FieldSchema {
        name: "phone",
        label: "Phone Number",
        kind: FieldKind::Text,
        required: false,
    },
    FieldSchema {
        name: "subject",
        label: "Subject",
        kind: FieldKind::Text,
        required: true,
    },
    FieldSchema {
        name: "message",
        label: "Message",
        kind: FieldKind::Text,
        required: true,
    },
    FieldSchema {
        name: "preferredLanguage",
        label: "Preferred Language",
        kind: FieldKind::Choice(&LANGUAGES),
        required: true,
    },
    FieldSchema {
        name: "urgency",
        label: "Urgency Level",
        kind: FieldKind::Choice(&URGENCY),
        required: true,
    },
];

fn inquiry_field(name: &str) -> Option<&'static FieldSchema> {
    INQUIRY_FIELDS.iter().find(|f| f.name == name)
}

/// A message for the legal aid center filled in on the contact form.
///
/// Only the shape of the message is checked, sending it is left to
/// whatever receives the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub fields: Fields,
}

impl Default for Inquiry {
    fn default() -> Self {
        Inquiry::new("en")
    }
}

impl Inquiry {
    /// Blank form with normal urgency, the preferred language is
    /// `lang` when the form offers it and English otherwise.
    pub fn new(lang: &str) -> Self {
        let lang = LANGUAGES
            .iter()
            .find(|c| c.value == lang)
            .map_or("en", |c| c.value);
        let mut fields = Fields::new();
        fields.insert("preferredLanguage".to_string(), Value::from(lang));
        fields.insert("urgency".to_string(), Value::from("normal"));
        Self { fields }
    }

    pub fn with<S: Into<String>, V: Into<Value>>(mut self, name: S, value: V) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Assign a field from raw form input.
    pub fn set_input(&mut self, name: &str, raw: &str) -> Validation {
        let field = inquiry_field(name).ok_or_else(|| ValidationError::UnknownInput {
            form: FORM,
            field: name.to_string(),
        })?;
        let value = parse_input(field, raw)?;
        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    pub fn validate(&self) -> Validation {
        if let Some(name) = self.fields.keys().find(|k| inquiry_field(k).is_none()) {
            return Err(ValidationError::UnknownInput {
                form: FORM,
                field: name.to_string(),
            });
        }

        for field in INQUIRY_FIELDS.iter() {
            match self.fields.get(field.name) {
                Some(value) if !value.is_blank() => check_value(field, value)?,
                _ if field.required => {
                    return Err(ValidationError::MissingInput {
                        form: FORM,
                        field: field.name.to_string(),
                    })
                }
                _ => {}
            }
        }
        Ok(())
    }
}
