use std::path::PathBuf;

use log::{info, warn};

use collections::{Inquiry, INQUIRY_FIELDS};

use super::{assignment, Project};
use crate::Result;

#[derive(Debug)]
pub struct ContactOptions {
    pub project: PathBuf,
    pub lang: Option<String>,
    /// Form inputs as `field=value`.
    pub fields: Vec<String>,
}

/// Fill in the contact form, the preferred language defaults to the
/// active locale.
pub fn inquiry(project: &Project, fields: &[String]) -> Result<Inquiry> {
    let mut inquiry = Inquiry::new(project.locales.active());
    for arg in fields {
        let (field, value) = assignment(arg)?;
        inquiry.set_input(&field, &value)?;
    }
    inquiry.validate()?;
    Ok(inquiry)
}

pub fn contact(options: ContactOptions) -> Result<()> {
    let project = Project::open(&options.project, options.lang.as_deref())?;
    if options.fields.is_empty() {
        for field in INQUIRY_FIELDS.iter() {
            let marker = if field.required { "*" } else { "" };
            println!("{}{}\t{}", field.name, marker, field.kind);
        }
        return Ok(());
    }

    let inquiry = inquiry(&project, &options.fields)?;
    println!("{}", serde_json::to_string_pretty(&inquiry)?);
    info!("Inquiry is complete");
    warn!("Inquiries are not delivered, contact an office directly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use collections::{ValidationError, Value};

    use super::inquiry;
    use crate::command::{tests::fixture, Project};
    use crate::{Error, Result};

    fn form() -> Vec<String> {
        vec![
            "name=Abebe Kebede".to_string(),
            "email=abebe@example.com".to_string(),
            "subject=Unpaid wages".to_string(),
            "message=My employer has not paid me for three months.".to_string(),
        ]
    }

    #[test]
    fn preferred_language_follows_locale() -> Result<()> {
        let project = Project::open(fixture(), Some("or"))?;
        let filled = inquiry(&project, &form())?;
        assert_eq!(Some(&Value::from("or")), filled.get("preferredLanguage"));

        let mut fields = form();
        fields.push("preferredLanguage=am".to_string());
        fields.push("urgency=urgent".to_string());
        let filled = inquiry(&project, &fields)?;
        assert_eq!(Some(&Value::from("am")), filled.get("preferredLanguage"));
        assert_eq!(Some(&Value::from("urgent")), filled.get("urgency"));
        Ok(())
    }

    #[test]
    fn incomplete_form() -> Result<()> {
        let project = Project::open(fixture(), None)?;
        let result = inquiry(&project, &form()[..3]);
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingInput { ref field, .. })) if field == "message"
        ));

        let result = inquiry(&project, &["subject".to_string()]);
        assert!(matches!(result, Err(Error::Assignment(_))));
        Ok(())
    }
}
