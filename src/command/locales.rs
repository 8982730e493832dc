use std::path::PathBuf;

use log::info;

use super::Project;
use crate::Result;

#[derive(Debug)]
pub struct ListOptions {
    pub project: PathBuf,
    pub missing: bool,
}

#[derive(Debug)]
pub struct TranslateOptions {
    pub project: PathBuf,
    pub lang: Option<String>,
    pub keys: Vec<String>,
}

pub fn list(options: ListOptions) -> Result<()> {
    let project = Project::open(&options.project, None)?;
    let locales = &project.locales;
    for info in locales.list_locales() {
        let marker = if info.code == locales.active() { "*" } else { " " };
        println!("{} {} ({})", marker, info.code, info.display_name);
        if options.missing {
            for key in locales.missing_keys(&info.code)? {
                println!("    {}", key);
            }
        }
    }
    Ok(())
}

/// Resolved text for each key, in key order.
pub fn resolve(project: &Project, keys: &[String]) -> Vec<String> {
    keys.iter()
        .map(|key| project.locales.resolve(key).to_string())
        .collect()
}

pub fn translate(options: TranslateOptions) -> Result<()> {
    let project = Project::open(&options.project, options.lang.as_deref())?;
    info!("Translating to {}", project.locales.active());
    for text in resolve(&project, &options.keys) {
        println!("{}", text);
    }
    Ok(())
}
