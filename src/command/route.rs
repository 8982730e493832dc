use std::path::PathBuf;

use serde::Serialize;

use router::{Page, Shell};

use super::Project;
use crate::Result;

#[derive(Debug)]
pub struct RouteOptions {
    pub project: PathBuf,
    pub lang: Option<String>,
    pub paths: Vec<String>,
}

/// A resolved location with its localized title.
#[derive(Debug, Serialize)]
pub struct Resolved {
    pub path: String,
    pub shell: Shell,
    pub page: Option<Page>,
    pub title: Option<String>,
}

pub fn resolve(project: &Project, path: &str) -> Resolved {
    let route = router::resolve(path);
    Resolved {
        path: path.to_string(),
        shell: route.shell,
        page: route.page,
        title: route
            .title_key()
            .map(|key| project.locales.resolve(key).to_string()),
    }
}

pub fn route(options: RouteOptions) -> Result<()> {
    let project = Project::open(&options.project, options.lang.as_deref())?;
    let resolved: Vec<Resolved> = options
        .paths
        .iter()
        .map(|path| resolve(&project, path))
        .collect();
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
