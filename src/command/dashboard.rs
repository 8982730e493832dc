use std::path::PathBuf;

use backend::{Backend, Dashboard};
use router::{AdminView, Page};

use super::Project;
use crate::Result;

#[derive(Debug)]
pub struct DashboardOptions {
    pub project: PathBuf,
    pub lang: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Localized heading and count for each collection.
pub fn rows(project: &Project, dashboard: &Dashboard) -> Vec<(String, usize)> {
    dashboard
        .counts
        .iter()
        .map(|count| {
            let key = Page::Admin(AdminView::Manage(count.kind)).title_key();
            (project.locales.resolve(key).to_string(), count.records)
        })
        .collect()
}

pub async fn dashboard(options: DashboardOptions) -> Result<()> {
    let project = Project::open(&options.project, options.lang.as_deref())?;
    let backend = project.backend()?;
    signed_in(
        &project,
        &*backend,
        options.email.as_deref(),
        options.password.as_deref(),
    )
    .await
}

/// Show the counts inside a session, signing out even when loading fails.
async fn signed_in(
    project: &Project,
    backend: &dyn Backend,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    project.sign_in(backend, email, password).await?;
    let result = show(project, backend).await;
    backend.sign_out().await?;
    result
}

async fn show(project: &Project, backend: &dyn Backend) -> Result<()> {
    let dashboard = Dashboard::load(backend).await?;
    println!("{}", project.locales.resolve("dashboard"));
    for (title, records) in rows(project, &dashboard) {
        println!("  {:<24} {:>6}", title, records);
    }
    println!("  {:<24} {:>6}", "", dashboard.total());
    Ok(())
}
