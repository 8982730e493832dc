use std::path::PathBuf;

use log::info;

use backend::{Backend, Manager, Screen};
use collections::{Draft, EntityKind, Record};

use super::{assignment, Project};
use crate::{Error, Result};

#[derive(Debug)]
pub enum Action {
    List { query: String },
    Add { fields: Vec<String> },
    Update { id: u64, fields: Vec<String> },
    Delete { id: u64, confirmed: bool },
}

#[derive(Debug)]
pub struct AdminOptions {
    pub project: PathBuf,
    pub kind: EntityKind,
    pub email: Option<String>,
    pub password: Option<String>,
    pub action: Action,
}

/// Apply `field=value` arguments to a draft.
pub fn apply(mut draft: Draft, fields: &[String]) -> Result<Draft> {
    for arg in fields {
        let (field, value) = assignment(arg)?;
        draft.set_input(&field, &value)?;
    }
    Ok(draft)
}

/// Perform an action on a loaded manager, returning the affected records.
pub async fn perform(manager: &mut Manager<'_>, action: Action) -> Result<Vec<Record>> {
    let kind = manager.kind();
    match action {
        Action::List { query } => {
            manager.search(query);
            Ok(manager.visible().into_iter().cloned().collect())
        }
        Action::Add { fields } => {
            let draft = apply(Draft::new(kind), &fields)?;
            Ok(vec![manager.create(&draft).await?])
        }
        Action::Update { id, fields } => {
            let current = manager
                .state()
                .collection()
                .and_then(|c| c.get(id))
                .ok_or(collections::Error::NotFound { id })?;
            let draft = apply(Draft::from_record(kind, current), &fields)?;
            Ok(vec![manager.update(id, &draft).await?])
        }
        Action::Delete { id, confirmed } => {
            if !confirmed {
                return Err(Error::Unconfirmed { kind, id });
            }
            Ok(vec![manager.delete(id).await?])
        }
    }
}

async fn manage(project: &Project, backend: &dyn Backend, options: AdminOptions) -> Result<()> {
    let mut manager = Manager::new(backend, options.kind);
    if let Screen::Failed(message) = manager.load().await {
        return Err(Error::new(message.clone()));
    }

    if !matches!(options.action, Action::List { .. }) {
        project.warn_ephemeral();
    }

    let records = perform(&mut manager, options.action).await?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    info!("{} {} records", manager.visible().len(), options.kind);
    Ok(())
}

pub async fn run(options: AdminOptions) -> Result<()> {
    let project = Project::open(&options.project, None)?;
    let backend = project.backend()?;
    project
        .sign_in(
            &*backend,
            options.email.as_deref(),
            options.password.as_deref(),
        )
        .await?;

    let result = manage(&project, &*backend, options).await;
    backend.sign_out().await?;
    result
}
