use std::collections::BTreeMap;

use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::Mutex;

use collections::{seed, Collection, Draft, EntityKind, Record};
use config::AdminConfig;

use crate::{Backend, Credentials, Error, Result, Session};

static TOKEN: &str = "in-memory";

/// Backend holding every collection in process memory.
#[derive(Debug)]
pub struct MemoryBackend {
    admin: AdminConfig,
    collections: Mutex<BTreeMap<EntityKind, Collection>>,
    session: Mutex<Option<Session>>,
}

impl MemoryBackend {
    pub fn new(admin: AdminConfig) -> Self {
        Self {
            admin,
            collections: Mutex::new(BTreeMap::new()),
            session: Mutex::new(None),
        }
    }

    /// Backend preloaded with the bundled records.
    pub fn seeded(admin: AdminConfig) -> Result<Self> {
        let mut collections = BTreeMap::new();
        for kind in EntityKind::all().iter() {
            collections.insert(*kind, seed::collection(*kind)?);
        }
        Ok(Self {
            admin,
            collections: Mutex::new(collections),
            session: Mutex::new(None),
        })
    }

    pub async fn session(&self) -> Option<Session> {
        self.session.lock().await.clone()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        if credentials.email != self.admin.email || credentials.password != self.admin.password {
            return Err(Error::Auth(String::from("invalid email or password")));
        }
        let session = Session {
            email: credentials.email.clone(),
            access_token: String::from(TOKEN),
        };
        *self.session.lock().await = Some(session.clone());
        info!("Signed in {}", session.email);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        if let Some(session) = self.session.lock().await.take() {
            info!("Signed out {}", session.email);
        }
        Ok(())
    }

    async fn list_records(&self, kind: EntityKind) -> Result<Collection> {
        let map = self.collections.lock().await;
        let collection = map
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Collection::empty(kind));
        debug!("Listed {} {} records", collection.len(), kind);
        Ok(collection)
    }

    async fn create_record(&self, draft: &Draft) -> Result<Record> {
        let mut map = self.collections.lock().await;
        let collection = map
            .entry(draft.kind)
            .or_insert_with(|| Collection::empty(draft.kind));
        let id = collection.create(draft)?;
        Ok(collection
            .get(id)
            .cloned()
            .ok_or(collections::Error::NotFound { id })?)
    }

    async fn update_record(&self, id: u64, draft: &Draft) -> Result<Record> {
        let mut map = self.collections.lock().await;
        let collection = map
            .entry(draft.kind)
            .or_insert_with(|| Collection::empty(draft.kind));
        Ok(collection.update(id, draft)?.clone())
    }

    async fn delete_record(&self, kind: EntityKind, id: u64) -> Result<Record> {
        let mut map = self.collections.lock().await;
        let collection = map
            .entry(kind)
            .or_insert_with(|| Collection::empty(kind));
        Ok(collection.delete(id)?)
    }
}

#[cfg(test)]
mod tests {
    use collections::{Draft, EntityKind};
    use config::AdminConfig;

    use crate::{Backend, Credentials, Error, MemoryBackend, Result};

    fn contact() -> Draft {
        Draft::new(EntityKind::Emergency)
            .with("name", "Child Protection Line")
            .with("phone", "+251-11-556-5556")
            .with("description", "Legal support for children at risk")
            .with("category", "Domestic Violence")
            .with("languages", vec!["Amharic".to_string()])
            .with("available", "24/7")
    }

    #[tokio::test]
    async fn sign_in_with_admin_credentials() -> Result<()> {
        let admin: AdminConfig = Default::default();
        let backend = MemoryBackend::new(admin.clone());
        let wrong = Credentials {
            email: admin.email.clone(),
            password: "guess".to_string(),
        };
        assert!(matches!(backend.sign_in(&wrong).await, Err(Error::Auth(_))));
        assert!(backend.session().await.is_none());

        let credentials = Credentials {
            email: admin.email.clone(),
            password: admin.password.clone(),
        };
        let session = backend.sign_in(&credentials).await?;
        assert_eq!(admin.email, session.email);
        assert_eq!(Some(session), backend.session().await);

        backend.sign_out().await?;
        assert!(backend.session().await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn crud_through_backend() -> Result<()> {
        let backend = MemoryBackend::seeded(Default::default())?;
        let before = backend.list_records(EntityKind::Emergency).await?;

        let created = backend.create_record(&contact()).await?;
        assert_eq!(8, created.id);
        assert_eq!(8, backend.list_records(EntityKind::Emergency).await?.len());

        let updated = backend
            .update_record(created.id, &contact().with("available", "8:00 AM - 6:00 PM"))
            .await?;
        assert_eq!(created.id, updated.id);
        assert_eq!("8:00 AM - 6:00 PM", updated.fields["available"].to_string());

        let removed = backend.delete_record(EntityKind::Emergency, created.id).await?;
        assert_eq!(updated, removed);
        assert_eq!(before, backend.list_records(EntityKind::Emergency).await?);
        Ok(())
    }

    #[tokio::test]
    async fn errors_leave_data_unchanged() -> Result<()> {
        let backend = MemoryBackend::seeded(Default::default())?;
        let before = backend.list_records(EntityKind::Office).await?;
        let result = backend.delete_record(EntityKind::Office, 42).await;
        assert!(matches!(
            result,
            Err(Error::Collection(collections::Error::NotFound { id: 42 }))
        ));
        let result = backend.create_record(&Draft::new(EntityKind::Office)).await;
        assert!(matches!(
            result,
            Err(Error::Collection(collections::Error::Validation(_)))
        ));
        assert_eq!(before, backend.list_records(EntityKind::Office).await?);
        Ok(())
    }

    #[tokio::test]
    async fn empty_backend() -> Result<()> {
        let backend = MemoryBackend::new(Default::default());
        let lawyers = backend.list_records(EntityKind::Lawyer).await?;
        assert!(lawyers.is_empty());
        Ok(())
    }
}
