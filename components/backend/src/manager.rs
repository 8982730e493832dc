use log::{error, info};

use collections::{Collection, Draft, EntityKind, FilterSpec, Record, ValidationError};

use crate::{Backend, Result};

/// Load state of a backend driven list.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    Ready(Collection),
    Failed(String),
}

impl Screen {
    pub fn collection(&self) -> Option<&Collection> {
        match self {
            Screen::Ready(ref collection) => Some(collection),
            _ => None,
        }
    }
}

/// An admin list screen for one entity kind: the visible records,
/// the search box and create, update and delete routed through
/// the backend.
pub struct Manager<'a> {
    backend: &'a dyn Backend,
    kind: EntityKind,
    state: Screen,
    spec: FilterSpec,
}

impl<'a> Manager<'a> {
    pub fn new(backend: &'a dyn Backend, kind: EntityKind) -> Self {
        Self {
            backend,
            kind,
            state: Screen::Loading,
            spec: FilterSpec::for_kind(kind),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn state(&self) -> &Screen {
        &self.state
    }

    /// Fetch the collection, failures are kept as screen state.
    pub async fn load(&mut self) -> &Screen {
        self.state = Screen::Loading;
        self.state = match self.backend.list_records(self.kind).await {
            Ok(collection) => {
                info!("Loaded {} {} records", collection.len(), self.kind);
                Screen::Ready(collection)
            }
            Err(e) => {
                error!("{}", e);
                Screen::Failed(e.to_string())
            }
        };
        &self.state
    }

    pub fn search<S: Into<String>>(&mut self, query: S) {
        self.spec.query = query.into();
    }

    pub fn filter_by<S: Into<String>>(&mut self, field: S, value: Option<String>) {
        self.spec.constraints.insert(field.into(), value.into());
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Records matching the current search, empty until loaded.
    pub fn visible(&self) -> Vec<&Record> {
        match self.state.collection() {
            Some(collection) => collection.query(&self.spec),
            None => Vec::new(),
        }
    }

    fn check_kind(&self, draft: &Draft) -> Result<()> {
        if draft.kind != self.kind {
            let mismatch = ValidationError::KindMismatch {
                expected: self.kind,
                found: draft.kind,
            };
            return Err(collections::Error::from(mismatch).into());
        }
        Ok(())
    }

    pub async fn create(&mut self, draft: &Draft) -> Result<Record> {
        self.check_kind(draft)?;
        let record = self.backend.create_record(draft).await?;
        self.load().await;
        Ok(record)
    }

    pub async fn update(&mut self, id: u64, draft: &Draft) -> Result<Record> {
        self.check_kind(draft)?;
        let record = self.backend.update_record(id, draft).await?;
        self.load().await;
        Ok(record)
    }

    /// Irreversible, the caller confirms intent beforehand.
    pub async fn delete(&mut self, id: u64) -> Result<Record> {
        let record = self.backend.delete_record(self.kind, id).await?;
        self.load().await;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use collections::{Collection, Draft, EntityKind, Record, ValidationError};

    use crate::{
        Backend, Credentials, Error, Manager, MemoryBackend, Result, Screen, Session,
    };

    /// Backend whose reads always fail.
    struct Offline;

    #[async_trait]
    impl Backend for Offline {
        async fn sign_in(&self, _credentials: &Credentials) -> Result<Session> {
            Err(Error::Auth("offline".to_string()))
        }

        async fn sign_out(&self) -> Result<()> {
            Ok(())
        }

        async fn list_records(&self, kind: EntityKind) -> Result<Collection> {
            Err(Error::Fetch {
                kind,
                message: "offline".to_string(),
            })
        }

        async fn create_record(&self, draft: &Draft) -> Result<Record> {
            Err(Error::Write {
                kind: draft.kind,
                message: "offline".to_string(),
            })
        }

        async fn update_record(&self, _id: u64, draft: &Draft) -> Result<Record> {
            self.create_record(draft).await
        }

        async fn delete_record(&self, kind: EntityKind, _id: u64) -> Result<Record> {
            Err(Error::Write {
                kind,
                message: "offline".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn load_then_search() -> Result<()> {
        let backend = MemoryBackend::seeded(Default::default())?;
        let mut manager = Manager::new(&backend, EntityKind::Lawyer);
        assert_eq!(&Screen::Loading, manager.state());
        assert!(manager.visible().is_empty());

        manager.load().await;
        assert_eq!(6, manager.visible().len());

        manager.search("addis");
        assert_eq!(3, manager.visible().len());

        manager.filter_by("specialization", Some("Criminal Law".to_string()));
        let visible: Vec<u64> = manager.visible().iter().map(|r| r.id).collect();
        assert_eq!(vec![2], visible);

        manager.filter_by("specialization", None);
        assert_eq!(3, manager.visible().len());
        Ok(())
    }

    #[tokio::test]
    async fn writes_refresh_the_list() -> Result<()> {
        let backend = MemoryBackend::seeded(Default::default())?;
        let mut manager = Manager::new(&backend, EntityKind::Office);
        manager.load().await;

        let draft = Draft::new(EntityKind::Office)
            .with("region", "Jimma")
            .with("address", "Mendera Kochi, House No. 9")
            .with("phone", "+251-47-111-2233")
            .with("email", "jimma@kirkoslegalaid.org")
            .with("hours", "8:00 AM - 5:00 PM");
        let record = manager.create(&draft).await?;
        assert_eq!(5, record.id);
        assert_eq!(5, manager.visible().len());

        manager.delete(record.id).await?;
        assert_eq!(4, manager.visible().len());
        assert!(manager.delete(record.id).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn drafts_of_another_kind_are_rejected() -> Result<()> {
        let backend = MemoryBackend::seeded(Default::default())?;
        let mut manager = Manager::new(&backend, EntityKind::Office);
        manager.load().await;

        let lawyer = Draft::new(EntityKind::Lawyer)
            .with("name", "W/ro Meron Alemu")
            .with("specialization", "Family Law")
            .with("location", "Hawassa")
            .with("phone", "+251-46-212-0000")
            .with("email", "meron.alemu@law.et")
            .with("rating", 4.4)
            .with("experience", "6 years")
            .with("languages", vec!["Amharic".to_string()]);

        for result in vec![
            manager.create(&lawyer).await,
            manager.update(1, &lawyer).await,
        ] {
            assert!(matches!(
                result,
                Err(Error::Collection(collections::Error::Validation(
                    ValidationError::KindMismatch {
                        expected: EntityKind::Office,
                        found: EntityKind::Lawyer,
                    }
                )))
            ));
        }
        assert_eq!(4, manager.visible().len());
        assert_eq!(6, backend.list_records(EntityKind::Lawyer).await?.len());
        assert_eq!(
            Some("Addis Ababa".to_string()),
            backend
                .list_records(EntityKind::Office)
                .await?
                .get(1)
                .map(|r| r.fields["region"].to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn failed_load() {
        let backend = Offline;
        let mut manager = Manager::new(&backend, EntityKind::Resource);
        let state = manager.load().await.clone();
        assert!(matches!(state, Screen::Failed(ref message) if message.contains("offline")));
        assert!(manager.visible().is_empty());
        assert!(manager.delete(1).await.is_err());
    }
}
