use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use url::Url;

use collections::{Collection, Draft, EntityKind, Record};
use config::BackendConfig;

use crate::{Backend, Credentials, Error, Result, Session};

static REST: &str = "rest/v1/";
static TOKEN: &str = "auth/v1/token";
static LOGOUT: &str = "auth/v1/logout";

static API_KEY: &str = "apikey";
static PREFER: &str = "Prefer";
static RETURN_REPRESENTATION: &str = "return=representation";

fn table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Lawyer => "lawyers",
        EntityKind::Resource => "legal_resources",
        EntityKind::Emergency => "emergency_contacts",
        EntityKind::Office => "regional_offices",
    }
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: Option<TokenUser>,
}

/// Client for a PostgREST style data service with password sign in.
#[derive(Debug)]
pub struct RestBackend {
    client: Client,
    endpoint: Url,
    key: String,
    session: Mutex<Option<Session>>,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint()?,
            key: config.key.clone(),
            session: Mutex::new(None),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Address of a table, optionally narrowed to a single record.
    pub(crate) fn table_url(&self, kind: EntityKind, id: Option<u64>) -> Result<Url> {
        let mut url = self.endpoint.join(REST)?.join(table(kind))?;
        match id {
            Some(id) => {
                url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));
            }
            None => {
                url.query_pairs_mut()
                    .append_pair("select", "*")
                    .append_pair("order", "id.asc");
            }
        }
        Ok(url)
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = match *self.session.lock().await {
            Some(ref session) => session.access_token.clone(),
            None => self.key.clone(),
        };
        request.header(API_KEY, &self.key).bearer_auth(token)
    }

    /// Records returned by a write, an empty reply means no row matched.
    async fn written(&self, kind: EntityKind, id: Option<u64>, response: Response) -> Result<Record> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(Error::Write { kind, message });
        }
        let docs: Vec<serde_json::Value> = response.json().await?;
        match docs.into_iter().next() {
            Some(doc) => Ok(Record::from_json(doc)?),
            None => match id {
                Some(id) => Err(collections::Error::NotFound { id }.into()),
                None => Err(Error::Write {
                    kind,
                    message: String::from("no record returned"),
                }),
            },
        }
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        let mut url = self.endpoint.join(TOKEN)?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let response = self
            .client
            .post(url)
            .header(API_KEY, &self.key)
            .json(&json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Auth(status.to_string()));
        }

        let token: TokenResponse = response.json().await?;
        let session = Session {
            email: token
                .user
                .and_then(|u| u.email)
                .unwrap_or_else(|| credentials.email.clone()),
            access_token: token.access_token,
        };
        *self.session.lock().await = Some(session.clone());
        info!("Signed in {}", session.email);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        let session = self.session.lock().await.take();
        if let Some(session) = session {
            let url = self.endpoint.join(LOGOUT)?;
            self.client
                .post(url)
                .header(API_KEY, &self.key)
                .bearer_auth(&session.access_token)
                .send()
                .await?;
            info!("Signed out {}", session.email);
        }
        Ok(())
    }

    async fn list_records(&self, kind: EntityKind) -> Result<Collection> {
        let url = self.table_url(kind, None)?;
        debug!("GET {}", url);
        let response = self.authorize(self.client.get(url)).await.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                kind,
                message: status.to_string(),
            });
        }
        let docs: Vec<serde_json::Value> = response.json().await?;
        let mut records = Vec::with_capacity(docs.len());
        for doc in docs {
            records.push(Record::from_json(doc)?);
        }
        Ok(Collection::new(kind, records))
    }

    async fn create_record(&self, draft: &Draft) -> Result<Record> {
        draft.validate().map_err(collections::Error::from)?;
        let url = self.table_url(draft.kind, None)?;
        debug!("POST {}", url);
        let request = self
            .client
            .post(url)
            .header(PREFER, RETURN_REPRESENTATION)
            .json(&draft.fields);
        let response = self.authorize(request).await.send().await?;
        self.written(draft.kind, None, response).await
    }

    async fn update_record(&self, id: u64, draft: &Draft) -> Result<Record> {
        draft.validate().map_err(collections::Error::from)?;
        let url = self.table_url(draft.kind, Some(id))?;
        debug!("PATCH {}", url);
        let request = self
            .client
            .patch(url)
            .header(PREFER, RETURN_REPRESENTATION)
            .json(&draft.fields);
        let response = self.authorize(request).await.send().await?;
        self.written(draft.kind, Some(id), response).await
    }

    async fn delete_record(&self, kind: EntityKind, id: u64) -> Result<Record> {
        let url = self.table_url(kind, Some(id))?;
        debug!("DELETE {}", url);
        let request = self
            .client
            .delete(url)
            .header(PREFER, RETURN_REPRESENTATION);
        let response = self.authorize(request).await.send().await?;
        self.written(kind, Some(id), response).await
    }
}
