use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use thiserror::Error;

use shared::domain::{DocId, UserId, UserRole};
use shared::error::ApiErrorBody;
use shared::records::{CaseRecord, DocumentRecord, NotificationRecord, UserLogRecord, UserRecord};

use crate::encode::MultipartPayload;
use crate::settings::Settings;
use crate::ActingUser;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Rejected(String),
}

/// Document writes the edit workflow needs from the backend. Implemented by
/// [`CaseClient`]; tests substitute their own.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    async fn update_document(
        &self,
        doc_id: DocId,
        payload: MultipartPayload,
    ) -> Result<(), ClientError>;

    async fn remove_reference(
        &self,
        doc_id: DocId,
        reference_path: &str,
    ) -> Result<(), ClientError>;
}

pub struct CaseClient {
    http: Client,
    base_url: String,
}

impl CaseClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: settings.api_base_url.clone(),
        })
    }

    /// Admins see every document, lawyers the documents tasked through them,
    /// everyone else only what they submitted.
    pub async fn documents(&self, acting: &ActingUser) -> Result<Vec<DocumentRecord>, ClientError> {
        let url = match acting.role {
            UserRole::Admin => format!("{}/api/documents", self.base_url),
            UserRole::Lawyer => {
                format!("{}/api/documents/lawyer/{}", self.base_url, acting.user_id.0)
            }
            _ => format!("{}/api/documents/submitter/{}", self.base_url, acting.user_id.0),
        };
        let documents: Vec<DocumentRecord> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(documents)
    }

    pub async fn notifications(
        &self,
        user_id: UserId,
    ) -> Result<Vec<NotificationRecord>, ClientError> {
        let notifications: Vec<NotificationRecord> = self
            .http
            .get(format!("{}/api/notifications/{}", self.base_url, user_id.0))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(notifications)
    }

    pub async fn user_logs(&self, acting: &ActingUser) -> Result<Vec<UserLogRecord>, ClientError> {
        let url = match acting.role {
            UserRole::Admin => format!("{}/api/user-logs", self.base_url),
            _ => format!("{}/api/user-logs/{}", self.base_url, acting.user_id.0),
        };
        let logs: Vec<UserLogRecord> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(logs)
    }

    pub async fn users(&self) -> Result<Vec<UserRecord>, ClientError> {
        let users: Vec<UserRecord> = self
            .http
            .get(format!("{}/api/users", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(users)
    }

    pub async fn cases(&self) -> Result<Vec<CaseRecord>, ClientError> {
        let cases: Vec<CaseRecord> = self
            .http
            .get(format!("{}/api/cases", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(cases)
    }
}

#[async_trait]
impl DocumentBackend for CaseClient {
    async fn update_document(
        &self,
        doc_id: DocId,
        payload: MultipartPayload,
    ) -> Result<(), ClientError> {
        let form = payload.into_form()?;
        let response = self
            .http
            .put(format!("{}/api/documents/{}", self.base_url, doc_id.0))
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        // Success bodies vary by route and failure bodies are sometimes
        // empty, so the body decode never decides the outcome by itself.
        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ClientError::Rejected(
                body.into_message("failed to update document"),
            ));
        }
        Ok(())
    }

    async fn remove_reference(
        &self,
        doc_id: DocId,
        reference_path: &str,
    ) -> Result<(), ClientError> {
        self.http
            .put(format!(
                "{}/api/documents/{}/remove-reference",
                self.base_url, doc_id.0
            ))
            .json(&json!({ "referencePath": reference_path }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
