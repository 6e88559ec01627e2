use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

use shared::domain::{DocId, UserId, UserRole};
use shared::records::DocumentRecord;

pub mod activity;
pub mod client;
pub mod encode;
pub mod form;
pub mod inbox;
pub mod listing;
pub mod refs;
pub mod reports;
pub mod settings;

use crate::client::{ClientError, DocumentBackend};
use crate::encode::{encode_support, encode_task, MultipartPayload};
use crate::form::{FormModel, SupportField, TaskField};
use crate::refs::{ReferenceSet, StagedFile, ValidationError, MAX_FILE_BYTES};

/// Who is editing. Role decides which document scope the read endpoints
/// serve; the id is stamped into every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser {
    pub user_id: UserId,
    pub role: UserRole,
}

#[derive(Debug, Clone)]
pub enum WorkflowEvent {
    SubmitStarted,
    SubmitSucceeded,
    SubmitFailed { message: String },
    ReferenceRemoved { path: String },
    ReferenceRemovalFailed { path: String, message: String },
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submit is already in flight")]
    AlreadyInFlight,
    #[error(transparent)]
    Client(#[from] ClientError),
}

struct WorkflowState {
    form: FormModel,
    refs: ReferenceSet,
    replacement: Option<StagedFile>,
    replacement_error: Option<ValidationError>,
    submitting: bool,
}

/// One open edit session over a document: the form, the reference set, a
/// staged replacement file for support documents, and the submit guard.
/// Dropping it discards all of that without cancelling requests already
/// dispatched.
pub struct EditWorkflow {
    backend: Arc<dyn DocumentBackend>,
    acting: ActingUser,
    doc_id: DocId,
    inner: Mutex<WorkflowState>,
    events: broadcast::Sender<WorkflowEvent>,
}

impl EditWorkflow {
    pub fn open(
        backend: Arc<dyn DocumentBackend>,
        acting: ActingUser,
        document: &DocumentRecord,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(1024);
        Arc::new(Self {
            backend,
            acting,
            doc_id: document.doc_id,
            inner: Mutex::new(WorkflowState {
                form: FormModel::from_record(document, acting.user_id),
                refs: ReferenceSet::load(document),
                replacement: None,
                replacement_error: None,
                submitting: false,
            }),
            events,
        })
    }

    pub fn doc_id(&self) -> DocId {
        self.doc_id
    }

    pub fn acting_user(&self) -> ActingUser {
        self.acting
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.events.subscribe()
    }

    pub async fn form(&self) -> FormModel {
        self.inner.lock().await.form.clone()
    }

    pub async fn set_task_field(&self, field: TaskField, value: impl Into<String>) {
        self.inner.lock().await.form.set_task(field, value);
    }

    pub async fn set_support_field(&self, field: SupportField, value: impl Into<String>) {
        self.inner.lock().await.form.set_support(field, value);
    }

    pub async fn set_priority(&self, level: &str) {
        self.inner.lock().await.form.set_priority(level);
    }

    pub async fn existing_references(&self) -> Vec<String> {
        self.inner.lock().await.refs.existing().to_vec()
    }

    pub async fn staged_filenames(&self) -> Vec<String> {
        self.inner
            .lock()
            .await
            .refs
            .staged()
            .iter()
            .map(|file| file.filename.clone())
            .collect()
    }

    pub async fn reference_error(&self) -> Option<ValidationError> {
        self.inner.lock().await.refs.last_error().cloned()
    }

    pub async fn add_reference_files(
        &self,
        batch: Vec<StagedFile>,
    ) -> Result<(), ValidationError> {
        self.inner.lock().await.refs.add_files(batch)
    }

    pub async fn remove_staged(&self, index: usize) {
        self.inner.lock().await.refs.remove_staged(index);
    }

    /// Optimistic: the path leaves the local list before the server is told,
    /// and a failed call does not put it back.
    pub async fn remove_existing(&self, index: usize) -> Result<(), ClientError> {
        let Some(path) = self.inner.lock().await.refs.take_existing(index) else {
            return Ok(());
        };
        match self.backend.remove_reference(self.doc_id, &path).await {
            Ok(()) => {
                let _ = self.events.send(WorkflowEvent::ReferenceRemoved { path });
                Ok(())
            }
            Err(err) => {
                warn!(
                    doc_id = self.doc_id.0,
                    "workflow: reference removal failed for {path}: {err}"
                );
                let _ = self.events.send(WorkflowEvent::ReferenceRemovalFailed {
                    path,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// An oversized pick is rejected and remembered; the next valid pick
    /// clears the remembered error.
    pub async fn stage_replacement(&self, file: StagedFile) -> Result<(), ValidationError> {
        let mut state = self.inner.lock().await;
        if file.size() > MAX_FILE_BYTES {
            let err = ValidationError::FileTooLarge {
                filename: file.filename,
                limit_bytes: MAX_FILE_BYTES,
            };
            state.replacement_error = Some(err.clone());
            return Err(err);
        }
        state.replacement = Some(file);
        state.replacement_error = None;
        Ok(())
    }

    /// Backs out a staged replacement; the stored file rides the next submit
    /// again.
    pub async fn clear_replacement(&self) {
        self.inner.lock().await.replacement = None;
    }

    pub async fn replacement_filename(&self) -> Option<String> {
        self.inner
            .lock()
            .await
            .replacement
            .as_ref()
            .map(|file| file.filename.clone())
    }

    pub async fn replacement_error(&self) -> Option<ValidationError> {
        self.inner.lock().await.replacement_error.clone()
    }

    pub async fn is_submitting(&self) -> bool {
        self.inner.lock().await.submitting
    }

    /// At most one submit is in flight per workflow; a second call returns
    /// [`SubmitError::AlreadyInFlight`] without touching the network. On
    /// failure the form and references stay as they were, ready for a retry.
    pub async fn submit(&self) -> Result<(), SubmitError> {
        let payload = {
            let mut state = self.inner.lock().await;
            if state.submitting {
                info!(
                    doc_id = self.doc_id.0,
                    "workflow: submit already in flight, skipping"
                );
                return Err(SubmitError::AlreadyInFlight);
            }
            state.submitting = true;
            self.encode_locked(&state)
        };

        let _ = self.events.send(WorkflowEvent::SubmitStarted);
        let result = self.backend.update_document(self.doc_id, payload).await;
        self.inner.lock().await.submitting = false;

        match result {
            Ok(()) => {
                let _ = self.events.send(WorkflowEvent::SubmitSucceeded);
                Ok(())
            }
            Err(err) => {
                warn!(doc_id = self.doc_id.0, "workflow: submit failed: {err}");
                let _ = self.events.send(WorkflowEvent::SubmitFailed {
                    message: err.to_string(),
                });
                Err(SubmitError::Client(err))
            }
        }
    }

    fn encode_locked(&self, state: &WorkflowState) -> MultipartPayload {
        match &state.form {
            FormModel::Task(form) => encode_task(form, state.refs.existing(), state.refs.staged()),
            FormModel::Support(form) => {
                encode_support(form, self.acting.user_id, state.replacement.as_ref())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
