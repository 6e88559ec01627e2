use serde_json::Value;

use shared::domain::{DocType, UserId};

use crate::form::{SupportForm, TaskForm};
use crate::refs::StagedFile;

pub const APPLICATION_PDF: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub body: PartBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartBody {
    Text(String),
    File {
        filename: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Ordered multipart body for `PUT /api/documents/{doc_id}`, kept inspectable
/// so callers and tests can check what will go on the wire before it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    parts: Vec<Part>,
}

impl MultipartPayload {
    fn push_text(&mut self, name: &str, value: impl Into<String>) {
        self.parts.push(Part {
            name: name.to_string(),
            body: PartBody::Text(value.into()),
        });
    }

    fn push_file(&mut self, name: &str, file: &StagedFile) {
        self.parts.push(Part {
            name: name.to_string(),
            body: PartBody::File {
                filename: file.filename.clone(),
                content_type: APPLICATION_PDF.to_string(),
                bytes: file.bytes.clone(),
            },
        });
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match &part.body {
            PartBody::Text(value) if part.name == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn file_count(&self, name: &str) -> usize {
        self.parts
            .iter()
            .filter(|part| part.name == name && matches!(part.body, PartBody::File { .. }))
            .count()
    }

    pub fn into_form(self) -> reqwest::Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part.body {
                PartBody::Text(value) => form.text(part.name, value),
                PartBody::File {
                    filename,
                    content_type,
                    bytes,
                } => form.part(
                    part.name,
                    reqwest::multipart::Part::bytes(bytes)
                        .file_name(filename)
                        .mime_str(&content_type)?,
                ),
            };
        }
        Ok(form)
    }
}

/// Task update body: every scalar as a text part under its wire name, the
/// reconciled existing references as a single JSON text part, then one binary
/// `doc_reference` part per staged file. The server folds the repeated name
/// into one collection.
pub fn encode_task(
    form: &TaskForm,
    existing_refs: &[String],
    staged: &[StagedFile],
) -> MultipartPayload {
    let mut payload = MultipartPayload::default();
    payload.push_text("doc_name", form.doc_name.clone());
    payload.push_text("doc_description", form.doc_description.clone());
    payload.push_text("doc_task", form.doc_task.clone());
    payload.push_text("doc_prio_level", form.doc_prio_level.clone());
    payload.push_text("doc_due_date", form.doc_due_date.clone());
    payload.push_text("doc_tag", form.doc_tag.clone());
    payload.push_text("doc_password", form.doc_password.clone());
    payload.push_text("doc_tasked_to", form.doc_tasked_to.clone());
    payload.push_text("doc_tasked_by", form.doc_tasked_by.clone());
    payload.push_text("doc_type", DocType::Task.as_str());
    payload.push_text("doc_status", form.doc_status.clone());
    if let Some(case_id) = form.case_id {
        payload.push_text("case_id", case_id.0.to_string());
    }
    payload.push_text("doc_last_updated_by", form.doc_last_updated_by.0.to_string());
    payload.push_text("doc_reference", Value::from(existing_refs.to_vec()).to_string());
    for file in staged {
        payload.push_file("doc_reference", file);
    }
    payload
}

/// Support update body. Without a replacement the stored path is re-sent as a
/// text `doc_file` part; with one, a single binary `doc_file` part replaces it
/// and the stored path stays out of the payload.
pub fn encode_support(
    form: &SupportForm,
    submitted_by: UserId,
    replacement: Option<&StagedFile>,
) -> MultipartPayload {
    let mut payload = MultipartPayload::default();
    payload.push_text("doc_name", form.doc_name.clone());
    payload.push_text("doc_description", form.doc_description.clone());
    payload.push_text("doc_tag", form.doc_tag.clone());
    payload.push_text("doc_password", form.doc_password.clone());
    payload.push_text("doc_type", DocType::Support.as_str());
    if let Some(case_id) = form.case_id {
        payload.push_text("case_id", case_id.0.to_string());
    }
    payload.push_text("doc_last_updated_by", form.doc_last_updated_by.0.to_string());
    if replacement.is_none() {
        payload.push_text("doc_file", form.doc_file.clone());
    }
    payload.push_text("doc_submitted_by", submitted_by.0.to_string());
    if let Some(file) = replacement {
        payload.push_file("doc_file", file);
    }
    payload
}
