use thiserror::Error;
use tracing::warn;

use shared::records::DocumentRecord;

pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("file '{filename}' is larger than the {limit_bytes} byte upload limit")]
    FileTooLarge { filename: String, limit_bytes: u64 },
}

/// A picked file held in memory until submit. Nothing is written to disk on
/// this side of the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Reference attachments of a task document: the paths already stored on the
/// server plus files staged locally for the next submit.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    existing: Vec<String>,
    staged: Vec<StagedFile>,
    last_error: Option<ValidationError>,
}

impl ReferenceSet {
    /// A reference list that fails to decode is treated as empty rather than
    /// blocking the edit view.
    pub fn load(doc: &DocumentRecord) -> Self {
        let existing = match &doc.doc_reference {
            None => Vec::new(),
            Some(field) => match field.decode() {
                Ok(paths) => paths,
                Err(err) => {
                    warn!(
                        doc_id = doc.doc_id.0,
                        "refs: dropping unreadable reference list: {err}"
                    );
                    Vec::new()
                }
            },
        };
        Self {
            existing,
            staged: Vec::new(),
            last_error: None,
        }
    }

    pub fn existing(&self) -> &[String] {
        &self.existing
    }

    pub fn staged(&self) -> &[StagedFile] {
        &self.staged
    }

    pub fn last_error(&self) -> Option<&ValidationError> {
        self.last_error.as_ref()
    }

    /// Appends the whole batch or none of it: one oversized file rejects the
    /// batch and leaves staged state untouched.
    pub fn add_files(&mut self, batch: Vec<StagedFile>) -> Result<(), ValidationError> {
        if batch.is_empty() {
            return Ok(());
        }
        if let Some(oversized) = batch.iter().find(|file| file.size() > MAX_FILE_BYTES) {
            let err = ValidationError::FileTooLarge {
                filename: oversized.filename.clone(),
                limit_bytes: MAX_FILE_BYTES,
            };
            self.last_error = Some(err.clone());
            return Err(err);
        }
        self.staged.extend(batch);
        self.last_error = None;
        Ok(())
    }

    pub fn remove_staged(&mut self, index: usize) {
        if index < self.staged.len() {
            self.staged.remove(index);
        }
    }

    /// Drops the stored path at `index` from the local list and hands it back
    /// so the caller can tell the server. There is no undo.
    pub fn take_existing(&mut self, index: usize) -> Option<String> {
        if index < self.existing.len() {
            Some(self.existing.remove(index))
        } else {
            None
        }
    }
}
