use serde::{Deserialize, Serialize};

use crate::domain::{CaseId, DocId, DocType, NotificationId, UserId};

/// Stored reference list of a task document. Older rows carry the list as a
/// JSON-encoded string, newer rows as a plain array, so the field decodes
/// through an untagged enum and `decode` normalizes both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceField {
    List(Vec<String>),
    Encoded(String),
    Other(serde_json::Value),
}

impl ReferenceField {
    pub fn decode(&self) -> Result<Vec<String>, serde_json::Error> {
        match self {
            ReferenceField::List(paths) => Ok(paths.clone()),
            ReferenceField::Encoded(raw) => serde_json::from_str(raw),
            ReferenceField::Other(value) => serde_json::from_value(value.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub doc_id: DocId,
    pub doc_type: DocType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_prio_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_reference: Option<ReferenceField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_tasked_to: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_tasked_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_submitted_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_last_updated_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<CaseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_date_created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_date_submitted: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub notification_id: NotificationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_message: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_fullname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_log_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_log_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_log_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ip_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_fname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_mname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_lname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_id: CaseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ct_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_fullname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_status: Option<String>,
}
