use serde::{Deserialize, Serialize};

/// Failure body the backend attaches to non-2xx document routes. Some routes
/// reply with an empty object, so every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self, fallback: &str) -> String {
        self.error.unwrap_or_else(|| fallback.to_string())
    }
}
