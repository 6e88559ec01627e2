use shared::records::UserLogRecord;

pub const INITIAL_ROWS: usize = 5;

/// Activity log list: text search, a `YYYY-MM-DD` day filter, and
/// load-more reveal in steps of five.
#[derive(Debug, Clone, Default)]
pub struct ActivityFeed {
    logs: Vec<UserLogRecord>,
    search: String,
    date: String,
    visible_rows: usize,
}

impl ActivityFeed {
    pub fn new(logs: Vec<UserLogRecord>) -> Self {
        Self {
            logs,
            search: String::new(),
            date: String::new(),
            visible_rows: INITIAL_ROWS,
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    pub fn filtered(&self) -> Vec<&UserLogRecord> {
        let term = self.search.to_lowercase();
        self.logs
            .iter()
            .filter(|log| {
                let matches_search = [
                    log.user_fullname.as_deref(),
                    log.user_log_type.as_deref(),
                    log.user_log_action.as_deref(),
                ]
                .into_iter()
                .any(|field| field.is_some_and(|value| value.to_lowercase().contains(&term)));
                let matches_date = self.date.is_empty()
                    || log
                        .user_log_time
                        .as_deref()
                        .is_some_and(|time| time.starts_with(&self.date));
                matches_search && matches_date
            })
            .collect()
    }

    pub fn visible(&self) -> Vec<&UserLogRecord> {
        self.filtered()
            .into_iter()
            .take(self.visible_rows)
            .collect()
    }

    pub fn has_more(&self) -> bool {
        self.visible_rows < self.filtered().len()
    }

    /// The reveal count never resets, even when filters change.
    pub fn load_more(&mut self) {
        self.visible_rows += INITIAL_ROWS;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    User,
    Document,
    Case,
    Archive,
    Task,
    SupportDocument,
    Login,
    Logout,
    Alert,
    Other,
}

pub fn log_kind(log: &UserLogRecord) -> LogKind {
    if let Some(log_type) = log.user_log_type.as_deref() {
        match log_type.to_lowercase().as_str() {
            "user log" => return LogKind::User,
            "document log" => return LogKind::Document,
            "case log" => return LogKind::Case,
            "archive log" => return LogKind::Archive,
            "task log" => return LogKind::Task,
            "support document log" => return LogKind::SupportDocument,
            _ => {}
        }
    }
    let action = log
        .user_log_action
        .as_deref()
        .unwrap_or("")
        .to_lowercase();
    if action.contains("login") {
        return LogKind::Login;
    }
    if action.contains("logout") {
        return LogKind::Logout;
    }
    if action.contains("fail") || action.contains("error") {
        return LogKind::Alert;
    }
    LogKind::Other
}

// Order matters: the specific phrases sit above the generic ones they
// contain, e.g. "status: completed" before "updated case".
const ACTION_LABELS: &[(&str, &str)] = &[
    ("login", "Login"),
    ("logout", "Logout"),
    ("new client", "New Client Added"),
    ("new contact", "New Client Contact Added"),
    ("updated client", "Client Update"),
    ("removed client", "Client Removed"),
    ("restored client", "Client Restored"),
    ("updated contact", "Client Contact Update"),
    ("removed contact", "Client Contact Removed"),
    ("new case", "New Case Added"),
    ("new allowed viewer", "Archive Access Granted"),
    ("archived", "Case Archived"),
    ("status: completed", "Case Closed / Completed"),
    ("status: dismissed", "Case Dismissed"),
    ("updated case", "Case Update"),
    ("task added", "New Task Added"),
    ("task updated", "Task Update"),
    ("new support document", "New Support Document Added"),
    ("support document updated", "Support Document Update"),
];

pub fn action_label(action: Option<&str>) -> &'static str {
    let Some(action) = action else {
        return "Action";
    };
    let lowered = action.to_lowercase();
    for (needle, label) in ACTION_LABELS {
        if lowered.contains(needle) {
            return label;
        }
    }
    if lowered.contains("fail") || lowered.contains("error") {
        return "Error";
    }
    "Action"
}
