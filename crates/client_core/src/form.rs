use chrono::{Days, Local, NaiveDate};

use shared::domain::{CaseId, DocType, Priority, UserId};
use shared::records::DocumentRecord;

/// Edit-form state for one document, split by document type. Built once when
/// the edit view opens and thrown away when it closes; nothing here persists
/// until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormModel {
    Task(TaskForm),
    Support(SupportForm),
}

impl FormModel {
    pub fn from_record(doc: &DocumentRecord, acting_user: UserId) -> Self {
        match doc.doc_type {
            DocType::Task => FormModel::Task(TaskForm::from_record(doc, acting_user)),
            DocType::Support => FormModel::Support(SupportForm::from_record(doc, acting_user)),
        }
    }

    pub fn doc_type(&self) -> DocType {
        match self {
            FormModel::Task(_) => DocType::Task,
            FormModel::Support(_) => DocType::Support,
        }
    }

    pub fn as_task(&self) -> Option<&TaskForm> {
        match self {
            FormModel::Task(form) => Some(form),
            FormModel::Support(_) => None,
        }
    }

    pub fn as_support(&self) -> Option<&SupportForm> {
        match self {
            FormModel::Support(form) => Some(form),
            FormModel::Task(_) => None,
        }
    }

    /// Writes to a task-only field are ignored while a support form is open,
    /// and vice versa.
    pub fn set_task(&mut self, field: TaskField, value: impl Into<String>) {
        if let FormModel::Task(form) = self {
            form.set(field, value);
        }
    }

    pub fn set_support(&mut self, field: SupportField, value: impl Into<String>) {
        if let FormModel::Support(form) = self {
            form.set(field, value);
        }
    }

    pub fn set_priority(&mut self, level: &str) {
        if let FormModel::Task(form) = self {
            form.set_priority(level);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Name,
    Description,
    Task,
    Tag,
    Password,
    TaskedTo,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportField {
    Name,
    Description,
    Tag,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub doc_name: String,
    pub doc_description: String,
    pub doc_task: String,
    pub doc_prio_level: String,
    pub doc_due_date: String,
    pub doc_tag: String,
    pub doc_password: String,
    pub doc_tasked_to: String,
    pub doc_tasked_by: String,
    pub doc_status: String,
    pub case_id: Option<CaseId>,
    pub doc_last_updated_by: UserId,
}

impl TaskForm {
    pub fn from_record(doc: &DocumentRecord, acting_user: UserId) -> Self {
        Self {
            doc_name: doc.doc_name.clone().unwrap_or_default(),
            doc_description: doc.doc_description.clone().unwrap_or_default(),
            doc_task: doc.doc_task.clone().unwrap_or_default(),
            doc_prio_level: doc.doc_prio_level.clone().unwrap_or_default(),
            doc_due_date: doc.doc_due_date.clone().unwrap_or_default(),
            doc_tag: doc.doc_tag.clone().unwrap_or_default(),
            // Stored passwords never round-trip into the form.
            doc_password: String::new(),
            doc_tasked_to: doc
                .doc_tasked_to
                .map(|id| id.0.to_string())
                .unwrap_or_default(),
            doc_tasked_by: doc
                .doc_tasked_by
                .map(|id| id.0.to_string())
                .unwrap_or_else(|| acting_user.0.to_string()),
            doc_status: doc
                .doc_status
                .clone()
                .filter(|status| !status.is_empty())
                .unwrap_or_else(|| "todo".to_string()),
            case_id: doc.case_id,
            doc_last_updated_by: acting_user,
        }
    }

    pub fn set(&mut self, field: TaskField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TaskField::Name => self.doc_name = value,
            TaskField::Description => self.doc_description = value,
            TaskField::Task => self.doc_task = value,
            TaskField::Tag => self.doc_tag = value,
            TaskField::Password => self.doc_password = value,
            TaskField::TaskedTo => self.doc_tasked_to = value,
            TaskField::Status => self.doc_status = value,
        }
    }

    pub fn set_priority(&mut self, level: &str) {
        self.set_priority_at(level, Local::now().date_naive());
    }

    /// The level string is recorded as given even when it is not a known
    /// priority; the due date only moves for known levels.
    pub fn set_priority_at(&mut self, level: &str, today: NaiveDate) {
        if let Some(priority) = Priority::parse(level) {
            if let Some(due) = today.checked_add_days(Days::new(priority.lead_days())) {
                self.doc_due_date = end_of_day(due);
            }
        }
        self.doc_prio_level = level.to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportForm {
    pub doc_name: String,
    pub doc_description: String,
    pub doc_tag: String,
    pub doc_password: String,
    pub doc_file: String,
    pub case_id: Option<CaseId>,
    pub doc_last_updated_by: UserId,
}

impl SupportForm {
    pub fn from_record(doc: &DocumentRecord, acting_user: UserId) -> Self {
        Self {
            doc_name: doc.doc_name.clone().unwrap_or_default(),
            doc_description: doc.doc_description.clone().unwrap_or_default(),
            doc_tag: doc.doc_tag.clone().unwrap_or_default(),
            doc_password: String::new(),
            doc_file: doc.doc_file.clone().unwrap_or_default(),
            case_id: doc.case_id,
            doc_last_updated_by: acting_user,
        }
    }

    pub fn set(&mut self, field: SupportField, value: impl Into<String>) {
        let value = value.into();
        match field {
            SupportField::Name => self.doc_name = value,
            SupportField::Description => self.doc_description = value,
            SupportField::Tag => self.doc_tag = value,
            SupportField::Password => self.doc_password = value,
        }
    }
}

// The backend stores due dates with a microsecond column, so the millisecond
// cutoff is written out as 999000.
fn end_of_day(date: NaiveDate) -> String {
    format!("{} 23:59:59.999000", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::records::DocumentRecord;

    fn record(value: serde_json::Value) -> DocumentRecord {
        serde_json::from_value(value).expect("document record")
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("date")
    }

    #[test]
    fn task_form_copies_task_fields() {
        let doc = record(json!({
            "doc_id": 4,
            "doc_type": "Task",
            "doc_name": "Answer to complaint",
            "doc_description": "Draft and file",
            "doc_task": "Prepare first draft",
            "doc_prio_level": "Mid",
            "doc_due_date": "2024-04-02 23:59:59.999000",
            "doc_tag": "Civil",
            "doc_password": "stored-secret",
            "doc_status": "in_progress",
            "doc_tasked_to": 9,
            "doc_tasked_by": 3,
            "case_id": 21
        }));

        let form = match FormModel::from_record(&doc, UserId(7)) {
            FormModel::Task(form) => form,
            FormModel::Support(_) => panic!("expected task form"),
        };

        assert_eq!(form.doc_name, "Answer to complaint");
        assert_eq!(form.doc_task, "Prepare first draft");
        assert_eq!(form.doc_prio_level, "Mid");
        assert_eq!(form.doc_due_date, "2024-04-02 23:59:59.999000");
        assert_eq!(form.doc_password, "");
        assert_eq!(form.doc_tasked_to, "9");
        assert_eq!(form.doc_tasked_by, "3");
        assert_eq!(form.doc_status, "in_progress");
        assert_eq!(form.case_id, Some(CaseId(21)));
        assert_eq!(form.doc_last_updated_by, UserId(7));
    }

    #[test]
    fn support_form_defaults_missing_fields() {
        let doc = record(json!({ "doc_id": 5, "doc_type": "Support" }));

        let form = match FormModel::from_record(&doc, UserId(2)) {
            FormModel::Support(form) => form,
            FormModel::Task(_) => panic!("expected support form"),
        };

        assert_eq!(form.doc_name, "");
        assert_eq!(form.doc_description, "");
        assert_eq!(form.doc_file, "");
        assert_eq!(form.case_id, None);
        assert_eq!(form.doc_last_updated_by, UserId(2));
    }

    #[test]
    fn tasked_by_falls_back_to_acting_user() {
        let doc = record(json!({ "doc_id": 6, "doc_type": "Task" }));
        let form = TaskForm::from_record(&doc, UserId(42));
        assert_eq!(form.doc_tasked_by, "42");
    }

    #[test]
    fn task_status_defaults_to_todo() {
        let absent = record(json!({ "doc_id": 7, "doc_type": "Task" }));
        assert_eq!(TaskForm::from_record(&absent, UserId(1)).doc_status, "todo");

        let empty = record(json!({ "doc_id": 7, "doc_type": "Task", "doc_status": "" }));
        assert_eq!(TaskForm::from_record(&empty, UserId(1)).doc_status, "todo");
    }

    #[test]
    fn priority_levels_move_due_date_by_lead_days() {
        let doc = record(json!({ "doc_id": 8, "doc_type": "Task" }));
        let mut form = TaskForm::from_record(&doc, UserId(1));

        form.set_priority_at("Low", date("2024-03-01"));
        assert_eq!(form.doc_due_date, "2024-03-15 23:59:59.999000");
        assert_eq!(form.doc_prio_level, "Low");

        form.set_priority_at("Mid", date("2024-03-01"));
        assert_eq!(form.doc_due_date, "2024-03-06 23:59:59.999000");

        form.set_priority_at("High", date("2024-03-01"));
        assert_eq!(form.doc_due_date, "2024-03-03 23:59:59.999000");
    }

    #[test]
    fn priority_due_date_crosses_month_end() {
        let doc = record(json!({ "doc_id": 9, "doc_type": "Task" }));
        let mut form = TaskForm::from_record(&doc, UserId(1));

        form.set_priority_at("Mid", date("2024-01-28"));
        assert_eq!(form.doc_due_date, "2024-02-02 23:59:59.999000");
    }

    #[test]
    fn unknown_priority_keeps_due_date() {
        let doc = record(json!({ "doc_id": 10, "doc_type": "Task" }));
        let mut form = TaskForm::from_record(&doc, UserId(1));
        form.set_priority_at("High", date("2024-03-01"));

        form.set_priority_at("Urgent", date("2024-06-01"));
        assert_eq!(form.doc_due_date, "2024-03-03 23:59:59.999000");
        assert_eq!(form.doc_prio_level, "Urgent");
    }

    #[test]
    fn set_field_is_last_write_wins() {
        let doc = record(json!({ "doc_id": 11, "doc_type": "Task", "doc_name": "First" }));
        let mut model = FormModel::from_record(&doc, UserId(1));

        model.set_task(TaskField::Name, "Second");
        model.set_task(TaskField::Name, "Third");
        assert_eq!(model.as_task().map(|form| form.doc_name.as_str()), Some("Third"));
    }

    #[test]
    fn task_writes_ignored_on_support_form() {
        let doc = record(json!({ "doc_id": 12, "doc_type": "Support", "doc_name": "Affidavit" }));
        let mut model = FormModel::from_record(&doc, UserId(1));

        model.set_task(TaskField::Name, "overwritten");
        model.set_priority("High");

        let form = model.as_support().expect("support form");
        assert_eq!(form.doc_name, "Affidavit");
    }
}
