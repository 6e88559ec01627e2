use chrono::{Days, NaiveDate};

use shared::records::{CaseRecord, DocumentRecord, UserLogRecord, UserRecord};

use crate::listing::has_stored_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTotals {
    pub users: usize,
    pub archived_cases: usize,
    pub processing_cases: usize,
    pub documents_on_file: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentActivityRow {
    pub user: String,
    pub action: String,
    pub logged_at: String,
}

pub fn totals(
    users: &[UserRecord],
    cases: &[CaseRecord],
    documents: &[DocumentRecord],
) -> ReportTotals {
    ReportTotals {
        users: users.len(),
        archived_cases: cases
            .iter()
            .filter(|case| case.case_status.as_deref() == Some("Archived"))
            .count(),
        processing_cases: cases
            .iter()
            .filter(|case| case.case_status.as_deref() == Some("Processing"))
            .count(),
        documents_on_file: documents.iter().filter(|doc| has_stored_file(doc)).count(),
    }
}

/// Buckets log timestamps into the last seven days, today included, oldest
/// first. Timestamps that do not start with a parseable date are skipped.
pub fn daily_activity(logs: &[UserLogRecord], today: NaiveDate) -> Vec<DailyActivity> {
    (0..7)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| DailyActivity {
            date,
            label: date.format("%a").to_string(),
            count: logs.iter().filter(|log| log_date(log) == Some(date)).count(),
        })
        .collect()
}

fn log_date(log: &UserLogRecord) -> Option<NaiveDate> {
    let time = log.user_log_time.as_deref()?;
    let day = time.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

pub fn recent_activity(logs: &[UserLogRecord], limit: usize) -> Vec<RecentActivityRow> {
    let mut sorted: Vec<&UserLogRecord> = logs.iter().collect();
    sorted.sort_by(|a, b| b.user_log_time.cmp(&a.user_log_time));
    sorted
        .into_iter()
        .take(limit)
        .map(|log| RecentActivityRow {
            user: log
                .user_fullname
                .clone()
                .unwrap_or_else(|| "Unknown User".to_string()),
            action: log.user_log_action.clone().unwrap_or_default(),
            logged_at: log.user_log_time.clone().unwrap_or_default(),
        })
        .collect()
}
