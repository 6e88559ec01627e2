use shared::domain::{CaseId, DocId, DocType, UserId};
use shared::records::{CaseRecord, DocumentRecord, UserRecord};

pub const PAGE_SIZE: usize = 10;

/// Documents table state: search, ten-row pages, and submitter name
/// resolution against the user directory. Purely local; refreshing means
/// fetching and calling [`DocumentsView::set_documents`] again.
#[derive(Debug, Clone, Default)]
pub struct DocumentsView {
    documents: Vec<DocumentRecord>,
    users: Vec<UserRecord>,
    search: String,
    page: usize,
    error: Option<String>,
}

impl DocumentsView {
    pub fn new(documents: Vec<DocumentRecord>, users: Vec<UserRecord>) -> Self {
        Self {
            documents,
            users,
            search: String::new(),
            page: 1,
            error: None,
        }
    }

    pub fn set_documents(&mut self, documents: Vec<DocumentRecord>) {
        self.documents = documents;
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Searching does not move the page; a narrowed result set can leave the
    /// current page past the end until the user navigates.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filtered(&self) -> Vec<&DocumentRecord> {
        self.documents
            .iter()
            .filter(|doc| self.row_matches(doc))
            .collect()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        let pages = (self.filtered().len() + PAGE_SIZE - 1) / PAGE_SIZE;
        pages.max(1)
    }

    pub fn next_page(&mut self) {
        self.page = (self.page + 1).min(self.page_count());
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// The page slice is cut before dropping rows without a stored file, so a
    /// page can show fewer than ten rows even mid-list.
    pub fn visible_rows(&self) -> Vec<&DocumentRecord> {
        let start = (self.page - 1) * PAGE_SIZE;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .filter(|doc| has_stored_file(doc))
            .collect()
    }

    /// No backend delete route exists; the row only disappears locally until
    /// the next fetch.
    pub fn remove_local(&mut self, doc_id: DocId) {
        self.documents.retain(|doc| doc.doc_id != doc_id);
    }

    pub fn submitter_name(&self, submitted_by: Option<UserId>) -> String {
        let Some(id) = submitted_by else {
            return "-".to_string();
        };
        match self.users.iter().find(|user| user.user_id == id) {
            Some(user) => display_name(user),
            None => id.0.to_string(),
        }
    }

    fn row_matches(&self, doc: &DocumentRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        let fields = [
            doc.doc_name.clone().unwrap_or_default(),
            doc.doc_type.as_str().to_string(),
            doc.doc_tag.clone().unwrap_or_default(),
            doc.case_id.map(|id| id.0.to_string()).unwrap_or_default(),
            self.submitter_name(doc.doc_submitted_by),
            doc.doc_tasked_by
                .map(|id| id.0.to_string())
                .unwrap_or_default(),
        ];
        fields
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

pub fn has_stored_file(doc: &DocumentRecord) -> bool {
    doc.doc_file.as_deref().is_some_and(|path| !path.is_empty())
}

/// Support documents show their creation date, tasks the date they were
/// submitted.
pub fn display_date(doc: &DocumentRecord) -> Option<&str> {
    match doc.doc_type {
        DocType::Support => doc.doc_date_created.as_deref(),
        DocType::Task => doc.doc_date_submitted.as_deref(),
    }
}

fn display_name(user: &UserRecord) -> String {
    let first = user.user_fname.as_deref().unwrap_or("");
    let middle = user
        .user_mname
        .as_deref()
        .and_then(|name| name.chars().next())
        .map(|initial| format!("{initial}."))
        .unwrap_or_default();
    let last = user.user_lname.as_deref().unwrap_or("");
    let styled = if user.user_role.as_deref() == Some("Staff") {
        format!("{first} {middle} {last}")
    } else {
        format!("Atty. {first} {middle} {last}")
    };
    styled.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case picker for the add-document flow; only cases still in processing
/// accept new documents.
#[derive(Debug, Clone, Default)]
pub struct CasePanel {
    cases: Vec<CaseRecord>,
    selected: Option<CaseId>,
}

impl CasePanel {
    pub fn new(cases: Vec<CaseRecord>) -> Self {
        Self {
            cases,
            selected: None,
        }
    }

    pub fn open_cases(&self) -> Vec<&CaseRecord> {
        self.cases
            .iter()
            .filter(|case| case.case_status.as_deref() == Some("Processing"))
            .collect()
    }

    pub fn select(&mut self, case_id: Option<CaseId>) {
        self.selected = case_id;
    }

    pub fn selected(&self) -> Option<CaseId> {
        self.selected
    }

    pub fn ready_to_add(&self) -> bool {
        self.selected.is_some()
    }
}

pub fn case_label(case: &CaseRecord) -> String {
    let title = [case.ct_name.as_deref(), case.case_remarks.as_deref()]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or("Untitled Case");
    let client = case.client_fullname.as_deref().unwrap_or("");
    format!("#{} - {} ({})", case.case_id.0, title, client)
}
