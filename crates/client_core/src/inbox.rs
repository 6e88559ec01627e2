use shared::domain::NotificationId;
use shared::records::NotificationRecord;

/// Notification list with a selection set, read toggles, and message search.
/// Read state only changes locally; the backend has no read-status route.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    notifications: Vec<NotificationRecord>,
    selected: Vec<NotificationId>,
    query: String,
    unread_only: bool,
}

impl Inbox {
    pub fn new(notifications: Vec<NotificationRecord>) -> Self {
        Self {
            notifications,
            selected: Vec::new(),
            query: String::new(),
            unread_only: false,
        }
    }

    pub fn notifications(&self) -> &[NotificationRecord] {
        &self.notifications
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_unread_only(&mut self, unread_only: bool) {
        self.unread_only = unread_only;
    }

    pub fn clear_filters(&mut self) {
        self.query.clear();
        self.unread_only = false;
    }

    /// Notifications without a message never match, not even an empty query.
    pub fn visible(&self) -> Vec<&NotificationRecord> {
        let query = self.query.trim().to_lowercase();
        self.notifications
            .iter()
            .filter(|notification| {
                notification
                    .notification_message
                    .as_deref()
                    .is_some_and(|message| message.to_lowercase().contains(&query))
            })
            .filter(|notification| !self.unread_only || !notification.is_read)
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|notification| !notification.is_read)
            .count()
    }

    pub fn selected_ids(&self) -> &[NotificationId] {
        &self.selected
    }

    pub fn is_selected(&self, id: NotificationId) -> bool {
        self.selected.contains(&id)
    }

    pub fn toggle_selected(&mut self, id: NotificationId) {
        if let Some(position) = self.selected.iter().position(|selected| *selected == id) {
            self.selected.remove(position);
        } else {
            self.selected.push(id);
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self
            .notifications
            .iter()
            .map(|notification| notification.notification_id)
            .collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn all_selected(&self) -> bool {
        !self.notifications.is_empty() && self.selected.len() == self.notifications.len()
    }

    /// True when every selected notification is read; vacuously true for an
    /// empty selection. Drives the bulk-toggle button label only.
    pub fn selected_all_read(&self) -> bool {
        self.selected.iter().all(|id| {
            self.notifications
                .iter()
                .find(|notification| notification.notification_id == *id)
                .map(|notification| notification.is_read)
                .unwrap_or(true)
        })
    }

    /// Each selected notification flips to its own opposite state, not to a
    /// common target.
    pub fn toggle_selected_read(&mut self) {
        for notification in &mut self.notifications {
            if self.selected.contains(&notification.notification_id) {
                notification.is_read = !notification.is_read;
            }
        }
    }

    pub fn toggle_read(&mut self, id: NotificationId) {
        for notification in &mut self.notifications {
            if notification.notification_id == id {
                notification.is_read = !notification.is_read;
            }
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
    }

    pub fn clear_all(&mut self) {
        self.notifications.clear();
        self.selected.clear();
    }
}
