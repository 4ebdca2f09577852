use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{NewNotification, NotificationAction, NotificationKind};
use crate::shared::NotificationId;

/// A single in-app notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    kind: NotificationKind,
    title: String,
    message: String,
    icon: Option<String>,
    action: Option<NotificationAction>,
    created_at: DateTime<Utc>,
    read: bool,
}

impl Notification {
    /// Create a new, unread notification
    pub fn new(content: NewNotification, created_at: DateTime<Utc>) -> Self {
        Self {
            id: NotificationId::new(),
            kind: content.kind,
            title: content.title,
            message: content.message,
            icon: content.icon,
            action: content.action,
            created_at,
            read: false,
        }
    }

    /// Same as [`Notification::new`] but with a preset read flag, used for seeding
    pub fn with_read(content: NewNotification, created_at: DateTime<Utc>, read: bool) -> Self {
        let mut notification = Self::new(content, created_at);
        notification.read = read;
        notification
    }

    // Getters
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn action(&self) -> Option<&NotificationAction> {
        self.action.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    /// Returns `true` if the notification was unread
    pub fn mark_read(&mut self) -> bool {
        let was_unread = !self.read;
        self.read = true;
        was_unread
    }
}
