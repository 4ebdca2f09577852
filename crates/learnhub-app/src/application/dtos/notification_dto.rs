use serde::{Deserialize, Serialize};
use specta::Type;

use learnhub_domain::notification::Notification;

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct NotificationDto {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub icon: Option<String>,
    pub action_label: Option<String>,
    pub action_link: Option<String>,
    pub created_at: String, // RFC 3339
    pub read: bool,
}

impl From<&Notification> for NotificationDto {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id().to_string(),
            kind: n.kind().to_string(),
            title: n.title().to_string(),
            message: n.message().to_string(),
            icon: n.icon().map(str::to_string),
            action_label: n.action().map(|a| a.label.clone()),
            action_link: n.action().map(|a| a.link.clone()),
            created_at: n.created_at().to_rfc3339(),
            read: n.is_read(),
        }
    }
}
