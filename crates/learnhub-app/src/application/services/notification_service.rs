use chrono::Utc;
use log::info;
use tokio::sync::Mutex;

use super::ui_events::{UiEvent, UiEventSender};
use crate::application::dtos::NotificationDto;
use learnhub_domain::notification::{
    demo_notifications, NewNotification, NotificationCenter, NotificationTemplate,
};
use learnhub_domain::shared::{DomainError, NotificationId};

/// Session-scoped notification list
pub struct NotificationService {
    center: Mutex<NotificationCenter>,
    ui: UiEventSender,
}

impl NotificationService {
    pub fn new(ui: UiEventSender) -> Self {
        Self {
            center: Mutex::new(NotificationCenter::new()),
            ui,
        }
    }

    /// Replace the list with the demo notifications
    pub async fn seed_demo(&self) {
        *self.center.lock().await = NotificationCenter::with_items(demo_notifications(Utc::now()));
    }

    pub async fn list(&self) -> Vec<NotificationDto> {
        self.center
            .lock()
            .await
            .items()
            .iter()
            .map(NotificationDto::from)
            .collect()
    }

    pub async fn unread_count(&self) -> usize {
        self.center.lock().await.unread_count()
    }

    pub async fn add(&self, content: NewNotification) -> Result<NotificationId, DomainError> {
        let title = content.title.clone();
        let id = self.center.lock().await.add(content, Utc::now())?;
        self.ui.emit(UiEvent::NotificationAdded {
            id: id.to_string(),
            title,
        });
        Ok(id)
    }

    pub async fn simulate(
        &self,
        template: NotificationTemplate,
    ) -> Result<NotificationId, DomainError> {
        info!("[notify] simulate {}", template);
        self.add(template.render()).await
    }

    pub async fn mark_read(&self, id: &NotificationId) -> Result<(), DomainError> {
        if self.center.lock().await.mark_read(id) {
            Ok(())
        } else {
            Err(DomainError::NotificationNotFound(id.to_string()))
        }
    }

    pub async fn mark_all_read(&self) -> usize {
        self.center.lock().await.mark_all_read()
    }

    pub async fn delete(&self, id: &NotificationId) -> Result<(), DomainError> {
        if self.center.lock().await.delete(id) {
            Ok(())
        } else {
            Err(DomainError::NotificationNotFound(id.to_string()))
        }
    }

    pub async fn clear_all(&self) {
        self.center.lock().await.clear_all();
    }

    /// Resolve a 1-based list position or a full id
    pub async fn resolve(&self, reference: &str) -> Result<NotificationId, DomainError> {
        let center = self.center.lock().await;
        let found = match reference.parse::<usize>() {
            Ok(position) if position >= 1 => center.items().get(position - 1),
            _ => center.get(&NotificationId::from_string(reference)),
        };
        found
            .map(|n| n.id().clone())
            .ok_or_else(|| DomainError::NotificationNotFound(reference.to_string()))
    }
}
