use chrono::{DateTime, Utc};
use log::debug;

use super::aggregate::Notification;
use super::value_objects::{NewNotification, NotificationTemplate};
use crate::shared::{DomainError, NotificationId};

/// In-memory notification list, newest first.
///
/// The unread count is always derived from the items, so it cannot drift
/// from the read flags.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing notifications, kept in the given order
    pub fn with_items(items: Vec<Notification>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.items.iter().find(|n| n.id() == id)
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read()).count()
    }

    /// Prepend a new unread notification
    pub fn add(
        &mut self,
        content: NewNotification,
        now: DateTime<Utc>,
    ) -> Result<NotificationId, DomainError> {
        content.validate()?;
        let notification = Notification::new(content, now);
        let id = notification.id().clone();
        debug!("[notify] add id={} kind={}", id, notification.kind());
        self.items.insert(0, notification);
        Ok(id)
    }

    /// Raise one of the canned notifications
    pub fn simulate(
        &mut self,
        template: NotificationTemplate,
        now: DateTime<Utc>,
    ) -> Result<NotificationId, DomainError> {
        self.add(template.render(), now)
    }

    /// Returns `false` when no notification has that id
    pub fn mark_read(&mut self, id: &NotificationId) -> bool {
        match self.items.iter_mut().find(|n| n.id() == id) {
            Some(notification) => {
                notification.mark_read();
                true
            }
            None => false,
        }
    }

    /// Returns how many notifications changed from unread to read
    pub fn mark_all_read(&mut self) -> usize {
        self.items
            .iter_mut()
            .map(|n| n.mark_read())
            .filter(|changed| *changed)
            .count()
    }

    /// Returns `false` when no notification has that id
    pub fn delete(&mut self, id: &NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id() != id);
        self.items.len() != before
    }

    pub fn clear_all(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{demo_notifications, NotificationKind};

    fn sample(title: &str) -> NewNotification {
        NewNotification::new(NotificationKind::Info, title, "body")
    }

    #[test]
    fn test_add_prepends_unread() {
        let mut center = NotificationCenter::new();
        let first = center.add(sample("first"), Utc::now()).unwrap();
        let second = center.add(sample("second"), Utc::now()).unwrap();

        assert_eq!(center.items()[0].id(), &second);
        assert_eq!(center.items()[1].id(), &first);
        assert_eq!(center.unread_count(), 2);
    }

    #[test]
    fn test_add_rejects_empty_title() {
        let mut center = NotificationCenter::new();
        assert!(center.add(sample("  "), Utc::now()).is_err());
        assert!(center.is_empty());
    }

    #[test]
    fn test_mark_read_updates_unread_count() {
        let mut center = NotificationCenter::new();
        let id = center.add(sample("a"), Utc::now()).unwrap();
        center.add(sample("b"), Utc::now()).unwrap();

        assert!(center.mark_read(&id));
        assert_eq!(center.unread_count(), 1);
        assert!(center.get(&id).unwrap().is_read());

        // idempotent
        assert!(center.mark_read(&id));
        assert_eq!(center.unread_count(), 1);
    }

    #[test]
    fn test_mark_read_unknown_id_is_noop() {
        let mut center = NotificationCenter::with_items(demo_notifications(Utc::now()));
        let unread = center.unread_count();

        assert!(!center.mark_read(&NotificationId::from_string("missing")));
        assert_eq!(center.unread_count(), unread);
    }

    #[test]
    fn test_mark_all_read() {
        let mut center = NotificationCenter::with_items(demo_notifications(Utc::now()));
        assert_eq!(center.unread_count(), 3);

        assert_eq!(center.mark_all_read(), 3);
        assert_eq!(center.unread_count(), 0);
        assert!(center.items().iter().all(|n| n.is_read()));
        assert_eq!(center.mark_all_read(), 0);
    }

    #[test]
    fn test_delete_and_clear() {
        let mut center = NotificationCenter::new();
        let id = center.add(sample("a"), Utc::now()).unwrap();
        center.add(sample("b"), Utc::now()).unwrap();

        assert!(center.delete(&id));
        assert!(!center.delete(&id));
        assert_eq!(center.len(), 1);
        assert_eq!(center.unread_count(), 1);

        center.clear_all();
        assert!(center.is_empty());
        assert_eq!(center.unread_count(), 0);
    }

    #[test]
    fn test_simulate_badge() {
        let mut center = NotificationCenter::new();
        let id = center.simulate(NotificationTemplate::Badge, Utc::now()).unwrap();

        let badge = center.get(&id).unwrap();
        assert_eq!(badge.kind(), NotificationKind::Achievement);
        assert_eq!(badge.title(), "New Badge Earned! 🏆");
        assert_eq!(badge.action().unwrap().label, "View Badges");
        assert!(!badge.is_read());
    }

    #[test]
    fn test_template_parsing() {
        assert_eq!(
            "deadline".parse::<NotificationTemplate>().unwrap(),
            NotificationTemplate::Deadline
        );
        assert!("party".parse::<NotificationTemplate>().is_err());
        for template in NotificationTemplate::ALL {
            assert!(template.render().validate().is_ok());
        }
    }
}
