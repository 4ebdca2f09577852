use chrono::Utc;
use log::{error, info};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::scheduler::{TaskId, TaskScheduler};
use crate::application::config::TimeoutConfig;
use crate::application::dtos::{ConversationDto, MessageDto};
use learnhub_domain::events::{AutoReplyDelivered, EventBus};
use learnhub_domain::messaging::{demo_conversations, Inbox, Participant};
use learnhub_domain::shared::{ConversationId, DomainError};

/// Outcome of sending a message
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub message: MessageDto,
    /// Pending auto-reply, cancellable through the scheduler
    pub reply_task: TaskId,
}

/// Session-scoped inbox with the scripted auto-reply
pub struct MessagingService {
    inbox: Arc<Mutex<Inbox>>,
    scheduler: Arc<TaskScheduler>,
    event_bus: Arc<dyn EventBus>,
    timeouts: TimeoutConfig,
}

impl MessagingService {
    pub fn new(
        scheduler: Arc<TaskScheduler>,
        event_bus: Arc<dyn EventBus>,
        timeouts: TimeoutConfig,
    ) -> Self {
        Self {
            inbox: Arc::new(Mutex::new(Inbox::new())),
            scheduler,
            event_bus,
            timeouts,
        }
    }

    /// Replace the inbox with the demo conversations
    pub async fn seed_demo(&self) {
        *self.inbox.lock().await = Inbox::with_conversations(demo_conversations(Utc::now()));
    }

    pub async fn list(&self) -> Vec<ConversationDto> {
        let inbox = self.inbox.lock().await;
        let active = inbox.active_id().cloned();
        inbox
            .conversations()
            .iter()
            .map(|c| ConversationDto::from_conversation(c, active.as_ref() == Some(c.id())))
            .collect()
    }

    pub async fn get(&self, id: &ConversationId) -> Result<ConversationDto, DomainError> {
        let inbox = self.inbox.lock().await;
        let active = inbox.active_id() == Some(id);
        inbox
            .get(id)
            .map(|c| ConversationDto::from_conversation(c, active))
            .ok_or_else(|| DomainError::ConversationNotFound(id.to_string()))
    }

    pub async fn unread_count(&self) -> usize {
        self.inbox.lock().await.unread_count()
    }

    pub async fn start_conversation(
        &self,
        participant: Participant,
    ) -> Result<ConversationId, DomainError> {
        self.inbox.lock().await.start_conversation(participant)
    }

    /// Select a conversation and mark it read
    pub async fn open(&self, id: &ConversationId) -> Result<ConversationDto, DomainError> {
        {
            let mut inbox = self.inbox.lock().await;
            inbox.set_active(Some(id))?;
            inbox.mark_read(id);
        }
        self.get(id).await
    }

    /// Append an outgoing message and schedule the participant's reply
    pub async fn send_message(
        &self,
        id: &ConversationId,
        text: &str,
    ) -> Result<SentMessage, DomainError> {
        let message = self.inbox.lock().await.send_message(id, text, Utc::now())?;

        let inbox = self.inbox.clone();
        let event_bus = self.event_bus.clone();
        let conversation_id = id.clone();
        let reply_task = self
            .scheduler
            .schedule_after("auto-reply", self.timeouts.auto_reply, async move {
                deliver_auto_reply(inbox, event_bus, conversation_id).await;
            })
            .await;

        Ok(SentMessage {
            message: MessageDto::from(&message),
            reply_task,
        })
    }

    pub async fn mark_read(&self, id: &ConversationId) -> Result<(), DomainError> {
        if self.inbox.lock().await.mark_read(id) {
            Ok(())
        } else {
            Err(DomainError::ConversationNotFound(id.to_string()))
        }
    }

    pub async fn mark_all_read(&self) -> usize {
        self.inbox.lock().await.mark_all_read()
    }

    pub async fn delete(&self, id: &ConversationId) -> Result<(), DomainError> {
        if self.inbox.lock().await.delete(id) {
            Ok(())
        } else {
            Err(DomainError::ConversationNotFound(id.to_string()))
        }
    }

    pub async fn clear_all(&self) {
        self.inbox.lock().await.clear_all();
    }

    /// Resolve a 1-based list position or a full id
    pub async fn resolve(&self, reference: &str) -> Result<ConversationId, DomainError> {
        let inbox = self.inbox.lock().await;
        let found = match reference.parse::<usize>() {
            Ok(position) if position >= 1 => inbox.conversations().get(position - 1),
            _ => inbox.get(&ConversationId::from_string(reference)),
        };
        found
            .map(|c| c.id().clone())
            .ok_or_else(|| DomainError::ConversationNotFound(reference.to_string()))
    }
}

async fn deliver_auto_reply(
    inbox: Arc<Mutex<Inbox>>,
    event_bus: Arc<dyn EventBus>,
    conversation_id: ConversationId,
) {
    let delivered = inbox
        .lock()
        .await
        .deliver_auto_reply(&conversation_id, Utc::now());

    let Some(message) = delivered else {
        info!(
            "[inbox] conversation {} is gone, auto-reply dropped",
            conversation_id
        );
        return;
    };

    let event = AutoReplyDelivered {
        conversation_id,
        message_id: message.id,
        sender_id: message.sender_id,
        occurred_at: message.sent_at,
    };
    if let Err(e) = event_bus.publish(Box::new(event)).await {
        error!("[inbox] failed to publish auto-reply event: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use learnhub_domain::events::DomainEvent;
    use learnhub_domain::messaging::{ParticipantRole, AUTO_REPLY_TEXT};
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingEventBus {
        replies: Mutex<Vec<AutoReplyDelivered>>,
    }

    #[async_trait]
    impl EventBus for RecordingEventBus {
        async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
            if let Some(reply) = event.as_any().downcast_ref::<AutoReplyDelivered>() {
                self.replies.lock().await.push(reply.clone());
            }
            Ok(())
        }
    }

    fn setup() -> (MessagingService, Arc<TaskScheduler>, Arc<RecordingEventBus>) {
        let scheduler = Arc::new(TaskScheduler::new());
        let bus = Arc::new(RecordingEventBus::default());
        let service = MessagingService::new(scheduler.clone(), bus.clone(), TimeoutConfig::default());
        (service, scheduler, bus)
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_reply_arrives_after_delay() {
        let (service, scheduler, bus) = setup();
        service.seed_demo().await;
        let id = service.resolve("3").await.unwrap();

        service.send_message(&id, "See you at the study group").await.unwrap();
        let sent = service.get(&id).await.unwrap();
        assert!(!sent.unread);
        assert_eq!(sent.last_message.unwrap().sender_id, "me");

        tokio::time::sleep(Duration::from_millis(1900)).await;
        assert!(!service.get(&id).await.unwrap().unread);

        assert_eq!(scheduler.join_all().await, 1);
        let replied = service.get(&id).await.unwrap();
        let last = replied.last_message.unwrap();
        assert!(replied.unread);
        assert_eq!(last.text, AUTO_REPLY_TEXT);
        assert_eq!(last.sender_id, "arjun");

        let replies = bus.replies.lock().await;
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].conversation_id, id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_dropped_after_delete() {
        let (service, scheduler, bus) = setup();
        let id = service
            .start_conversation(Participant::new(
                "meera",
                "Meera Iyer",
                ParticipantRole::Tutor,
                "Statistics",
            ))
            .await
            .unwrap();

        service.send_message(&id, "hello").await.unwrap();
        service.delete(&id).await.unwrap();

        scheduler.join_all().await;
        assert!(bus.replies.lock().await.is_empty());
        assert_eq!(service.unread_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_reply_never_lands() {
        let (service, scheduler, _bus) = setup();
        service.seed_demo().await;
        let id = service.resolve("4").await.unwrap();

        let sent = service.send_message(&id, "thanks").await.unwrap();
        assert!(scheduler.cancel(sent.reply_task).await);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(service.get(&id).await.unwrap().messages.len(), 2);
    }

    #[tokio::test]
    async fn test_blank_message_schedules_nothing() {
        let (service, scheduler, _bus) = setup();
        service.seed_demo().await;
        let id = service.resolve("1").await.unwrap();

        assert!(matches!(
            service.send_message(&id, "   ").await,
            Err(DomainError::Validation(_))
        ));
        assert_eq!(scheduler.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_open_marks_read_and_activates() {
        let (service, _scheduler, _bus) = setup();
        service.seed_demo().await;
        assert_eq!(service.unread_count().await, 2);

        let id = service.resolve("1").await.unwrap();
        let opened = service.open(&id).await.unwrap();
        assert!(opened.active);
        assert!(!opened.unread);
        assert_eq!(service.unread_count().await, 1);

        service.delete(&id).await.unwrap();
        assert!(service.list().await.iter().all(|c| !c.active));
    }
}
