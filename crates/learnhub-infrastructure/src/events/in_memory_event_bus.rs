use async_trait::async_trait;
use log::{debug, error};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use learnhub_domain::events::{DomainEvent, DynamicEventHandler, EventBus};
use learnhub_domain::shared::DomainError;

/// In-memory event bus
/// Handlers run in subscription order on the publishing task
pub struct InMemoryEventBus {
    handlers: Arc<RwLock<HashMap<&'static str, Vec<Arc<dyn DynamicEventHandler>>>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribe a handler to a specific event type
    pub async fn subscribe<E: DomainEvent + 'static>(&self, handler: Arc<dyn DynamicEventHandler>) {
        let event_type_name = std::any::type_name::<E>();
        let mut handlers = self.handlers.write().await;
        handlers.entry(event_type_name).or_default().push(handler);
        debug!("[events] subscribed handler for {}", event_type_name);
    }

    /// Get the number of handlers for a specific event type
    pub async fn handler_count<E: DomainEvent + 'static>(&self) -> usize {
        let handlers = self.handlers.read().await;
        handlers
            .get(std::any::type_name::<E>())
            .map_or(0, |h| h.len())
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        let event_type_name = event.event_type_name();
        let event_handlers = {
            let handlers = self.handlers.read().await;
            handlers.get(event_type_name).cloned().unwrap_or_default()
        };

        if event_handlers.is_empty() {
            debug!("[events] no handlers for {}", event_type_name);
            return Ok(());
        }

        debug!(
            "[events] publishing {} to {} handler(s)",
            event_type_name,
            event_handlers.len()
        );

        for handler in event_handlers {
            // one failing handler must not starve the others
            if let Err(e) = handler.handle_dynamic(event.as_any()).await {
                error!("[events] handler failed for {}: {}", event_type_name, e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use learnhub_domain::events::{
        AchievementUnlocked, AutoReplyDelivered, EventHandler, TypedEventHandlerWrapper,
    };
    use learnhub_domain::shared::{ConversationId, MessageId};

    struct CountingHandler {
        calls: Arc<RwLock<Vec<u32>>>,
    }

    #[async_trait]
    impl EventHandler<AchievementUnlocked> for CountingHandler {
        async fn handle(&self, event: &AchievementUnlocked) -> Result<(), DomainError> {
            self.calls.write().await.push(event.current_streak);
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler<AchievementUnlocked> for FailingHandler {
        async fn handle(&self, _event: &AchievementUnlocked) -> Result<(), DomainError> {
            Err(DomainError::Infrastructure("boom".to_string()))
        }
    }

    fn unlocked() -> Box<AchievementUnlocked> {
        Box::new(AchievementUnlocked {
            current_streak: 7,
            occurred_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_event_bus_publishes_to_handlers() {
        let bus = InMemoryEventBus::new();
        let calls = Arc::new(RwLock::new(Vec::new()));

        bus.subscribe::<AchievementUnlocked>(Arc::new(TypedEventHandlerWrapper::<AchievementUnlocked, _>::new(
            FailingHandler,
        )))
        .await;
        bus.subscribe::<AchievementUnlocked>(Arc::new(TypedEventHandlerWrapper::<AchievementUnlocked, _>::new(
            CountingHandler {
                calls: calls.clone(),
            },
        )))
        .await;
        assert_eq!(bus.handler_count::<AchievementUnlocked>().await, 2);

        bus.publish(unlocked()).await.unwrap();

        assert_eq!(*calls.read().await, vec![7]);
    }

    #[tokio::test]
    async fn test_event_without_handlers_is_ignored() {
        let bus = InMemoryEventBus::new();
        let calls = Arc::new(RwLock::new(Vec::new()));
        bus.subscribe::<AchievementUnlocked>(Arc::new(TypedEventHandlerWrapper::<AchievementUnlocked, _>::new(
            CountingHandler {
                calls: calls.clone(),
            },
        )))
        .await;

        let event = Box::new(AutoReplyDelivered {
            conversation_id: ConversationId::from_string("conv-3"),
            message_id: MessageId::new(),
            sender_id: "lena".to_string(),
            occurred_at: Utc::now(),
        });
        bus.publish(event).await.unwrap();

        assert!(calls.read().await.is_empty());
        assert_eq!(bus.handler_count::<AutoReplyDelivered>().await, 0);
    }
}
