use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::events::DomainEvent;
use crate::shared::{ConversationId, MessageId};

/// Macro to implement DomainEvent trait with type name
macro_rules! impl_domain_event {
    ($type:ty) => {
        impl DomainEvent for $type {
            fn as_any(&self) -> &(dyn Any + Send + Sync) {
                self
            }

            fn event_type_name(&self) -> &'static str {
                std::any::type_name::<Self>()
            }
        }
    };
}

/// Event fired when the streak achievement should be celebrated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementUnlocked {
    pub current_streak: u32,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(AchievementUnlocked);

/// Event fired when the scripted auto-reply lands in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoReplyDelivered {
    pub conversation_id: ConversationId,
    pub message_id: MessageId,
    pub sender_id: String,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(AutoReplyDelivered);
