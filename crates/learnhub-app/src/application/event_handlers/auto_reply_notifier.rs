use async_trait::async_trait;

use crate::application::services::{UiEvent, UiEventSender};
use learnhub_domain::events::{AutoReplyDelivered, EventHandler};
use learnhub_domain::messaging::AUTO_REPLY_TEXT;
use learnhub_domain::shared::DomainError;

/// Surfaces delivered auto-replies to the front end
pub struct AutoReplyNotifier {
    ui: UiEventSender,
}

impl AutoReplyNotifier {
    pub fn new(ui: UiEventSender) -> Self {
        Self { ui }
    }
}

#[async_trait]
impl EventHandler<AutoReplyDelivered> for AutoReplyNotifier {
    async fn handle(&self, event: &AutoReplyDelivered) -> Result<(), DomainError> {
        self.ui.emit(UiEvent::MessageReceived {
            conversation_id: event.conversation_id.to_string(),
            sender: event.sender_id.clone(),
            text: AUTO_REPLY_TEXT.to_string(),
        });
        Ok(())
    }
}
