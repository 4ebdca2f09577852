use chrono::{DateTime, Utc};
use log::debug;

use super::aggregate::{Conversation, Message};
use super::value_objects::{Participant, AUTO_REPLY_TEXT};
use crate::shared::{ConversationId, DomainError};

/// In-memory conversation list with an optional active selection.
///
/// Conversations are kept newest first; the unread count is derived from
/// each conversation's last message.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    conversations: Vec<Conversation>,
    active: Option<ConversationId>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conversations(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations,
            active: None,
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn get(&self, id: &ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id() == id)
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active.as_ref().and_then(|id| self.get(id))
    }

    pub fn active_id(&self) -> Option<&ConversationId> {
        self.active.as_ref()
    }

    pub fn unread_count(&self) -> usize {
        self.conversations.iter().filter(|c| c.is_unread()).count()
    }

    /// Prepend an empty conversation and select it
    pub fn start_conversation(
        &mut self,
        participant: Participant,
    ) -> Result<ConversationId, DomainError> {
        participant.validate()?;
        let conversation = Conversation::new(participant);
        let id = conversation.id().clone();
        debug!(
            "[inbox] start conversation id={} with={}",
            id,
            conversation.participant().handle
        );
        self.conversations.insert(0, conversation);
        self.active = Some(id.clone());
        Ok(id)
    }

    /// Select a conversation; `None` clears the selection
    pub fn set_active(&mut self, id: Option<&ConversationId>) -> Result<(), DomainError> {
        match id {
            Some(id) => {
                self.find(id)?;
                self.active = Some(id.clone());
            }
            None => self.active = None,
        }
        Ok(())
    }

    /// Append an outgoing message from the local user
    pub fn send_message(
        &mut self,
        id: &ConversationId,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Message, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::Validation(
                "Message text cannot be empty".to_string(),
            ));
        }
        let conversation = self.find_mut(id)?;
        let message = conversation.push_outgoing(text, now);
        debug!("[inbox] sent message id={} conversation={}", message.id, id);
        Ok(message)
    }

    /// Append the scripted reply from the participant.
    ///
    /// Returns `None` when the conversation no longer exists.
    pub fn deliver_auto_reply(
        &mut self,
        id: &ConversationId,
        now: DateTime<Utc>,
    ) -> Option<Message> {
        let conversation = self.conversations.iter_mut().find(|c| c.id() == id)?;
        let message = conversation.push_incoming(AUTO_REPLY_TEXT, now);
        debug!("[inbox] auto-reply id={} conversation={}", message.id, id);
        Some(message)
    }

    /// Returns `false` when no conversation has that id
    pub fn mark_read(&mut self, id: &ConversationId) -> bool {
        match self.conversations.iter_mut().find(|c| c.id() == id) {
            Some(conversation) => {
                conversation.mark_read();
                true
            }
            None => false,
        }
    }

    /// Returns how many conversations changed from unread to read
    pub fn mark_all_read(&mut self) -> usize {
        self.conversations
            .iter_mut()
            .map(|c| c.mark_read())
            .filter(|changed| *changed)
            .count()
    }

    /// Remove a conversation, clearing the selection if it pointed there
    pub fn delete(&mut self, id: &ConversationId) -> bool {
        let before = self.conversations.len();
        self.conversations.retain(|c| c.id() != id);
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        self.conversations.len() != before
    }

    pub fn clear_all(&mut self) {
        self.conversations.clear();
        self.active = None;
    }

    fn find(&self, id: &ConversationId) -> Result<&Conversation, DomainError> {
        self.get(id)
            .ok_or_else(|| DomainError::ConversationNotFound(id.to_string()))
    }

    fn find_mut(&mut self, id: &ConversationId) -> Result<&mut Conversation, DomainError> {
        self.conversations
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or_else(|| DomainError::ConversationNotFound(id.to_string()))
    }
}
