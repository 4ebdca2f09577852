use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{Participant, SELF_SENDER_ID};
use crate::shared::{ConversationId, MessageId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn new(sender_id: impl Into<String>, text: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::new(),
            sender_id: sender_id.into(),
            text: text.into(),
            sent_at,
        }
    }

    pub fn is_outgoing(&self) -> bool {
        self.sender_id == SELF_SENDER_ID
    }
}

/// Preview of the latest message, carries the conversation's read state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMessage {
    pub text: String,
    pub sent_at: DateTime<Utc>,
    pub sender_id: String,
    pub unread: bool,
}

/// Conversation aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    participant: Participant,
    messages: Vec<Message>,
    last_message: Option<LastMessage>,
}

impl Conversation {
    /// Start an empty conversation
    pub fn new(participant: Participant) -> Self {
        Self {
            id: ConversationId::new(),
            participant,
            messages: Vec::new(),
            last_message: None,
        }
    }

    /// Rebuild from an existing message history; the last message is
    /// unread when `unread` is set and it was not sent by the local user
    pub fn with_history(participant: Participant, messages: Vec<Message>, unread: bool) -> Self {
        let last_message = messages.last().map(|m| LastMessage {
            text: m.text.clone(),
            sent_at: m.sent_at,
            sender_id: m.sender_id.clone(),
            unread: unread && !m.is_outgoing(),
        });
        Self {
            id: ConversationId::new(),
            participant,
            messages,
            last_message,
        }
    }

    // Getters
    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&LastMessage> {
        self.last_message.as_ref()
    }

    pub fn is_unread(&self) -> bool {
        self.last_message.as_ref().is_some_and(|m| m.unread)
    }

    // Business methods

    /// Append a message from the local user; it is never unread
    pub fn push_outgoing(&mut self, text: &str, now: DateTime<Utc>) -> Message {
        self.push(Message::new(SELF_SENDER_ID, text, now), false)
    }

    /// Append a message from the participant, unread
    pub fn push_incoming(&mut self, text: &str, now: DateTime<Utc>) -> Message {
        let sender = self.participant.handle.clone();
        self.push(Message::new(sender, text, now), true)
    }

    /// Returns `true` if the last message was unread
    pub fn mark_read(&mut self) -> bool {
        match self.last_message.as_mut() {
            Some(last) if last.unread => {
                last.unread = false;
                true
            }
            _ => false,
        }
    }

    fn push(&mut self, message: Message, unread: bool) -> Message {
        self.last_message = Some(LastMessage {
            text: message.text.clone(),
            sent_at: message.sent_at,
            sender_id: message.sender_id.clone(),
            unread,
        });
        self.messages.push(message.clone());
        message
    }
}
