use serde::{Deserialize, Serialize};
use specta::Type;

use learnhub_domain::messaging::{Conversation, LastMessage, Message, Participant};

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ParticipantDto {
    pub handle: String,
    pub name: String,
    pub role: String,
    pub course: String,
    pub online: bool,
    pub avatar: Option<String>,
}

impl From<&Participant> for ParticipantDto {
    fn from(p: &Participant) -> Self {
        Self {
            handle: p.handle.clone(),
            name: p.name.clone(),
            role: p.role.to_string(),
            course: p.course.clone(),
            online: p.online,
            avatar: p.avatar.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct MessageDto {
    pub id: String,
    pub sender_id: String,
    pub text: String,
    pub sent_at: String,
    pub outgoing: bool,
}

impl From<&Message> for MessageDto {
    fn from(m: &Message) -> Self {
        Self {
            id: m.id.to_string(),
            sender_id: m.sender_id.clone(),
            text: m.text.clone(),
            sent_at: m.sent_at.to_rfc3339(),
            outgoing: m.is_outgoing(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct LastMessageDto {
    pub text: String,
    pub sender_id: String,
    pub sent_at: String,
    pub unread: bool,
}

impl From<&LastMessage> for LastMessageDto {
    fn from(m: &LastMessage) -> Self {
        Self {
            text: m.text.clone(),
            sender_id: m.sender_id.clone(),
            sent_at: m.sent_at.to_rfc3339(),
            unread: m.unread,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ConversationDto {
    pub id: String,
    pub participant: ParticipantDto,
    pub last_message: Option<LastMessageDto>,
    pub messages: Vec<MessageDto>,
    pub unread: bool,
    pub active: bool,
}

impl ConversationDto {
    pub fn from_conversation(conversation: &Conversation, active: bool) -> Self {
        Self {
            id: conversation.id().to_string(),
            participant: conversation.participant().into(),
            last_message: conversation.last_message().map(LastMessageDto::from),
            messages: conversation.messages().iter().map(MessageDto::from).collect(),
            unread: conversation.is_unread(),
            active,
        }
    }
}
