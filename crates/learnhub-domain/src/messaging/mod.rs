mod aggregate;
mod inbox;
mod seed;
mod value_objects;

pub use aggregate::{Conversation, LastMessage, Message};
pub use inbox::Inbox;
pub use seed::demo_conversations;
pub use value_objects::{Participant, ParticipantRole, AUTO_REPLY_TEXT, SELF_SENDER_ID};
