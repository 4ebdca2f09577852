use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

/// Sender id of the local user
pub const SELF_SENDER_ID: &str = "me";

/// Scripted reply delivered after every outgoing message
pub const AUTO_REPLY_TEXT: &str = "Thanks for your message! I'll get back to you shortly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    Instructor,
    Tutor,
    Student,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &str {
        match self {
            ParticipantRole::Instructor => "instructor",
            ParticipantRole::Tutor => "tutor",
            ParticipantRole::Student => "student",
        }
    }
}

impl FromStr for ParticipantRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "instructor" => Ok(ParticipantRole::Instructor),
            "tutor" => Ok(ParticipantRole::Tutor),
            "student" => Ok(ParticipantRole::Student),
            _ => Err(DomainError::InvalidInput(format!(
                "Unknown participant role: {s}"
            ))),
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The other side of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Sender id used on this participant's messages
    pub handle: String,
    pub name: String,
    pub role: ParticipantRole,
    pub course: String,
    pub online: bool,
    pub avatar: Option<String>,
}

impl Participant {
    pub fn new(
        handle: impl Into<String>,
        name: impl Into<String>,
        role: ParticipantRole,
        course: impl Into<String>,
    ) -> Self {
        Self {
            handle: handle.into(),
            name: name.into(),
            role,
            course: course.into(),
            online: false,
            avatar: None,
        }
    }

    pub fn online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.handle.trim().is_empty() {
            return Err(DomainError::Validation(
                "Participant handle cannot be empty".to_string(),
            ));
        }
        if self.handle == SELF_SENDER_ID {
            return Err(DomainError::Validation(format!(
                "Participant handle '{SELF_SENDER_ID}' is reserved"
            )));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Participant name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
