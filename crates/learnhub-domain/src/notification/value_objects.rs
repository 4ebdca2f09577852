use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

/// Notification type tag, drives the icon colour in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Achievement,
    Certificate,
    Reminder,
    Info,
    Warning,
}

impl NotificationKind {
    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Achievement => "achievement",
            NotificationKind::Certificate => "certificate",
            NotificationKind::Reminder => "reminder",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(NotificationKind::Success),
            "achievement" => Ok(NotificationKind::Achievement),
            "certificate" => Ok(NotificationKind::Certificate),
            "reminder" => Ok(NotificationKind::Reminder),
            "info" => Ok(NotificationKind::Info),
            "warning" => Ok(NotificationKind::Warning),
            _ => Err(DomainError::InvalidInput(format!(
                "Unknown notification kind: {s}"
            ))),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Call-to-action attached to a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub label: String,
    pub link: String,
}

impl NotificationAction {
    pub fn new(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: link.into(),
        }
    }
}

/// Content of a notification before it gets an id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub icon: Option<String>,
    pub action: Option<NotificationAction>,
}

impl NewNotification {
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            icon: None,
            action: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_action(mut self, label: impl Into<String>, link: impl Into<String>) -> Self {
        self.action = Some(NotificationAction::new(label, link));
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation(
                "Notification title cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Canned notifications the platform raises for well-known events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTemplate {
    Registration,
    Purchase,
    Completion,
    Deadline,
    Message,
    Badge,
}

impl NotificationTemplate {
    pub const ALL: [NotificationTemplate; 6] = [
        NotificationTemplate::Registration,
        NotificationTemplate::Purchase,
        NotificationTemplate::Completion,
        NotificationTemplate::Deadline,
        NotificationTemplate::Message,
        NotificationTemplate::Badge,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            NotificationTemplate::Registration => "registration",
            NotificationTemplate::Purchase => "purchase",
            NotificationTemplate::Completion => "completion",
            NotificationTemplate::Deadline => "deadline",
            NotificationTemplate::Message => "message",
            NotificationTemplate::Badge => "badge",
        }
    }

    pub fn render(&self) -> NewNotification {
        match self {
            NotificationTemplate::Registration => NewNotification::new(
                NotificationKind::Success,
                "Welcome to JGEC Learn! 🎉",
                "Your account has been successfully created. Start exploring courses now!",
            )
            .with_icon("user-plus")
            .with_action("Explore Courses", "#"),
            NotificationTemplate::Purchase => NewNotification::new(
                NotificationKind::Success,
                "Course Purchase Successful",
                "You now have access to all premium features. Happy learning!",
            )
            .with_icon("shopping-cart")
            .with_action("Start Learning", "#"),
            NotificationTemplate::Completion => NewNotification::new(
                NotificationKind::Achievement,
                "Course Completed! 🎓",
                "Congratulations on completing the course. Your certificate is being prepared.",
            )
            .with_icon("check-circle")
            .with_action("View Certificate", "#"),
            NotificationTemplate::Deadline => NewNotification::new(
                NotificationKind::Warning,
                "Assignment Due Soon",
                "Your assignment is due in 2 hours. Submit before the deadline!",
            )
            .with_icon("alert-triangle")
            .with_action("Submit Now", "#"),
            NotificationTemplate::Message => NewNotification::new(
                NotificationKind::Info,
                "New Message from Instructor",
                "Prof. David Malan has responded to your question",
            )
            .with_icon("message-circle")
            .with_action("Read Message", "#"),
            NotificationTemplate::Badge => NewNotification::new(
                NotificationKind::Achievement,
                "New Badge Earned! 🏆",
                "You've earned the \"Dedicated Learner\" badge",
            )
            .with_icon("award")
            .with_action("View Badges", "#"),
        }
    }
}

impl FromStr for NotificationTemplate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationTemplate::ALL
            .iter()
            .find(|template| template.as_str() == s)
            .copied()
            .ok_or_else(|| DomainError::InvalidInput(format!("Unknown notification template: {s}")))
    }
}

impl fmt::Display for NotificationTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
