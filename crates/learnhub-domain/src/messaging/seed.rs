use chrono::{DateTime, Duration, Utc};

use super::aggregate::{Conversation, Message};
use super::value_objects::{Participant, ParticipantRole, SELF_SENDER_ID};

fn avatar(seed: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={seed}")
}

/// Conversations shown on a fresh session, newest first; the first two
/// are unread
pub fn demo_conversations(now: DateTime<Utc>) -> Vec<Conversation> {
    let minutes = |m: i64| now - Duration::minutes(m);

    vec![
        Conversation::with_history(
            Participant::new("rajesh", "Prof. Rajesh Sharma", ParticipantRole::Instructor, "CS50 Python")
                .online(true)
                .with_avatar(avatar("Rajesh")),
            vec![
                Message::new(
                    SELF_SENDER_ID,
                    "Hi Professor! I have a question about Python decorators.",
                    minutes(10),
                ),
                Message::new(
                    "rajesh",
                    "Great question! Let me explain the concept of decorators...",
                    minutes(5),
                ),
            ],
            true,
        ),
        Conversation::with_history(
            Participant::new("priya", "Dr. Priya Kapoor", ParticipantRole::Tutor, "Data Science")
                .online(true)
                .with_avatar(avatar("Priya")),
            vec![
                Message::new(
                    SELF_SENDER_ID,
                    "Can you help me understand the data visualization assignment?",
                    minutes(35),
                ),
                Message::new("priya", "I can help you with that assignment!", minutes(30)),
            ],
            true,
        ),
        Conversation::with_history(
            Participant::new("arjun", "Arjun Mehta", ParticipantRole::Student, "Machine Learning")
                .with_avatar(avatar("Arjun")),
            vec![
                Message::new("arjun", "Hey! Are you taking the ML course too?", minutes(180)),
                Message::new(
                    SELF_SENDER_ID,
                    "Yes! Here are some helpful resources I found.",
                    minutes(150),
                ),
                Message::new("arjun", "Thanks for sharing those resources!", minutes(120)),
            ],
            false,
        ),
        Conversation::with_history(
            Participant::new("aditya", "Prof. Aditya Verma", ParticipantRole::Instructor, "Financial Markets")
                .with_avatar(avatar("Aditya")),
            vec![Message::new(
                "aditya",
                "The assignment deadline has been extended to next Monday.",
                minutes(24 * 60),
            )],
            false,
        ),
        Conversation::with_history(
            Participant::new("kavya", "Kavya Reddy", ParticipantRole::Tutor, "Data Analytics")
                .online(true)
                .with_avatar(avatar("Kavya")),
            vec![
                Message::new(
                    SELF_SENDER_ID,
                    "Can we schedule a tutoring session?",
                    minutes(49 * 60),
                ),
                Message::new("kavya", "See you in the study session tomorrow!", minutes(48 * 60)),
            ],
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_conversations() {
        let conversations = demo_conversations(Utc::now());
        assert_eq!(conversations.len(), 5);
        assert_eq!(conversations.iter().filter(|c| c.is_unread()).count(), 2);
        assert!(conversations.iter().all(|c| c.participant().validate().is_ok()));
        assert!(conversations
            .iter()
            .all(|c| c.last_message().map(|m| &m.text) == c.messages().last().map(|m| &m.text)));
    }
}
