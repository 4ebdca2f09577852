mod achievement_celebration_handler;
mod auto_reply_notifier;

pub use achievement_celebration_handler::{AchievementCelebrationHandler, ACHIEVEMENT_TOAST};
pub use auto_reply_notifier::AutoReplyNotifier;
