mod conversation_dto;
mod notification_dto;
mod streak_dto;

pub use conversation_dto::{ConversationDto, LastMessageDto, MessageDto, ParticipantDto};
pub use notification_dto::NotificationDto;
pub use streak_dto::{HeatmapDayDto, HeatmapDto, StreakDto};
