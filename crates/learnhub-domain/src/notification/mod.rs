mod aggregate;
mod center;
mod seed;
mod value_objects;

pub use aggregate::Notification;
pub use center::NotificationCenter;
pub use seed::demo_notifications;
pub use value_objects::{NewNotification, NotificationAction, NotificationKind, NotificationTemplate};
