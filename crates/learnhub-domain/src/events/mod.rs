use std::any::Any;

pub mod engagement_events;
pub mod event_bus;

pub use engagement_events::{AchievementUnlocked, AutoReplyDelivered};
pub use event_bus::{DynamicEventHandler, EventBus, EventHandler, TypedEventHandlerWrapper};

/// Base trait for all domain events
/// All events must be Send + Sync so handlers can run on any task
pub trait DomainEvent: Send + Sync + Any {
    /// Convert to Any for type-safe downcasting
    fn as_any(&self) -> &(dyn Any + Send + Sync);

    /// Concrete type name, used as the subscription key
    fn event_type_name(&self) -> &'static str;
}
