use async_trait::async_trait;
use std::any::Any;

use super::DomainEvent;
use crate::shared::DomainError;

/// Fan-out point between the services that raise engagement events and the
/// handlers that turn them into UI effects
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Hand the event to every handler subscribed to its concrete type.
    /// Events nobody listens for are dropped.
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError>;
}

/// Reaction to one concrete event type
#[async_trait]
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    async fn handle(&self, event: &E) -> Result<(), DomainError>;
}

/// Object-safe form of [`EventHandler`] so handlers of different event
/// types can share one subscription table
#[async_trait]
pub trait DynamicEventHandler: Send + Sync {
    /// Downcasts `event` and forwards it; a payload of another type is an error
    async fn handle_dynamic(&self, event: &(dyn Any + Send + Sync)) -> Result<(), DomainError>;

    /// Subscription key, matches [`DomainEvent::event_type_name`]
    fn event_type_name(&self) -> &'static str;
}

/// Adapts a typed handler for `E` into a [`DynamicEventHandler`]
pub struct TypedEventHandlerWrapper<E: DomainEvent + 'static, H: EventHandler<E>> {
    handler: H,
    _event: std::marker::PhantomData<E>,
}

impl<E: DomainEvent + 'static, H: EventHandler<E>> TypedEventHandlerWrapper<E, H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _event: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<E: DomainEvent + 'static, H: EventHandler<E>> DynamicEventHandler
    for TypedEventHandlerWrapper<E, H>
{
    async fn handle_dynamic(&self, event: &(dyn Any + Send + Sync)) -> Result<(), DomainError> {
        let Some(event) = event.downcast_ref::<E>() else {
            return Err(DomainError::Infrastructure(format!(
                "Event type mismatch, expected {}",
                std::any::type_name::<E>()
            )));
        };
        self.handler.handle(event).await
    }

    fn event_type_name(&self) -> &'static str {
        std::any::type_name::<E>()
    }
}
