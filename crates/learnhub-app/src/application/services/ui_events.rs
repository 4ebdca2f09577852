use serde::Serialize;
use specta::Type;
use tokio::sync::broadcast;

/// Capacity of the UI event channel; slow receivers skip older events
const CHANNEL_CAPACITY: usize = 64;

/// Something the front end should show right away
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Type)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    Toast {
        message: String,
        duration_ms: u64,
    },
    Celebration {
        current_streak: u32,
    },
    NotificationAdded {
        id: String,
        title: String,
    },
    MessageReceived {
        conversation_id: String,
        sender: String,
        text: String,
    },
}

/// Broadcast sender shared by services and event handlers
#[derive(Debug, Clone)]
pub struct UiEventSender {
    tx: broadcast::Sender<UiEvent>,
}

impl UiEventSender {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Events emitted with no subscriber are dropped
    pub fn emit(&self, event: UiEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }
}

impl Default for UiEventSender {
    fn default() -> Self {
        Self::new()
    }
}
