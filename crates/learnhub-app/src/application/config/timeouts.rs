use std::time::Duration;

/// Centralized delay configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Delay before the scripted reply lands (default: 2 seconds)
    pub auto_reply: Duration,

    /// Delay before the achievement celebration fires (default: 1.5 seconds)
    pub celebration: Duration,

    /// How long a toast stays on screen (default: 3.5 seconds)
    pub toast: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            auto_reply: Duration::from_secs(2),
            celebration: Duration::from_millis(1500),
            toast: Duration::from_millis(3500),
        }
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set auto-reply delay
    pub fn with_auto_reply(mut self, duration: Duration) -> Self {
        self.auto_reply = duration;
        self
    }

    /// Builder pattern: set celebration delay
    pub fn with_celebration(mut self, duration: Duration) -> Self {
        self.celebration = duration;
        self
    }

    /// Builder pattern: set toast duration
    pub fn with_toast(mut self, duration: Duration) -> Self {
        self.toast = duration;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TimeoutConfig::default();
        assert_eq!(config.auto_reply, Duration::from_secs(2));
        assert_eq!(config.celebration, Duration::from_millis(1500));
        assert_eq!(config.toast, Duration::from_millis(3500));
    }

    #[test]
    fn test_builder_pattern() {
        let config = TimeoutConfig::new()
            .with_auto_reply(Duration::from_millis(10))
            .with_celebration(Duration::ZERO);

        assert_eq!(config.auto_reply, Duration::from_millis(10));
        assert_eq!(config.celebration, Duration::ZERO);
        assert_eq!(config.toast, Duration::from_millis(3500));
    }
}
