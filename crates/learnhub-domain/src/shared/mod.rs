use serde::{Deserialize, Serialize};
use specta::Type;
use uuid::Uuid;

pub mod clock;
pub mod storage;
pub use clock::Clock;
pub use storage::KeyValueStore;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(NotificationId);
define_id!(ConversationId);
define_id!(MessageId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
pub enum ErrorCode {
    // Resource Not Found (2xxx)
    NotificationNotFound = 2001,
    ConversationNotFound = 2002,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    StorageWriteFailed = 4002,
    SerializationError = 4004,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,

    // Validation (6xxx)
    ValidationError = 6001,
    InvalidInput = 6002,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::NotificationNotFound
            | ErrorCode::ConversationNotFound
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput => ErrorSeverity::Info,

            ErrorCode::RepositoryError
            | ErrorCode::StorageWriteFailed
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,

            ErrorCode::SerializationError => ErrorSeverity::Warning,
        }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErrorCode::StorageWriteFailed)
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Notification not found: {0}")]
    NotificationNotFound(String),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::NotificationNotFound(_) => ErrorCode::NotificationNotFound,
            DomainError::ConversationNotFound(_) => ErrorCode::ConversationNotFound,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::StorageWrite(_) => ErrorCode::StorageWriteFailed,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
            DomainError::Serialization(_) | DomainError::Deserialization(_) => {
                ErrorCode::SerializationError
            }
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::NotificationNotFound(msg)
            | DomainError::ConversationNotFound(msg)
            | DomainError::Repository(msg)
            | DomainError::StorageWrite(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Validation(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::Serialization(msg)
            | DomainError::Deserialization(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(NotificationId::new(), NotificationId::new());
        assert_eq!(
            ConversationId::from_string("conv-1").as_str(),
            "conv-1"
        );
    }

    #[test]
    fn test_error_code_mapping() {
        let err = DomainError::ConversationNotFound("c1".to_string());
        assert_eq!(err.code(), ErrorCode::ConversationNotFound);
        assert_eq!(err.severity(), ErrorSeverity::Info);
        assert!(!err.is_recoverable());
        assert_eq!(err.format_with_code(), "[2002] Conversation not found: c1");
    }

    #[test]
    fn test_storage_write_is_recoverable() {
        let err = DomainError::StorageWrite("disk full".to_string());
        assert!(err.is_recoverable());
        assert_eq!(err.message(), "disk full");
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_every_error_maps_to_a_code() {
        let cases = [
            (DomainError::NotificationNotFound("n".into()), 2001, ErrorSeverity::Info, false),
            (DomainError::ConversationNotFound("c".into()), 2002, ErrorSeverity::Info, false),
            (DomainError::Repository("r".into()), 4001, ErrorSeverity::Error, false),
            (DomainError::StorageWrite("w".into()), 4002, ErrorSeverity::Error, true),
            (DomainError::Serialization("s".into()), 4004, ErrorSeverity::Warning, false),
            (DomainError::Deserialization("d".into()), 4004, ErrorSeverity::Warning, false),
            (DomainError::Infrastructure("i".into()), 5001, ErrorSeverity::Error, false),
            (DomainError::Validation("v".into()), 6001, ErrorSeverity::Info, false),
            (DomainError::InvalidInput("x".into()), 6002, ErrorSeverity::Info, false),
        ];

        for (err, code, severity, recoverable) in cases {
            assert_eq!(err.code().code(), code, "{}", err);
            assert_eq!(err.severity(), severity, "{}", err);
            assert_eq!(err.is_recoverable(), recoverable, "{}", err);
        }
    }
}
