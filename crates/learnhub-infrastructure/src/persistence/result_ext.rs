use learnhub_domain::shared::DomainError;

/// Extension trait for storage results
pub trait ResultExt<T> {
    /// Convert any error to `DomainError::Repository` with context
    /// Usage: `query.await.map_repo_error("Failed to load value")?`
    fn map_repo_error(self, context: &str) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn map_repo_error(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Repository(format!("{}: {}", context, e)))
    }
}

/// Maps backend-specific errors onto the domain error model
pub struct RepositoryErrorMapper;

impl RepositoryErrorMapper {
    pub fn map_sqlx_error(e: sqlx::Error, operation: &str) -> DomainError {
        match e {
            sqlx::Error::RowNotFound => {
                DomainError::Repository(format!("{}: row not found", operation))
            }
            sqlx::Error::PoolTimedOut => {
                DomainError::Infrastructure(format!("{}: database pool timed out", operation))
            }
            other => DomainError::Repository(format!("{}: {}", operation, other)),
        }
    }

    pub fn map_json_error(e: serde_json::Error, operation: &str) -> DomainError {
        if e.is_syntax() || e.is_data() || e.is_eof() {
            DomainError::Deserialization(format!("{}: {}", operation, e))
        } else {
            DomainError::Serialization(format!("{}: {}", operation, e))
        }
    }

    pub fn map_write_error(e: std::io::Error, operation: &str) -> DomainError {
        DomainError::StorageWrite(format!("{}: {}", operation, e))
    }
}
