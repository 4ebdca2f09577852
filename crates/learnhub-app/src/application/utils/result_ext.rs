use learnhub_domain::shared::DomainError;

/// Shorthand for lifting foreign errors into `DomainError::Infrastructure`
pub trait ResultExt<T> {
    /// `join_handle.await.to_infra_err()?`
    fn to_infra_err(self) -> Result<T, DomainError>;

    /// Same as [`ResultExt::to_infra_err`] with a context prefix
    fn infra_context(self, context: &str) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn to_infra_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(e.to_string()))
    }

    fn infra_context(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(format!("{}: {}", context, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_infra_err() {
        let result: Result<i32, &str> = Err("task panicked");
        match result.to_infra_err() {
            Err(DomainError::Infrastructure(msg)) => assert_eq!(msg, "task panicked"),
            _ => panic!("Expected Infrastructure error"),
        }
    }

    #[test]
    fn test_infra_context() {
        let result: Result<(), &str> = Err("permission denied");
        let err = result.infra_context("Write config").unwrap_err();
        assert_eq!(err.message(), "Write config: permission denied");
    }
}
