use thiserror::Error;

/// Failure taxonomy for study service calls
#[derive(Error, Debug)]
pub enum ApiError {
    /// The referenced card or entry does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The service rejected the input (e.g. empty entry content)
    #[error("invalid input: {0}")]
    Validation(String),

    /// Network or service failure; retrying the same call may succeed
    #[error("service unavailable: {0}")]
    Transient(String),

    /// Anything uncategorized
    #[error("unexpected failure: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Whether retrying the same operation makes sense. Uncategorized
    /// failures are treated like transient ones for UI purposes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transient(_) | ApiError::Unknown(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            ApiError::Transient(err.to_string())
        } else {
            ApiError::Unknown(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds() {
        assert!(ApiError::Transient("timeout".into()).is_retryable());
        assert!(ApiError::Unknown("???".into()).is_retryable());
        assert!(!ApiError::NotFound("card 9".into()).is_retryable());
        assert!(!ApiError::Validation("empty content".into()).is_retryable());
    }
}
