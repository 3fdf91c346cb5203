//! Error types for the visit counter handler

use lambda_runtime::Diagnostic;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can fail an invocation
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

impl HandlerError {
    /// Error type name reported to the Lambda platform
    pub fn error_type(&self) -> &'static str {
        match self {
            HandlerError::MissingField(_) => "MissingFieldError",
            HandlerError::StoreUnavailable(_) => "StoreUnavailableError",
        }
    }
}

impl From<HandlerError> for Diagnostic {
    fn from(err: HandlerError) -> Self {
        Diagnostic {
            error_type: err.error_type().to_string(),
            error_message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_diagnostic() {
        let diagnostic: Diagnostic = HandlerError::MissingField("user").into();
        assert_eq!(diagnostic.error_type, "MissingFieldError");
        assert_eq!(diagnostic.error_message, "Missing required field: user");
    }

    #[test]
    fn test_store_error_diagnostic() {
        let err: HandlerError = StoreError::ReadFailed("throttled".into()).into();
        let diagnostic: Diagnostic = err.into();
        assert_eq!(diagnostic.error_type, "StoreUnavailableError");
        assert_eq!(diagnostic.error_message, "Read failed: throttled");
    }

    #[test]
    fn test_store_message_not_repeated() {
        let err: HandlerError = StoreError::Unavailable("memory store: Actor channel closed".into()).into();
        assert_eq!(err.to_string(), "Store unavailable: memory store: Actor channel closed");
    }
}
