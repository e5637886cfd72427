use thiserror::Error;
use tracing::error;

use crate::models::service_result::ServiceResult;

/// Failure taxonomy of the business layer. Nothing here escapes a service
/// call; every operation folds its error into a `ServiceResult` at the
/// boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed input; carries the message shown to the user.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The id has no matching record (or references a missing file).
    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("database error: {0}")]
    Persistence(#[from] mongodb::error::Error),
}

impl ServiceError {
    /// Message surfaced to the caller. Validation and not-found failures
    /// carry their own wording; infrastructure failures are logged and
    /// replaced by the operation's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ServiceError::Validation(message) | ServiceError::NotFound(message) => {
                message.clone()
            }
            other => {
                error!(error = %other, "service operation failed");
                fallback.to_string()
            }
        }
    }
}

/// Folds an operation result into the uniform envelope.
pub fn into_service_result<T>(
    outcome: Result<(T, String), ServiceError>,
    fallback: &str,
) -> ServiceResult<T> {
    match outcome {
        Ok((data, message)) => ServiceResult::ok(data, message),
        Err(e) => ServiceResult::fail(e.user_message(fallback)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_surfaced_verbatim() {
        let e = ServiceError::Validation("اسم الوثيقة مطلوب".to_string());
        assert_eq!(e.user_message("fallback"), "اسم الوثيقة مطلوب");
    }

    #[test]
    fn infrastructure_errors_use_the_fallback() {
        let e = ServiceError::Storage(std::io::Error::other("disk on fire"));
        assert_eq!(e.user_message("حدث خطأ"), "حدث خطأ");
    }
}
