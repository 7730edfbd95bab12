use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata};
use serde_json::Value;
use thiserror::Error;

/// Failure reported by the identity provider or the profile store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    pub code: Option<String>,
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Convert an AWS SDK error, preferring the service's own code and message
    pub fn from_sdk<E>(err: &E) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error,
    {
        // The full error chain is only for operators
        tracing::error!("AWS SDK error: {}", DisplayErrorContext(err));

        let message = err
            .message()
            .map(|m| m.to_string())
            .unwrap_or_else(|| err.to_string());
        Self {
            code: err.code().map(|c| c.to_string()),
            message,
        }
    }

    /// Diagnostic payload attached to `Unknown` errors
    pub fn details(&self) -> Value {
        serde_json::json!({
            "code": self.code,
            "message": self.message,
        })
    }
}

/// Errors returned to the caller of the function
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallableError {
    /// Malformed callable envelope, rejected before the handler runs
    #[error("Bad Request")]
    BadRequest,
    #[error("Request must be authenticated.")]
    Unauthenticated,
    #[error("Only admins can delete users.")]
    PermissionDenied,
    #[error("UID not provided.")]
    InvalidArgument,
    #[error("{message}")]
    Unknown { message: String, details: Value },
    /// Uncaught failure; the message stays opaque to the client
    #[error("INTERNAL")]
    Internal,
}

impl CallableError {
    /// Status string of the callable wire protocol
    pub fn status(&self) -> &'static str {
        match self {
            CallableError::BadRequest | CallableError::InvalidArgument => "INVALID_ARGUMENT",
            CallableError::Unauthenticated => "UNAUTHENTICATED",
            CallableError::PermissionDenied => "PERMISSION_DENIED",
            CallableError::Unknown { .. } => "UNKNOWN",
            CallableError::Internal => "INTERNAL",
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            CallableError::Unknown { details, .. } => Some(details),
            _ => None,
        }
    }
}

impl From<BackendError> for CallableError {
    fn from(err: BackendError) -> Self {
        let details = err.details();
        CallableError::Unknown {
            message: err.message,
            details,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_cognitoidentityprovider::error::ErrorMetadata;
    use aws_sdk_cognitoidentityprovider::operation::admin_delete_user::AdminDeleteUserError;

    const NO_RECORD: &str = "There is no user record corresponding to the provided identifier.";

    #[test]
    fn test_from_sdk_keeps_service_code_and_message() {
        let sdk_err = AdminDeleteUserError::generic(
            ErrorMetadata::builder()
                .code("UserNotFoundException")
                .message("User does not exist.")
                .build(),
        );

        let err = BackendError::from_sdk(&sdk_err);

        assert_eq!(
            err,
            BackendError::new("User does not exist.").with_code("UserNotFoundException")
        );
    }

    #[test]
    fn test_from_sdk_without_message_uses_display() {
        let sdk_err = AdminDeleteUserError::generic(
            ErrorMetadata::builder().code("InternalErrorException").build(),
        );

        let err = BackendError::from_sdk(&sdk_err);

        assert_eq!(err.code.as_deref(), Some("InternalErrorException"));
        assert_eq!(err.message, sdk_err.to_string());
        assert!(!err.message.contains("ErrorMetadata"));
    }

    #[test]
    fn test_backend_error_becomes_unknown_with_details() {
        let err = BackendError::new(NO_RECORD).with_code("UserNotFoundException");

        let callable: CallableError = err.into();

        assert_eq!(callable.status(), "UNKNOWN");
        assert_eq!(callable.to_string(), NO_RECORD);
        assert_eq!(
            callable.details(),
            Some(&serde_json::json!({
                "code": "UserNotFoundException",
                "message": NO_RECORD,
            }))
        );
    }

    #[test]
    fn test_policy_errors_have_fixed_messages() {
        assert_eq!(
            CallableError::Unauthenticated.to_string(),
            "Request must be authenticated."
        );
        assert_eq!(
            CallableError::PermissionDenied.to_string(),
            "Only admins can delete users."
        );
        assert_eq!(CallableError::InvalidArgument.to_string(), "UID not provided.");
        assert_eq!(CallableError::Internal.to_string(), "INTERNAL");
        assert!(CallableError::PermissionDenied.details().is_none());
    }
}
