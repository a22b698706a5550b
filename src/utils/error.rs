use actix_web::http::StatusCode;
use std::fmt;

pub const MALFORMED_ID_MESSAGE: &str = "Invalid user ID format";
pub const NOT_FOUND_MESSAGE: &str = "User not found";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "User with this email already exists";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Failure of a single user operation. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Validation(String),
    Conflict(String),
    MalformedId,
    NotFound,
    Unexpected(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) | AppError::MalformedId => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the caller. Storage detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::Conflict(msg) => msg.clone(),
            AppError::MalformedId => MALFORMED_ID_MESSAGE.to_string(),
            AppError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            AppError::Unexpected(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::MalformedId => write!(f, "Malformed identifier"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::Unexpected(msg) => write!(f, "Unexpected failure: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Failure reported by the document store collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique index rejected the write.
    DuplicateKey(String),
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateKey(msg) => write!(f, "Duplicate key: {}", msg),
            StoreError::Backend(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(_) => AppError::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string()),
            StoreError::Backend(msg) => AppError::Unexpected(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Conflict("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MalformedId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Unexpected("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unexpected_detail_is_hidden() {
        let err = AppError::Unexpected("connection reset by 10.0.0.7".into());
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
        assert!(err.to_string().contains("10.0.0.7"));
    }

    #[test]
    fn test_duplicate_key_becomes_conflict() {
        let err: AppError = StoreError::DuplicateKey("email_1".into()).into();
        assert_eq!(err, AppError::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string()));
    }
}
