use crate::utils::error::AppError;
use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

/// Uniform response envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub status: u16,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            data: Some(data),
            count: None,
            status: status.as_u16(),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn into_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}

impl ApiResponse<()> {
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            data: None,
            count: None,
            status: status.as_u16(),
        }
    }

    pub fn failure(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            data: None,
            count: None,
            status: status.as_u16(),
        }
    }
}

impl From<&AppError> for ApiResponse<()> {
    fn from(err: &AppError) -> Self {
        ApiResponse::failure(err.status_code(), err.public_message())
    }
}

/// Logs the error at a level matching its severity and renders the envelope.
pub fn error_response(context: &str, err: &AppError) -> HttpResponse {
    match err {
        AppError::Unexpected(detail) => log::error!("❌ {} failed: {}", context, detail),
        AppError::NotFound | AppError::MalformedId => log::info!("ℹ️  {}: {}", context, err),
        _ => log::warn!("⚠️  {}: {}", context, err),
    }
    ApiResponse::<()>::from(err).into_response()
}
