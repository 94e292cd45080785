use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::data::models::{ApiError, LoginError, RegisterError};
use crate::features::generation::{GenerationError, PdfError};
use crate::features::quiz::QuizError;

fn json_error(status: StatusCode, message: String) -> Response {
    let body = json!({
        "error": message,
        "status": status.as_u16()
    });

    (status, axum::Json(body)).into_response()
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            LoginError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            LoginError::DatabaseError(e) => {
                log::error!("Database error during login: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            LoginError::HashingError(e) => {
                log::error!("Password verification failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Hashing error".to_string())
            }
            LoginError::SessionError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Session error: {}", e),
            ),
        };

        json_error(status, message)
    }
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            RegisterError::EmailTaken => (StatusCode::CONFLICT, self.to_string()),
            RegisterError::ValidationError(e) => (StatusCode::BAD_REQUEST, e),
            RegisterError::DatabaseError(e) => {
                log::error!("Database error during registration: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            RegisterError::HashingError(e) => {
                log::error!("Password hashing failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Hashing error".to_string())
            }
            RegisterError::SessionError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Session error: {}", e),
            ),
        };

        json_error(status, message)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::GenerationDisabled => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::DatabaseError(_)
            | ApiError::PoolError(_)
            | ApiError::SessionError(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Quiz(QuizError::SessionFinished) => StatusCode::CONFLICT,
            ApiError::Quiz(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(GenerationError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Generation(GenerationError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Generation(_) => StatusCode::BAD_GATEWAY,
            ApiError::Pdf(PdfError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Pdf(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            ApiError::DatabaseError(e) => {
                log::error!("Database error: {}", e);
                self.to_string()
            }
            ApiError::PoolError(e) => {
                log::error!("Failed to get DB connection: {}", e);
                self.to_string()
            }
            ApiError::SessionError(e) => {
                log::error!("Session error: {}", e);
                "Session error".to_string()
            }
            ApiError::Internal(e) => {
                log::error!("Internal error: {}", e);
                "Internal server error".to_string()
            }
            ApiError::Generation(e) => {
                log::error!("Card generation failed: {}", e);
                match e {
                    GenerationError::NoJson
                    | GenerationError::UnexpectedShape
                    | GenerationError::NoCards => e.to_string(),
                    _ => "Falha ao conectar com a IA. Tente novamente.".to_string(),
                }
            }
            _ => self.to_string(),
        };

        json_error(status, message)
    }
}
