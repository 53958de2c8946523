//! # Error Handling Middleware
//!
//! This module maps Lessonbook's domain errors to HTTP status codes and JSON
//! error responses, so every handler reports failures the same way.
//!
//! Booking rejections are user-facing outcomes rather than failures; they are
//! returned as `422 Unprocessable Entity` with both the message and a stable
//! reason code:
//!
//! ```json
//! { "error": "This time is blocked", "code": "slot_blocked" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lessonbook_core::{errors::BookingError, rejection::Rejection};
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `BookingError` instances and implements `IntoResponse` to
/// convert them into HTTP responses with appropriate status codes and JSON
/// payloads.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use lessonbook_api::middleware::error_handling::AppError;
/// use lessonbook_core::errors::BookingError;
/// use uuid::Uuid;
///
/// async fn handler(id: Uuid) -> Result<Json<Uuid>, AppError> {
///     Err(AppError(BookingError::NotFound(format!("Lesson with ID {} not found", id))))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Authorization(_) => StatusCode::FORBIDDEN,
            BookingError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self.0 {
            // The rejection text is shown to the user as is
            BookingError::Rejected(rejection) => json!({
                "error": rejection.to_string(),
                "code": rejection.code(),
            }),
            other => {
                if status.is_server_error() {
                    error!("Request failed: {:?}", other);
                }
                json!({ "error": other.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Allows `?` on `BookingResult` values inside handlers
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Repository errors are reported as database failures
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        AppError(BookingError::Rejected(rejection))
    }
}

/// Maps a BookingError to an HTTP response
///
/// # Example
///
/// ```
/// use axum::http::StatusCode;
/// use lessonbook_api::middleware::error_handling::map_error;
/// use lessonbook_core::errors::BookingError;
///
/// let response = map_error(BookingError::Conflict("slot taken".to_string()));
/// assert_eq!(response.status(), StatusCode::CONFLICT);
/// ```
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
