use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use desk_application::AppError;

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    BadRequest(String),
    NotFound(String),
    InvalidReference,
    Conflict {
        ticket_id: String,
        checked_in_by: String,
        checked_in_at: DateTime<Utc>,
    },
    Internal(String),
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::Unauthorized => HttpError::Unauthorized,
            AppError::BadRequest(msg) => HttpError::BadRequest(msg),
            AppError::NotFound(id) => HttpError::NotFound(id),
            AppError::InvalidReference(_) => HttpError::InvalidReference,
            AppError::DuplicateCheckIn(existing) => HttpError::Conflict {
                ticket_id: existing.ticket_id,
                checked_in_by: existing.checked_in_by,
                checked_in_at: existing.checked_in_at,
            },
            AppError::Internal(err) => HttpError::Internal(format!("{:#}", err)),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    checked_in_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checked_in_at: Option<DateTime<Utc>>,
}

impl ErrorBody {
    fn message(error: String) -> Self {
        Self {
            error,
            checked_in_by: None,
            checked_in_at: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            HttpError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::message("unauthorized".to_string()),
            ),
            HttpError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::message(format!("bad request: {}", msg)),
            ),
            HttpError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorBody::message(format!("no such ticket: {}", id)),
            ),
            HttpError::InvalidReference => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody::message("not a valid ticket reference".to_string()),
            ),
            HttpError::Conflict {
                ticket_id,
                checked_in_by,
                checked_in_at,
            } => (
                StatusCode::CONFLICT,
                ErrorBody {
                    error: format!("ticket {} already checked in", ticket_id),
                    checked_in_by: Some(checked_in_by),
                    checked_in_at: Some(checked_in_at),
                },
            ),
            HttpError::Internal(msg) => {
                error!("request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("internal server error".to_string()),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
