use thiserror::Error;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Error as JsonError;
use rocket::Request;
use rocket::Response;
use rocket::http::ContentType;
use std::io::Cursor;
use serde_json::json;
use serde::Serialize;
use rocket_okapi::JsonSchema;

use crate::models::booking::BookingStatus;

#[derive(Error, Debug, Serialize, JsonSchema)]
pub enum AppError {
    #[error("Database error")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("No rooms available for selected dates")]
    CapacityExhausted { hotel_id: i32, room_type_id: i32 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cannot change booking status from {from} to {to}")]
    InvalidTransition { from: BookingStatus, to: BookingStatus },
}

impl AppError {
    pub fn status(&self) -> Status {
        match self {
            AppError::ValidationError(_) => Status::BadRequest,
            AppError::CapacityExhausted { .. } => Status::BadRequest,
            AppError::NotFound(_) => Status::NotFound,
            AppError::InvalidTransition { .. } => Status::Conflict,
            AppError::DatabaseError(_) => Status::InternalServerError,
        }
    }

    /// Machine-readable error kind sent next to the message.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::CapacityExhausted { .. } => "no_availability",
            AppError::NotFound(_) => "not_found",
            AppError::InvalidTransition { .. } => "invalid_transition",
            AppError::DatabaseError(_) => "storage_error",
        }
    }
}

// Convert sqlx::Error (database error) to AppError::DatabaseError
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

// Body rejected by the JSON data guard: malformed JSON or a missing/mistyped field
impl From<JsonError<'_>> for AppError {
    fn from(err: JsonError<'_>) -> Self {
        match err {
            JsonError::Io(e) => AppError::ValidationError(format!("Unreadable request body: {e}")),
            JsonError::Parse(_, e) => AppError::ValidationError(e.to_string()),
        }
    }
}

// Define a type alias for the result type
pub type AppResult<T> = Result<T, AppError>;

// Implement the Responder trait for AppError
// Format all error from route level to a Http Response at route level
#[rocket::async_trait]
impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        let status = self.status();

        match &self {
            AppError::DatabaseError(cause) => {
                tracing::error!(uri = %request.uri(), %cause, "storage failure")
            }
            AppError::CapacityExhausted { hotel_id, room_type_id } => {
                tracing::info!(hotel_id, room_type_id, "booking rejected, no availability")
            }
            other => tracing::debug!(uri = %request.uri(), error = %other, "request rejected"),
        }

        let json = json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(None, Cursor::new(json.to_string()))
            .ok()
    }
}
