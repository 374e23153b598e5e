use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::Request;

/// Answer requests no route handled with the same `{"error","kind"}` body
/// route errors use.
#[catch(default)]
pub fn default_catcher(status: Status, request: &Request<'_>) -> (Status, Json<Value>) {
    let (status, kind) = match status.code {
        404 => (status, "not_found"),
        // Path or query segments that fail to parse
        422 => (Status::BadRequest, "validation_error"),
        400..=499 => (status, "validation_error"),
        _ => (status, "internal_error"),
    };
    tracing::debug!(uri = %request.uri(), %status, "unhandled request");

    let message = format!("{} {}", request.method(), request.uri());
    let error = match kind {
        "not_found" => format!("Not found: {message}"),
        "validation_error" => format!("Validation error: {} for {message}", status.reason_lossy()),
        _ => status.reason_lossy().to_string(),
    };

    (status, Json(json!({ "error": error, "kind": kind })))
}
