use crate::models::booking::BookingStatus;
use crate::utils::error::AppError;
use rocket_okapi::okapi::openapi3::{Response, Responses, MediaType};
use rocket_okapi::response::OpenApiResponderInner;
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::RefOr;
use rocket_okapi::okapi::Map;
use okapi::openapi3::SchemaObject;
use serde_json::json;
use rocket::http::Status;

impl OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let mut responses = Responses::default();

        // One documented example per status; 400 covers both validation and no availability
        let error_responses = [
            (Status::BadRequest, "Validation error or no availability", AppError::CapacityExhausted { hotel_id: 1, room_type_id: 1 }),
            (Status::NotFound, "NotFound", AppError::NotFound("Booking 1 not found".to_string())),
            (Status::Conflict, "Conflict", AppError::InvalidTransition { from: BookingStatus::Cancelled, to: BookingStatus::Confirmed }),
            (Status::InternalServerError, "InternalServerError", AppError::DatabaseError("Internal ServerError".to_string())),
        ];

        for (status, description, error) in error_responses {
            responses.responses.insert(
                status.code.to_string(),
                RefOr::Object(Response {
                    description: description.to_string(),
                    content: {
                        let mut content = Map::new();
                        content.insert(
                            "application/json".to_string(),
                            MediaType {
                                schema: Some(SchemaObject::default()),
                                example: Some(json!({
                                    "error": error.to_string(),
                                    "kind": error.kind(),
                                })),
                                ..Default::default()
                            },
                        );
                        content
                    },
                    ..Default::default()
                }),
            );
        }

        Ok(responses)
    }
}
