use crate::config::Config;
use crate::models::health::HealthResponse;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Liveness check
#[openapi(tag = "Health")]
#[get("/health")]
pub fn health(config: &State<Config>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: config.service_name.clone(),
    })
}
