#[macro_use]
extern crate rocket;

pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;
pub mod swagger;
pub mod utils;

use rocket::{Build, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::make_swagger_ui;

use crate::config::Config;
use crate::db::Database;
use crate::services::booking_service::BookingService;
use crate::swagger::swagger_ui;

/// Assemble the booking service on top of an already configured database.
///
/// Nothing here touches the database, so a lazily connected pool is enough
/// to exercise the request validation paths.
pub fn build_rocket(config: &Config, database: Database) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", config.server.address.clone()))
        .merge(("port", config.server.port));

    let booking_service = BookingService::new(database.pool);

    rocket::custom(figment)
        .manage(config.clone())
        .manage(booking_service)
        .mount(
            "/",
            openapi_get_routes![
                routes::health_route::health,
                routes::booking_route::create_booking,
                routes::booking_route::list_all_bookings,
                routes::booking_route::list_user_bookings,
                routes::booking_route::confirm_booking,
                routes::booking_route::cancel_booking,
                routes::booking_route::check_availability,
            ],
        )
        .mount("/swagger", make_swagger_ui(&swagger_ui()))
        .register("/", catchers![routes::catchers::default_catcher])
}
