use crate::models::booking::{
    BookingDetail, BookingStatusResponse, CreateBookingRequest, CreateBookingResponse,
    RoomAvailability, StayDates,
};
use crate::services::booking_service::BookingService;
use crate::utils::error::AppError;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::{self, Json};
use rocket::State;
use rocket_okapi::openapi;

/// Create a pending booking if the room type has a free room for the stay
#[openapi(tag = "Bookings")]
#[post("/bookings", data = "<request>")]
pub async fn create_booking(
    request: Result<Json<CreateBookingRequest>, json::Error<'_>>,
    booking_service: &State<BookingService>,
) -> Result<status::Custom<Json<CreateBookingResponse>>, AppError> {
    let booking = request?.into_inner().into_new_booking()?;
    let response = booking_service.create_booking(booking).await?;
    Ok(status::Custom(Status::Created, Json(response)))
}

/// List every booking, newest first
#[openapi(tag = "Bookings")]
#[get("/bookings/all")]
pub async fn list_all_bookings(
    booking_service: &State<BookingService>,
) -> Result<Json<Vec<BookingDetail>>, AppError> {
    let bookings = booking_service.list_all_bookings().await?;
    Ok(Json(bookings))
}

/// List a user's bookings, newest first
#[openapi(tag = "Bookings")]
#[get("/bookings/<user_id>")]
pub async fn list_user_bookings(
    user_id: i32,
    booking_service: &State<BookingService>,
) -> Result<Json<Vec<BookingDetail>>, AppError> {
    let bookings = booking_service.list_user_bookings(user_id).await?;
    Ok(Json(bookings))
}

/// Confirm a pending booking, normally after payment capture
#[openapi(tag = "Bookings")]
#[put("/bookings/<booking_id>/confirm")]
pub async fn confirm_booking(
    booking_id: i32,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingStatusResponse>, AppError> {
    let response = booking_service.confirm_booking(booking_id).await?;
    Ok(Json(response))
}

/// Cancel a booking and release its room
#[openapi(tag = "Bookings")]
#[put("/bookings/<booking_id>/cancel")]
pub async fn cancel_booking(
    booking_id: i32,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingStatusResponse>, AppError> {
    let response = booking_service.cancel_booking(booking_id).await?;
    Ok(Json(response))
}

/// Remaining rooms per room type of a hotel for a stay
#[openapi(tag = "Availability")]
#[get("/availability?<hotel_id>&<check_in>&<check_out>")]
pub async fn check_availability(
    hotel_id: Option<i32>,
    check_in: Option<String>,
    check_out: Option<String>,
    booking_service: &State<BookingService>,
) -> Result<Json<Vec<RoomAvailability>>, AppError> {
    let hotel_id = hotel_id
        .ok_or_else(|| AppError::ValidationError("hotel_id is required".into()))?;
    let (check_in, check_out) = check_in.zip(check_out).ok_or_else(|| {
        AppError::ValidationError("check_in and check_out are required".into())
    })?;
    let stay = StayDates::parse(&check_in, &check_out)?;

    let rooms = booking_service.availability(hotel_id, stay).await?;
    Ok(Json(rooms))
}
