use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use validator::{Validate, ValidationError};

use crate::utils::error::{AppError, AppResult};

/// Lifecycle state of a [`Booking`].
///
/// Bookings start `pending`; `confirmed` and `cancelled` are reached through
/// explicit actions. Nothing leaves `cancelled`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Outcome of moving a booking towards a target status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The stored status has to change.
    Applied,
    /// The booking already has the target status.
    Unchanged,
}

impl BookingStatus {
    pub fn transition_to(self, target: BookingStatus) -> AppResult<Transition> {
        use BookingStatus::*;

        match (self, target) {
            (from, to) if from == to => Ok(Transition::Unchanged),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) => {
                Ok(Transition::Applied)
            }
            (from, to) => Err(AppError::InvalidTransition { from, to }),
        }
    }
}

impl TryFrom<String> for BookingStatus {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Half-open `[check_in, check_out)` stay, always at least one night long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> AppResult<Self> {
        if check_in >= check_out {
            return Err(AppError::ValidationError(format!(
                "check-in date {check_in} must be before check-out date {check_out}"
            )));
        }
        Ok(StayDates { check_in, check_out })
    }

    /// Parse a pair of ISO calendar dates (`YYYY-MM-DD`).
    pub fn parse(check_in: &str, check_out: &str) -> AppResult<Self> {
        let check_in = parse_date(check_in, "check-in")?;
        let check_out = parse_date(check_out, "check-out")?;
        StayDates::new(check_in, check_out)
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Two stays share a night iff each one starts before the other ends.
    /// A check-out and a check-in on the same day do not overlap.
    pub fn overlaps(&self, other: &StayDates) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::ValidationError(format!("Invalid {field} date format: {value}")))
}

#[derive(Debug, Clone, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub hotel_id: i32,
    pub room_type_id: i32,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_amount: Decimal,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub created_at: DateTime<Utc>,
}

// Booking joined with the hotel it belongs to
#[derive(Debug, Clone, Serialize, JsonSchema, sqlx::FromRow)]
pub struct BookingDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub hotel_name: String,
    pub location: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct CreateBookingRequest {
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[validate(range(min = 1))]
    pub hotel_id: i32,
    #[validate(range(min = 1))]
    pub room_type_id: i32,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[validate(custom(function = "validate_amount"))]
    pub total_amount: Decimal,
    #[validate(length(min = 1, max = 255))]
    pub guest_name: String,
    #[validate(email, length(max = 255))]
    pub guest_email: String,
    #[validate(length(min = 1, max = 20))]
    pub guest_phone: String,
}

// The amount column is DECIMAL(10,2)
const AMOUNT_LIMIT: i64 = 100_000_000;
const AMOUNT_SCALE: u32 = 2;

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::new("negative_amount"));
    }
    if *amount >= Decimal::from(AMOUNT_LIMIT) {
        return Err(ValidationError::new("amount_too_large"));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(ValidationError::new("amount_precision"));
    }
    Ok(())
}

impl CreateBookingRequest {
    /// Check every field up front and produce the admission input.
    pub fn into_new_booking(self) -> AppResult<NewBooking> {
        self.validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        let stay = StayDates::new(self.check_in_date, self.check_out_date)?;

        Ok(NewBooking {
            user_id: self.user_id,
            hotel_id: self.hotel_id,
            room_type_id: self.room_type_id,
            stay,
            total_amount: self.total_amount,
            guest_name: self.guest_name,
            guest_email: self.guest_email,
            guest_phone: self.guest_phone,
        })
    }
}

/// A validated booking request, ready for admission.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i32,
    pub hotel_id: i32,
    pub room_type_id: i32,
    pub stay: StayDates,
    pub total_amount: Decimal,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[schemars(example = "CreateBookingResponse::example")]
pub struct CreateBookingResponse {
    pub message: String,
    pub booking_id: i32,
    pub status: BookingStatus,
}

impl CreateBookingResponse {
    pub fn example() -> Self {
        Self {
            message: "Booking created successfully".to_string(),
            booking_id: 42,
            status: BookingStatus::Pending,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingStatusResponse {
    pub message: String,
    pub booking_id: i32,
    pub status: BookingStatus,
}

// Remaining rooms of one room type over a requested stay
#[derive(Debug, Clone, Serialize, JsonSchema, sqlx::FromRow)]
pub struct RoomAvailability {
    pub id: i32,
    pub hotel_id: i32,
    pub type_name: String,
    pub price: Option<Decimal>,
    pub capacity: Option<i32>,
    pub amenities: Option<String>,
    pub total_rooms: i32,
    pub available_rooms: i64,
}
