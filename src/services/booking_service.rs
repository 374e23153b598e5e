use crate::models::booking::{
    Booking, BookingDetail, BookingStatus, BookingStatusResponse, CreateBookingResponse,
    NewBooking, RoomAvailability, StayDates, Transition,
};
use crate::models::room_type::RoomTypeCapacity;
use crate::services::catalog_service;
use crate::utils::error::{AppError, AppResult};
use sqlx::{MySqlConnection, MySqlPool};
use tracing::{debug, info, instrument};

// Bookings aliased `b` that hold a room during a requested stay. Binds the
// requested check-out, then the requested check-in. This is the SQL form of
// `StayDates::overlaps` and is shared by admission and availability.
macro_rules! occupying_bookings {
    () => {
        "b.status <> 'cancelled' AND b.check_in_date < ? AND b.check_out_date > ?"
    };
}

const COUNT_OCCUPYING: &str = concat!(
    "SELECT COUNT(*) FROM bookings b WHERE b.hotel_id = ? AND b.room_type_id = ? AND ",
    occupying_bookings!()
);

const AVAILABILITY_QUERY: &str = concat!(
    r#"
    SELECT
        rt.id,
        rt.hotel_id,
        rt.type_name,
        rt.price,
        rt.capacity,
        rt.amenities,
        rt.total_rooms,
        CAST(rt.total_rooms - COALESCE(booked.occupied, 0) AS SIGNED) AS available_rooms
    FROM room_types rt
    LEFT JOIN (
        SELECT b.room_type_id, COUNT(*) AS occupied
        FROM bookings b
        WHERE b.hotel_id = ? AND "#,
    occupying_bookings!(),
    r#"
        GROUP BY b.room_type_id
    ) booked ON rt.id = booked.room_type_id
    WHERE rt.hotel_id = ?
    AND rt.total_rooms - COALESCE(booked.occupied, 0) > 0
    ORDER BY rt.id
    "#
);

const INSERT_BOOKING: &str = r#"
    INSERT INTO bookings (user_id, hotel_id, room_type_id, check_in_date, check_out_date,
                          total_amount, status, guest_name, guest_email, guest_phone)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

const BOOKING_COLUMNS: &str = r#"
    b.id, b.user_id, b.hotel_id, b.room_type_id, b.check_in_date, b.check_out_date,
    b.total_amount, b.status, b.guest_name, b.guest_email, b.guest_phone, b.created_at
"#;

/// Reject admission once the overlapping bookings fill every room.
pub fn check_capacity(room_type: &RoomTypeCapacity, occupied: i64) -> AppResult<()> {
    if occupied >= i64::from(room_type.total_rooms) {
        return Err(AppError::CapacityExhausted {
            hotel_id: room_type.hotel_id,
            room_type_id: room_type.id,
        });
    }
    Ok(())
}

#[derive(Clone)]
pub struct BookingService {
    pool: MySqlPool,
}

impl BookingService {
    pub fn new(pool: MySqlPool) -> Self {
        BookingService { pool }
    }

    /// Admit a booking if its room type has a free room for the whole stay.
    ///
    /// The capacity lookup, overlap count and insert share one transaction
    /// that holds the room type's row lock, so concurrent requests cannot
    /// both take the last room.
    #[instrument(
        skip(self, request),
        fields(hotel_id = request.hotel_id, room_type_id = request.room_type_id)
    )]
    pub async fn create_booking(&self, request: NewBooking) -> AppResult<CreateBookingResponse> {
        let mut tx = self.pool.begin().await?;

        let room_type =
            catalog_service::lock_room_type(&mut tx, request.hotel_id, request.room_type_id)
                .await?
                .ok_or_else(|| {
                    AppError::ValidationError(format!(
                        "Room type {} does not exist for hotel {}",
                        request.room_type_id, request.hotel_id
                    ))
                })?;

        // An error drops the transaction uncommitted, so nothing is persisted.
        let booking_id = Self::admit(&mut tx, &request, &room_type).await?;

        tx.commit().await?;

        info!(booking_id, nights = request.stay.nights(), "booking admitted");

        Ok(CreateBookingResponse {
            message: "Booking created successfully".to_string(),
            booking_id,
            status: BookingStatus::Pending,
        })
    }

    // Runs with the room type row locked; the count is the first plain read in
    // the transaction, so it sees every admission committed before the lock.
    async fn admit(
        conn: &mut MySqlConnection,
        request: &NewBooking,
        room_type: &RoomTypeCapacity,
    ) -> AppResult<i32> {
        let occupied: i64 = sqlx::query_scalar(COUNT_OCCUPYING)
            .bind(request.hotel_id)
            .bind(request.room_type_id)
            .bind(request.stay.check_out())
            .bind(request.stay.check_in())
            .fetch_one(&mut *conn)
            .await?;

        debug!(occupied, total_rooms = room_type.total_rooms, "occupancy checked");
        check_capacity(room_type, occupied)?;

        let result = sqlx::query(INSERT_BOOKING)
            .bind(request.user_id)
            .bind(request.hotel_id)
            .bind(request.room_type_id)
            .bind(request.stay.check_in())
            .bind(request.stay.check_out())
            .bind(request.total_amount)
            .bind(BookingStatus::Pending.as_ref())
            .bind(&request.guest_name)
            .bind(&request.guest_email)
            .bind(&request.guest_phone)
            .execute(&mut *conn)
            .await?;

        i32::try_from(result.last_insert_id())
            .map_err(|e| AppError::DatabaseError(format!("booking id out of range: {e}")))
    }

    pub async fn confirm_booking(&self, booking_id: i32) -> AppResult<BookingStatusResponse> {
        self.transition(booking_id, BookingStatus::Confirmed).await?;

        Ok(BookingStatusResponse {
            message: "Booking confirmed successfully".to_string(),
            booking_id,
            status: BookingStatus::Confirmed,
        })
    }

    pub async fn cancel_booking(&self, booking_id: i32) -> AppResult<BookingStatusResponse> {
        self.transition(booking_id, BookingStatus::Cancelled).await?;

        Ok(BookingStatusResponse {
            message: "Booking cancelled successfully".to_string(),
            booking_id,
            status: BookingStatus::Cancelled,
        })
    }

    #[instrument(skip(self))]
    async fn transition(&self, booking_id: i32, target: BookingStatus) -> AppResult<Transition> {
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings b WHERE b.id = ? FOR UPDATE"
        ))
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {booking_id} not found")))?;

        let transition = booking.status.transition_to(target)?;
        match transition {
            Transition::Applied => {
                sqlx::query("UPDATE bookings SET status = ? WHERE id = ?")
                    .bind(target.as_ref())
                    .bind(booking_id)
                    .execute(&mut *tx)
                    .await?;
                tx.commit().await?;
                info!(from = %booking.status, to = %target, "booking status changed");
            }
            Transition::Unchanged => {
                tx.commit().await?;
                debug!(status = %target, "booking status already set");
            }
        }

        Ok(transition)
    }

    pub async fn find_booking(&self, booking_id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings b WHERE b.id = ?"
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {booking_id} not found")))
    }

    // List a user's bookings with their hotel, newest first
    pub async fn list_user_bookings(&self, user_id: i32) -> AppResult<Vec<BookingDetail>> {
        let bookings = sqlx::query_as::<_, BookingDetail>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}, h.name AS hotel_name, h.location
            FROM bookings b
            JOIN hotels h ON b.hotel_id = h.id
            WHERE b.user_id = ?
            ORDER BY b.created_at DESC, b.id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn list_all_bookings(&self) -> AppResult<Vec<BookingDetail>> {
        let bookings = sqlx::query_as::<_, BookingDetail>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}, h.name AS hotel_name, h.location
            FROM bookings b
            JOIN hotels h ON b.hotel_id = h.id
            ORDER BY b.created_at DESC, b.id DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Room types of a hotel that still have a free room for the whole stay.
    pub async fn availability(
        &self,
        hotel_id: i32,
        stay: StayDates,
    ) -> AppResult<Vec<RoomAvailability>> {
        let rooms = sqlx::query_as::<_, RoomAvailability>(AVAILABILITY_QUERY)
            .bind(hotel_id)
            .bind(stay.check_out())
            .bind(stay.check_in())
            .bind(hotel_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rooms)
    }
}
