use rust_decimal::Decimal;

/// Catalog facts about a room type that admission depends on.
///
/// `capacity` is the number of guests a room sleeps; `total_rooms` is how many
/// rooms of the type the hotel sells, and bounds concurrent bookings.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoomTypeCapacity {
    pub id: i32,
    pub hotel_id: i32,
    pub price: Option<Decimal>,
    pub capacity: Option<i32>,
    pub total_rooms: i32,
}
