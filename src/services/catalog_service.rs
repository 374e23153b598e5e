use crate::models::room_type::RoomTypeCapacity;
use crate::utils::error::AppResult;
use sqlx::MySqlConnection;

// Catalog tables are shared with the hotel service and only read here
const ROOM_TYPE_QUERY: &str = r#"
    SELECT id, hotel_id, price, capacity, total_rooms
    FROM room_types
    WHERE id = ? AND hotel_id = ?
    FOR UPDATE
"#;

/// Read the room type and hold its row lock until the surrounding
/// transaction ends. Every admission for the room type takes this lock
/// first, so admissions for it run one at a time.
pub async fn lock_room_type(
    conn: &mut MySqlConnection,
    hotel_id: i32,
    room_type_id: i32,
) -> AppResult<Option<RoomTypeCapacity>> {
    let room_type = sqlx::query_as::<_, RoomTypeCapacity>(ROOM_TYPE_QUERY)
        .bind(room_type_id)
        .bind(hotel_id)
        .fetch_optional(conn)
        .await?;

    Ok(room_type)
}
