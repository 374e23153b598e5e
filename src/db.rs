use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;

// Catalog tables are owned by the catalog service; they are created here only
// when missing so the booking service can run on its own.
const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS hotels (
        id INT AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        location VARCHAR(255) NOT NULL,
        description TEXT,
        amenities TEXT,
        price_per_night DECIMAL(10,2),
        total_rooms INT DEFAULT 50,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS room_types (
        id INT AUTO_INCREMENT PRIMARY KEY,
        hotel_id INT NOT NULL,
        type_name VARCHAR(100) NOT NULL,
        price DECIMAL(10,2),
        capacity INT,
        amenities TEXT,
        total_rooms INT NOT NULL DEFAULT 10,
        CONSTRAINT room_types_hotels_id_fk
            FOREIGN KEY (hotel_id) REFERENCES hotels(id)
    )",
    "CREATE TABLE IF NOT EXISTS bookings (
        id INT AUTO_INCREMENT PRIMARY KEY,
        user_id INT NOT NULL,
        hotel_id INT NOT NULL,
        room_type_id INT NOT NULL,
        check_in_date DATE NOT NULL,
        check_out_date DATE NOT NULL,
        total_amount DECIMAL(10,2) NOT NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'pending',
        guest_name VARCHAR(255) NOT NULL,
        guest_email VARCHAR(255) NOT NULL,
        guest_phone VARCHAR(20) NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        CONSTRAINT bookings_stay_order_check CHECK (check_in_date < check_out_date),
        CONSTRAINT bookings_status_check CHECK (status IN ('pending', 'confirmed', 'cancelled')),
        CONSTRAINT bookings_amount_check CHECK (total_amount >= 0),
        INDEX bookings_occupancy_index (hotel_id, room_type_id, check_in_date, check_out_date),
        INDEX bookings_user_index (user_id)
    )",
];

// Database connection manager
pub struct Database {
    pub pool: MySqlPool,
}

impl Database {
    // Create a new database connection pool
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = pool_options(config).connect(&config.url).await?;

        Ok(Database { pool })
    }

    // Create a pool that opens connections on first use
    pub fn lazy(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = pool_options(config).connect_lazy(&config.url)?;

        Ok(Database { pool })
    }

    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        init_schema(&self.pool).await
    }
}

fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
}

// The catalog service creates `room_types` without a room count.
const ROOM_COUNT_COLUMN_EXISTS: &str = r#"
    SELECT COUNT(*) FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = 'room_types' AND COLUMN_NAME = 'total_rooms'
"#;

const ADD_ROOM_COUNT_COLUMN: &str =
    "ALTER TABLE room_types ADD COLUMN total_rooms INT NOT NULL DEFAULT 10";

/// Create the hotels, room types and bookings tables if they do not exist,
/// and add the room count to a `room_types` table created by the catalog.
pub async fn init_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    for create_sql in SCHEMA {
        sqlx::query(create_sql).execute(pool).await?;
    }

    let has_room_count: i64 = sqlx::query_scalar(ROOM_COUNT_COLUMN_EXISTS)
        .fetch_one(pool)
        .await?;
    if has_room_count == 0 {
        sqlx::query(ADD_ROOM_COUNT_COLUMN).execute(pool).await?;
        tracing::info!("added total_rooms to the catalog room_types table");
    }

    Ok(())
}
