pub mod booking;
pub mod health;
pub mod room_type;
