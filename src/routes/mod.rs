pub mod booking_route;
pub mod catchers;
pub mod health_route;
