pub mod booking_service;
pub mod catalog_service;
