pub mod booking_repository;
pub mod brand_repository;
pub mod client_repository;
pub mod notification_repository;
pub mod pool;
