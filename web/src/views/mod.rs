pub mod bookings;
pub mod brand_dashboard;
pub mod not_found;
