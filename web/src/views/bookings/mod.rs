mod add_book_out_modal;
mod add_client_modal;
mod booking_details_modal;
mod booking_requests_tab;
mod bookings_view;
mod calendar_schedule_tab;
mod client_database_tab;
mod manage_availability_modal;
mod management_analytics_view;
mod merge_clients_modal;
mod new_booking_modal;
mod notifications_tab;
mod state;
mod talent_availability_tab;

pub use bookings_view::BookingsView;
