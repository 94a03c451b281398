use booking_types::{Booking, BookingError, CreateBookingPayload, UpdateBookingPayload, UploadedFile};

use crate::server::{booking_error, create_booking_with_files, update_booking};
use crate::utils::submission::BookingGateway;

/// Sends booking writes through the server functions with the session token.
pub struct ServerGateway {
    pub token: String,
}

impl BookingGateway for ServerGateway {
    async fn create(
        &self,
        payload: CreateBookingPayload,
        files: Vec<UploadedFile>,
    ) -> Result<Booking, BookingError> {
        create_booking_with_files(self.token.clone(), payload, files)
            .await
            .map_err(booking_error)
    }

    async fn update(&self, id: i64, patch: UpdateBookingPayload) -> Result<Booking, BookingError> {
        update_booking(self.token.clone(), id, patch)
            .await
            .map_err(booking_error)
    }
}
