use leptos::prelude::*;
use leptos::server;

use booking_types::BookingNotificationRow;

#[cfg(feature = "ssr")]
use crate::db::notification_repository::{clamp_limit, list_notifications};
#[cfg(feature = "ssr")]
use crate::server::extract_agency_id;

/// Delivery log, newest first. `limit` defaults to 50 and is capped at 200.
#[server]
pub async fn list_booking_notifications(
    token: String,
    limit: Option<i64>,
) -> Result<Vec<BookingNotificationRow>, ServerFnError> {
    let agency_id =
        extract_agency_id(&token).map_err(|e| ServerFnError::new(e.to_string()))?;

    list_notifications(agency_id, clamp_limit(limit))
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to load notifications: {}", e)))
}
