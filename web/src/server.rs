use leptos::prelude::*;
use leptos::server;
use leptos::server_fn::codec::Json;

use booking_types::{
    BookOut, Booking, BookingError, CreateBookingPayload, NewBookOut, Talent,
    UpdateBookingPayload, UploadedFile,
};
use chrono::NaiveDate;

#[cfg(feature = "ssr")]
use crate::db::booking_repository;

/// Session of the caller as carried by the bearer token.
#[cfg(feature = "ssr")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub(crate) struct Claims {
    pub sub: String,
    pub exp: usize,
    pub user_type: String,
    pub user_id: i64,
}

#[cfg(feature = "ssr")]
pub(crate) fn decode_account_id(
    token: &str,
    secret: &str,
    expected_type: &str,
) -> Result<i64, BookingError> {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    if token.trim().is_empty() {
        return Err(BookingError::Unauthorized("missing token".to_string()));
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| BookingError::Unauthorized(format!("Invalid token: {}", e)))?;

    if token_data.claims.user_type != expected_type {
        return Err(BookingError::Unauthorized(format!(
            "expected a {} session",
            expected_type
        )));
    }
    Ok(token_data.claims.user_id)
}

#[cfg(feature = "ssr")]
pub(crate) fn extract_agency_id(token: &str) -> Result<i64, BookingError> {
    decode_account_id(token, &crate::config::config().jwt_secret, "agency")
}

#[cfg(feature = "ssr")]
pub(crate) fn storage_error(e: impl std::fmt::Display) -> BookingError {
    tracing::error!(error = %e, "storage failure");
    BookingError::Unknown(format!("Database error: {}", e))
}

#[cfg(feature = "ssr")]
fn plain_error(e: BookingError) -> ServerFnError {
    ServerFnError::new(e.to_string())
}

#[cfg(feature = "ssr")]
async fn ensure_available(agency_id: i64, talent_id: i64, date: NaiveDate) -> Result<(), BookingError> {
    let booked_out = booking_repository::talent_booked_out(agency_id, talent_id, date)
        .await
        .map_err(storage_error)?;
    if booked_out {
        tracing::warn!(agency_id, talent_id, %date, "booking rejected: talent booked out");
        return Err(BookingError::Conflict(
            "Talent is unavailable during the selected date".to_string(),
        ));
    }
    Ok(())
}

#[cfg(feature = "ssr")]
async fn ensure_talent(agency_id: i64, talent_id: i64) -> Result<(), BookingError> {
    let exists = booking_repository::talent_exists(agency_id, talent_id)
        .await
        .map_err(storage_error)?;
    if !exists {
        return Err(BookingError::validation("talent not found"));
    }
    Ok(())
}

/// Rejects attachments above the per-file limit before anything is stored.
#[cfg(feature = "ssr")]
pub(crate) fn check_upload_sizes(files: &[UploadedFile], max_bytes: usize) -> Result<(), BookingError> {
    match files.iter().find(|f| f.bytes.len() > max_bytes) {
        Some(file) => Err(BookingError::validation(format!(
            "{} is larger than the {} byte upload limit",
            file.file_name, max_bytes
        ))),
        None => Ok(()),
    }
}

#[cfg(feature = "ssr")]
async fn create_booking_inner(
    token: &str,
    payload: CreateBookingPayload,
    files: Vec<UploadedFile>,
) -> Result<Booking, BookingError> {
    let agency_id = extract_agency_id(token)?;
    let config = crate::config::config();

    let payload = payload.normalized();
    payload.validate()?;
    check_upload_sizes(&files, config.max_upload_bytes)?;
    ensure_talent(agency_id, payload.talent_id).await?;
    ensure_available(agency_id, payload.talent_id, payload.date).await?;

    let uploaded_at = chrono::Utc::now().timestamp_millis();
    let booking = booking_repository::insert_booking_with_files(
        agency_id,
        &payload,
        &files,
        &config.upload_dir,
        uploaded_at,
    )
    .await
    .map_err(storage_error)?;

    tracing::info!(
        agency_id,
        booking_id = booking.id,
        talent_id = booking.talent_id,
        files = booking.files.len(),
        "booking created"
    );
    Ok(booking)
}

#[cfg(feature = "ssr")]
async fn update_booking_inner(
    token: &str,
    booking_id: i64,
    patch: UpdateBookingPayload,
) -> Result<Booking, BookingError> {
    let agency_id = extract_agency_id(token)?;

    let mut booking = booking_repository::get_booking(agency_id, booking_id)
        .await
        .map_err(storage_error)?
        .ok_or(BookingError::NotFound)?;

    patch.apply(&mut booking)?;
    if let Some(talent_id) = patch.talent_id {
        ensure_talent(agency_id, talent_id).await?;
    }
    if patch.reschedules() {
        ensure_available(agency_id, booking.talent_id, booking.date).await?;
    }

    let saved = booking_repository::save_booking(agency_id, &booking)
        .await
        .map_err(storage_error)?
        .ok_or(BookingError::NotFound)?;

    tracing::info!(agency_id, booking_id, "booking updated");
    Ok(saved)
}

#[cfg(feature = "ssr")]
async fn set_status_inner(
    token: &str,
    booking_id: i64,
    status: booking_types::BookingStatus,
) -> Result<Booking, BookingError> {
    let agency_id = extract_agency_id(token)?;
    let booking = booking_repository::set_status(agency_id, booking_id, status)
        .await
        .map_err(storage_error)?
        .ok_or(BookingError::NotFound)?;
    tracing::info!(agency_id, booking_id, status = status.as_str(), "booking status changed");
    Ok(booking)
}

#[server]
pub async fn list_bookings(
    token: String,
    date_start: Option<NaiveDate>,
    date_end: Option<NaiveDate>,
) -> Result<Vec<Booking>, ServerFnError> {
    let agency_id = extract_agency_id(&token).map_err(plain_error)?;

    booking_repository::list_bookings(agency_id, date_start, date_end)
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to load bookings: {}", e)))
}

/// Creates one booking for one talent and stores its attachments.
#[server(input = Json)]
pub async fn create_booking_with_files(
    token: String,
    payload: CreateBookingPayload,
    files: Vec<UploadedFile>,
) -> Result<Booking, ServerFnError<BookingError>> {
    create_booking_inner(&token, payload, files)
        .await
        .map_err(ServerFnError::WrappedServerError)
}

#[server(input = Json)]
pub async fn update_booking(
    token: String,
    booking_id: i64,
    patch: UpdateBookingPayload,
) -> Result<Booking, ServerFnError<BookingError>> {
    update_booking_inner(&token, booking_id, patch)
        .await
        .map_err(ServerFnError::WrappedServerError)
}

#[server]
pub async fn cancel_booking(
    token: String,
    booking_id: i64,
) -> Result<Booking, ServerFnError<BookingError>> {
    set_status_inner(&token, booking_id, booking_types::BookingStatus::Cancelled)
        .await
        .map_err(ServerFnError::WrappedServerError)
}

#[server]
pub async fn complete_booking(
    token: String,
    booking_id: i64,
) -> Result<Booking, ServerFnError<BookingError>> {
    set_status_inner(&token, booking_id, booking_types::BookingStatus::Completed)
        .await
        .map_err(ServerFnError::WrappedServerError)
}

#[server]
pub async fn get_agency_talents(
    token: String,
    q: Option<String>,
) -> Result<Vec<Talent>, ServerFnError> {
    let agency_id = extract_agency_id(&token).map_err(plain_error)?;

    booking_repository::get_talents(agency_id, q.as_deref())
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to load talents: {}", e)))
}

#[server]
pub async fn list_book_outs(
    token: String,
    date_start: Option<NaiveDate>,
    date_end: Option<NaiveDate>,
) -> Result<Vec<BookOut>, ServerFnError> {
    let agency_id = extract_agency_id(&token).map_err(plain_error)?;

    booking_repository::list_book_outs(agency_id, date_start, date_end)
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to load book-outs: {}", e)))
}

#[server(input = Json)]
pub async fn create_book_out(
    token: String,
    book_out: NewBookOut,
) -> Result<BookOut, ServerFnError<BookingError>> {
    let agency_id = extract_agency_id(&token).map_err(ServerFnError::WrappedServerError)?;
    book_out.validate().map_err(ServerFnError::WrappedServerError)?;

    let created = booking_repository::create_book_out(agency_id, &book_out)
        .await
        .map_err(|e| ServerFnError::WrappedServerError(storage_error(e)))?
        .ok_or_else(|| ServerFnError::WrappedServerError(BookingError::validation("talent not found")))?;

    tracing::info!(agency_id, book_out_id = created.id, talent_id = created.talent_id, "book-out created");
    Ok(created)
}

#[server]
pub async fn delete_book_out(
    token: String,
    book_out_id: i64,
) -> Result<(), ServerFnError<BookingError>> {
    let agency_id = extract_agency_id(&token).map_err(ServerFnError::WrappedServerError)?;

    let deleted = booking_repository::delete_book_out(agency_id, book_out_id)
        .await
        .map_err(|e| ServerFnError::WrappedServerError(storage_error(e)))?;
    if !deleted {
        return Err(ServerFnError::WrappedServerError(BookingError::NotFound));
    }

    tracing::info!(agency_id, book_out_id, "book-out deleted");
    Ok(())
}

/// Maps a typed server function failure onto [`BookingError`] for the
/// browser. Transport failures become `Unknown`.
pub fn booking_error(err: ServerFnError<BookingError>) -> BookingError {
    match err {
        ServerFnError::WrappedServerError(e) => e,
        other => BookingError::Unknown(other.to_string()),
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token(user_type: &str, user_id: i64) -> String {
        let claims = Claims {
            sub: format!("user-{}", user_id),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
            user_type: user_type.to_string(),
            user_id,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_ref())).unwrap()
    }

    #[test]
    fn agency_token_yields_agency_id() {
        assert_eq!(decode_account_id(&token("agency", 7), SECRET, "agency"), Ok(7));
    }

    #[test]
    fn wrong_type_secret_or_blank_is_unauthorized() {
        assert!(matches!(
            decode_account_id(&token("brand", 7), SECRET, "agency"),
            Err(BookingError::Unauthorized(_))
        ));
        assert!(matches!(
            decode_account_id(&token("agency", 7), "other-secret", "agency"),
            Err(BookingError::Unauthorized(_))
        ));
        assert!(matches!(
            decode_account_id("  ", SECRET, "agency"),
            Err(BookingError::Unauthorized(_))
        ));
    }

    #[test]
    fn oversized_upload_is_a_validation_failure() {
        let files = vec![
            UploadedFile {
                file_name: "call-sheet.pdf".into(),
                content_type: Some("application/pdf".into()),
                bytes: vec![0; 10],
            },
            UploadedFile {
                file_name: "moodboard.png".into(),
                content_type: None,
                bytes: vec![0; 11],
            },
        ];
        assert!(check_upload_sizes(&files[..1], 10).is_ok());
        match check_upload_sizes(&files, 10) {
            Err(BookingError::ValidationFailed(msg)) => assert!(msg.contains("moodboard.png")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn wrapped_errors_keep_their_variant() {
        let err = ServerFnError::WrappedServerError(BookingError::Conflict("booked out".into()));
        assert_eq!(booking_error(err), BookingError::Conflict("booked out".into()));
        let transport: ServerFnError<BookingError> = ServerFnError::Request("offline".into());
        assert!(matches!(booking_error(transport), BookingError::Unknown(_)));
    }
}
