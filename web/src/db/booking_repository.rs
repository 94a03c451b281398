use std::path::{Path, PathBuf};
use std::str::FromStr;

use booking_types::{
    booking_file_storage_path, BookOut, BookOutReason, Booking, BookingFile, BookingStatus,
    BookingType, CreateBookingPayload, Currency, NewBookOut, NotifyChannels, RateType, Talent,
    UploadedFile,
};
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::Row;

type DbResult<T> = Result<T, sqlx::Error>;

/// Failure while storing a booking together with its attachments.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("failed to write attachment: {0}")]
    Io(#[from] std::io::Error),
}

const BOOKING_COLUMNS: &str = "
    id, talent_id, talent_name, client_id, client_name, date, all_day,
    call_time, wrap_time, location, location_notes, rate_cents, currency,
    rate_type, booking_type, status, usage_terms, usage_duration, exclusive,
    notes, industries, notify, created_at, updated_at";

fn booking_from_row(row: &PgRow) -> Booking {
    let text = |col: &str| row.get::<String, _>(col);
    Booking {
        id: row.get("id"),
        talent_id: row.get("talent_id"),
        talent_name: text("talent_name"),
        client_id: row.get("client_id"),
        client_name: text("client_name"),
        date: row.get("date"),
        all_day: row.get("all_day"),
        call_time: row.get("call_time"),
        wrap_time: row.get("wrap_time"),
        location: text("location"),
        location_notes: row.get("location_notes"),
        rate_cents: row.get("rate_cents"),
        currency: Currency::from_str(&text("currency")).unwrap_or_default(),
        rate_type: RateType::from_str(&text("rate_type")).unwrap_or_default(),
        booking_type: BookingType::from_str(&text("booking_type")).unwrap_or(BookingType::Other),
        status: BookingStatus::from_str(&text("status")).unwrap_or_default(),
        usage_terms: row.get("usage_terms"),
        usage_duration: row.get("usage_duration"),
        exclusive: row.get("exclusive"),
        notes: row.get("notes"),
        industries: row.get("industries"),
        notify: row
            .try_get::<Json<NotifyChannels>, _>("notify")
            .map(|json| json.0)
            .unwrap_or_default(),
        files: Vec::new(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn file_from_row(row: &PgRow) -> BookingFile {
    BookingFile {
        id: row.get("id"),
        file_name: row.get("file_name"),
        storage_path: row.get("storage_path"),
        content_type: row.get("content_type"),
        size_bytes: row.get("size_bytes"),
    }
}

async fn attach_files(bookings: &mut [Booking]) -> DbResult<()> {
    if bookings.is_empty() {
        return Ok(());
    }
    let pool = crate::db::pool::get_pool()?;
    let ids: Vec<i64> = bookings.iter().map(|b| b.id).collect();

    let rows = sqlx::query(
        "SELECT id, booking_id, file_name, storage_path, content_type, size_bytes
         FROM booking_files
         WHERE booking_id = ANY($1)
         ORDER BY id",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    for row in rows {
        let booking_id: i64 = row.get("booking_id");
        if let Some(booking) = bookings.iter_mut().find(|b| b.id == booking_id) {
            booking.files.push(file_from_row(&row));
        }
    }
    Ok(())
}

/// Agency bookings within the optional inclusive date window, newest date
/// first.
pub async fn list_bookings(
    agency_id: i64,
    date_start: Option<NaiveDate>,
    date_end: Option<NaiveDate>,
) -> DbResult<Vec<Booking>> {
    let pool = crate::db::pool::get_pool()?;

    let rows = sqlx::query(&format!(
        "SELECT {BOOKING_COLUMNS}
         FROM bookings
         WHERE agency_id = $1
           AND ($2::date IS NULL OR date >= $2)
           AND ($3::date IS NULL OR date <= $3)
         ORDER BY date DESC, id DESC"
    ))
    .bind(agency_id)
    .bind(date_start)
    .bind(date_end)
    .fetch_all(pool)
    .await?;

    let mut bookings: Vec<Booking> = rows.iter().map(booking_from_row).collect();
    attach_files(&mut bookings).await?;
    Ok(bookings)
}

pub async fn get_booking(agency_id: i64, booking_id: i64) -> DbResult<Option<Booking>> {
    let pool = crate::db::pool::get_pool()?;

    let row = sqlx::query(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE agency_id = $1 AND id = $2"
    ))
    .bind(agency_id)
    .bind(booking_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let mut bookings = vec![booking_from_row(&row)];
    attach_files(&mut bookings).await?;
    Ok(bookings.pop())
}

/// True when a book-out of this talent covers `date`.
pub async fn talent_booked_out(agency_id: i64, talent_id: i64, date: NaiveDate) -> DbResult<bool> {
    let pool = crate::db::pool::get_pool()?;

    let row = sqlx::query(
        "SELECT EXISTS(
             SELECT 1 FROM book_outs
             WHERE agency_id = $1 AND talent_id = $2
               AND start_date <= $3 AND end_date >= $3
         ) AS booked_out",
    )
    .bind(agency_id)
    .bind(talent_id)
    .bind(date)
    .fetch_one(pool)
    .await?;

    Ok(row.get("booked_out"))
}

pub async fn talent_exists(agency_id: i64, talent_id: i64) -> DbResult<bool> {
    let pool = crate::db::pool::get_pool()?;

    let row = sqlx::query(
        "SELECT EXISTS(SELECT 1 FROM talents WHERE agency_id = $1 AND id = $2) AS found",
    )
    .bind(agency_id)
    .bind(talent_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get("found"))
}

/// Inserts the booking and its attachments in one transaction. Attachment
/// bytes are written under `upload_root`; if anything fails the transaction
/// rolls back and files already written are removed.
pub async fn insert_booking_with_files(
    agency_id: i64,
    payload: &CreateBookingPayload,
    files: &[UploadedFile],
    upload_root: &Path,
    uploaded_at_millis: i64,
) -> Result<Booking, StoreError> {
    let pool = crate::db::pool::get_pool()?;
    let mut tx = pool.begin().await?;

    let row = sqlx::query(&format!(
        "INSERT INTO bookings (
             agency_id, talent_id, talent_name, client_id, client_name, date,
             all_day, call_time, wrap_time, location, location_notes, rate_cents,
             currency, rate_type, booking_type, status, usage_terms,
             usage_duration, exclusive, notes, industries, notify
         )
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                 $15, $16, $17, $18, $19, $20, $21, $22)
         RETURNING {BOOKING_COLUMNS}"
    ))
    .bind(agency_id)
    .bind(payload.talent_id)
    .bind(&payload.talent_name)
    .bind(payload.client_id)
    .bind(&payload.client_name)
    .bind(payload.date)
    .bind(payload.all_day)
    .bind(&payload.call_time)
    .bind(&payload.wrap_time)
    .bind(&payload.location)
    .bind(&payload.location_notes)
    .bind(payload.rate_cents)
    .bind(payload.currency.code())
    .bind(payload.rate_type.as_str())
    .bind(payload.booking_type.as_str())
    .bind(payload.status.as_str())
    .bind(&payload.usage_terms)
    .bind(&payload.usage_duration)
    .bind(payload.exclusive)
    .bind(&payload.notes)
    .bind(&payload.industries)
    .bind(Json(payload.notify))
    .fetch_one(&mut *tx)
    .await?;

    let mut booking = booking_from_row(&row);
    let mut written: Vec<PathBuf> = Vec::new();

    for file in files {
        let storage_path =
            booking_file_storage_path(agency_id, booking.id, uploaded_at_millis, &file.file_name);
        let full_path = upload_root.join(&storage_path);

        if let Err(e) = write_attachment(&full_path, &file.bytes).await {
            remove_written(&written).await;
            return Err(e.into());
        }
        written.push(full_path);

        let inserted = sqlx::query(
            "INSERT INTO booking_files (booking_id, file_name, storage_path, content_type, size_bytes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, file_name, storage_path, content_type, size_bytes",
        )
        .bind(booking.id)
        .bind(&file.file_name)
        .bind(&storage_path)
        .bind(&file.content_type)
        .bind(file.bytes.len() as i64)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(row) => booking.files.push(file_from_row(&row)),
            Err(e) => {
                remove_written(&written).await;
                return Err(e.into());
            }
        }
    }

    if let Err(e) = tx.commit().await {
        remove_written(&written).await;
        return Err(e.into());
    }
    Ok(booking)
}

async fn write_attachment(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await
}

async fn remove_written(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove orphaned attachment");
        }
    }
}

/// Writes every editable column of `booking` back to its row.
pub async fn save_booking(agency_id: i64, booking: &Booking) -> DbResult<Option<Booking>> {
    let pool = crate::db::pool::get_pool()?;

    let row = sqlx::query(&format!(
        "UPDATE bookings SET
             talent_id = $3, talent_name = $4, client_id = $5, client_name = $6,
             date = $7, all_day = $8, call_time = $9, wrap_time = $10,
             location = $11, location_notes = $12, rate_cents = $13,
             currency = $14, rate_type = $15, booking_type = $16, status = $17,
             usage_terms = $18, usage_duration = $19, exclusive = $20,
             notes = $21, updated_at = now()
         WHERE agency_id = $1 AND id = $2
         RETURNING {BOOKING_COLUMNS}"
    ))
    .bind(agency_id)
    .bind(booking.id)
    .bind(booking.talent_id)
    .bind(&booking.talent_name)
    .bind(booking.client_id)
    .bind(&booking.client_name)
    .bind(booking.date)
    .bind(booking.all_day)
    .bind(&booking.call_time)
    .bind(&booking.wrap_time)
    .bind(&booking.location)
    .bind(&booking.location_notes)
    .bind(booking.rate_cents)
    .bind(booking.currency.code())
    .bind(booking.rate_type.as_str())
    .bind(booking.booking_type.as_str())
    .bind(booking.status.as_str())
    .bind(&booking.usage_terms)
    .bind(&booking.usage_duration)
    .bind(booking.exclusive)
    .bind(&booking.notes)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let mut saved = booking_from_row(&row);
    saved.files = booking.files.clone();
    Ok(Some(saved))
}

pub async fn set_status(
    agency_id: i64,
    booking_id: i64,
    status: BookingStatus,
) -> DbResult<Option<Booking>> {
    let pool = crate::db::pool::get_pool()?;

    let updated = sqlx::query(
        "UPDATE bookings SET status = $3, updated_at = now()
         WHERE agency_id = $1 AND id = $2",
    )
    .bind(agency_id)
    .bind(booking_id)
    .bind(status.as_str())
    .execute(pool)
    .await?;

    if updated.rows_affected() == 0 {
        return Ok(None);
    }
    get_booking(agency_id, booking_id).await
}

/// Escapes LIKE wildcards so user input only ever matches literally.
pub fn like_pattern(query: &str) -> String {
    let escaped = query
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Agency roster, optionally narrowed by a case-insensitive name search.
pub async fn get_talents(agency_id: i64, query: Option<&str>) -> DbResult<Vec<Talent>> {
    let pool = crate::db::pool::get_pool()?;
    let pattern = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(like_pattern);

    let rows = sqlx::query(
        "SELECT id, name, avatar_url
         FROM talents
         WHERE agency_id = $1
           AND ($2::text IS NULL OR name ILIKE $2)
         ORDER BY name
         LIMIT 50",
    )
    .bind(agency_id)
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Talent {
            id: row.get("id"),
            name: row.get("name"),
            avatar_url: row.get("avatar_url"),
        })
        .collect())
}

fn book_out_from_row(row: &PgRow) -> BookOut {
    BookOut {
        id: row.get("id"),
        talent_id: row.get("talent_id"),
        reason: BookOutReason::parse(&row.get::<String, _>("reason")).unwrap_or_default(),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        notes: row.get("notes"),
    }
}

/// Book-outs overlapping the optional inclusive window.
pub async fn list_book_outs(
    agency_id: i64,
    date_start: Option<NaiveDate>,
    date_end: Option<NaiveDate>,
) -> DbResult<Vec<BookOut>> {
    let pool = crate::db::pool::get_pool()?;

    let rows = sqlx::query(
        "SELECT id, talent_id, reason, start_date, end_date, notes
         FROM book_outs
         WHERE agency_id = $1
           AND ($2::date IS NULL OR end_date >= $2)
           AND ($3::date IS NULL OR start_date <= $3)
         ORDER BY start_date, id",
    )
    .bind(agency_id)
    .bind(date_start)
    .bind(date_end)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(book_out_from_row).collect())
}

/// Inserts the book-out if the talent belongs to the agency.
pub async fn create_book_out(agency_id: i64, book_out: &NewBookOut) -> DbResult<Option<BookOut>> {
    let pool = crate::db::pool::get_pool()?;

    let row = sqlx::query(
        "INSERT INTO book_outs (agency_id, talent_id, reason, start_date, end_date, notes)
         SELECT $1, t.id, $3, $4, $5, $6
         FROM talents t
         WHERE t.agency_id = $1 AND t.id = $2
         RETURNING id, talent_id, reason, start_date, end_date, notes",
    )
    .bind(agency_id)
    .bind(book_out.talent_id)
    .bind(book_out.reason.as_str())
    .bind(book_out.start_date)
    .bind(book_out.end_date)
    .bind(&book_out.notes)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(book_out_from_row))
}

pub async fn delete_book_out(agency_id: i64, book_out_id: i64) -> DbResult<bool> {
    let pool = crate::db::pool::get_pool()?;

    let result = sqlx::query("DELETE FROM book_outs WHERE agency_id = $1 AND id = $2")
        .bind(agency_id)
        .bind(book_out_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" em "), "%em%");
        assert_eq!(like_pattern("100%_x"), "%100\\%\\_x%");
    }
}
