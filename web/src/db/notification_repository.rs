use booking_types::BookingNotificationRow;
use serde_json::Value;
use sqlx::Row;

type DbResult<T> = Result<T, sqlx::Error>;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 200;

/// Requested page size clamped to `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Newest delivery attempts first.
pub async fn list_notifications(agency_id: i64, limit: i64) -> DbResult<Vec<BookingNotificationRow>> {
    let pool = crate::db::pool::get_pool()?;

    let rows = sqlx::query(
        "SELECT id, booking_id, channel, recipient_type, to_email, subject,
                message, meta_json, created_at
         FROM booking_notifications
         WHERE agency_id = $1
         ORDER BY created_at DESC, id DESC
         LIMIT $2",
    )
    .bind(agency_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| BookingNotificationRow {
            id: row.get("id"),
            booking_id: row.get("booking_id"),
            channel: row.get("channel"),
            recipient_type: row.get("recipient_type"),
            to_email: row.get("to_email"),
            subject: row.get("subject"),
            message: row.get("message"),
            meta_json: row.try_get::<Value, _>("meta_json").unwrap_or(Value::Null),
            created_at: row.get("created_at"),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_caps() {
        assert_eq!(clamp_limit(None), 50);
        assert_eq!(clamp_limit(Some(100)), 100);
        assert_eq!(clamp_limit(Some(5_000)), 200);
        assert_eq!(clamp_limit(Some(0)), 1);
    }
}
