use booking_types::{BookingNotificationRow, ChannelSettings, NotificationChannel};

/// Rows requested when the logs sub-tab opens.
pub const LOG_FETCH_LIMIT: i64 = 100;
/// Feed entries shown after channel filtering.
pub const FEED_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub emails_sent: usize,
    pub failed: usize,
}

impl DeliveryStats {
    /// Only email rows count; a row without `smtp_status == "ok"` failed.
    pub fn compute(rows: &[BookingNotificationRow]) -> Self {
        let emails: Vec<&BookingNotificationRow> = rows
            .iter()
            .filter(|r| r.channel() == Some(NotificationChannel::Email))
            .collect();
        let emails_sent = emails.iter().filter(|r| r.smtp_ok()).count();
        Self {
            emails_sent,
            failed: emails.len() - emails_sent,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub id: i64,
    pub channel: NotificationChannel,
    pub title: &'static str,
    pub recipient: String,
    pub message: String,
    pub time: String,
    pub ok: bool,
}

impl FeedItem {
    pub fn detail(&self) -> &'static str {
        if self.ok {
            "Sent"
        } else {
            "Failed"
        }
    }
}

/// Newest rows first, cut to [`FEED_LIMIT`], then restricted to channels the
/// user enabled. Rows with an unrecognised channel are dropped.
pub fn feed(rows: &[BookingNotificationRow], settings: &ChannelSettings) -> Vec<FeedItem> {
    let mut newest: Vec<&BookingNotificationRow> = rows.iter().collect();
    newest.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    newest
        .into_iter()
        .take(FEED_LIMIT)
        .filter_map(|row| {
            let channel = row.channel()?;
            if !settings.is_enabled(channel) {
                return None;
            }
            Some(FeedItem {
                id: row.id,
                channel,
                title: "Booking Created",
                recipient: row.to_email.clone().unwrap_or_default(),
                message: row.headline(),
                time: row.created_at.format("%b %-d, %Y").to_string(),
                ok: row.smtp_ok(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    fn row(id: i64, channel: &str, ok: bool) -> BookingNotificationRow {
        let base = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        BookingNotificationRow {
            id,
            booking_id: Some(id),
            channel: channel.to_string(),
            recipient_type: Some("talent".into()),
            to_email: Some(format!("talent{}@example.com", id)),
            subject: Some(format!("Booking #{}", id)),
            message: Some("You have a new booking".into()),
            meta_json: if ok {
                json!({ "smtp_status": "ok" })
            } else {
                json!({ "smtp_status": "error", "error": "relay refused" })
            },
            created_at: base + Duration::minutes(id),
        }
    }

    #[test]
    fn stats_count_email_rows_only() {
        let rows = vec![
            row(1, "email", true),
            row(2, "EMAIL", false),
            row(3, "sms", true),
            row(4, "email", true),
        ];
        assert_eq!(
            DeliveryStats::compute(&rows),
            DeliveryStats {
                emails_sent: 2,
                failed: 1
            }
        );
    }

    #[test]
    fn feed_is_newest_first_and_respects_channels() {
        let rows = vec![row(1, "email", true), row(2, "sms", true), row(3, "email", false), row(4, "fax", true)];
        let items = feed(&rows, &ChannelSettings::default());
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(items[0].detail(), "Failed");
        assert_eq!(items[1].time, "Jan 5, 2026");
        assert_eq!(items[1].message, "Booking #1");

        let mut with_sms = ChannelSettings::default();
        with_sms.set(NotificationChannel::Sms, true);
        assert_eq!(feed(&rows, &with_sms).len(), 3);
    }

    #[test]
    fn feed_caps_before_filtering() {
        let mut rows: Vec<BookingNotificationRow> =
            (1..=60).map(|id| row(id, "sms", true)).collect();
        rows.push(row(0, "email", true));
        // The email row is the oldest and falls outside the newest 50.
        assert!(feed(&rows, &ChannelSettings::default()).is_empty());
    }
}
