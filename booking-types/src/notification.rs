use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `localStorage` key holding the booking-created channel toggles.
pub const CHANNEL_SETTINGS_STORAGE_KEY: &str = "likelee.notifications.createdChannels";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationChannel {
    Email,
    Sms,
    Push,
}

impl NotificationChannel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "email" => Some(Self::Email),
            "sms" => Some(Self::Sms),
            "push" => Some(Self::Push),
            _ => None,
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Sms => "SMS",
            Self::Push => "PUSH",
        }
    }
}

/// One delivery attempt recorded by the notification service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingNotificationRow {
    pub id: i64,
    pub booking_id: Option<i64>,
    pub channel: String,
    pub recipient_type: Option<String>,
    pub to_email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub meta_json: Value,
    pub created_at: DateTime<Utc>,
}

impl BookingNotificationRow {
    pub fn channel(&self) -> Option<NotificationChannel> {
        NotificationChannel::parse(&self.channel)
    }

    /// True when the mail relay acknowledged the message.
    pub fn smtp_ok(&self) -> bool {
        self.meta_json.get("smtp_status").and_then(Value::as_str) == Some("ok")
    }

    /// Subject when present, otherwise the message body.
    pub fn headline(&self) -> String {
        self.subject
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.message.clone())
            .unwrap_or_default()
    }
}

/// Channels on which "booking created" notifications are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
    pub email: bool,
    pub sms: bool,
    pub push: bool,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
            push: false,
        }
    }
}

impl ChannelSettings {
    /// Reads the persisted JSON. Missing keys take the defaults and
    /// unreadable input yields the defaults; stored values are kept as-is.
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(|json| serde_json::from_str(json).ok())
            .unwrap_or_default()
    }

    pub fn to_stored(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn is_enabled(&self, channel: NotificationChannel) -> bool {
        match channel {
            NotificationChannel::Email => self.email,
            NotificationChannel::Sms => self.sms,
            NotificationChannel::Push => self.push,
        }
    }

    pub fn set(&mut self, channel: NotificationChannel, enabled: bool) {
        match channel {
            NotificationChannel::Email => self.email = enabled,
            NotificationChannel::Sms => self.sms = enabled,
            NotificationChannel::Push => self.push = enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(channel: &str, meta: Value) -> BookingNotificationRow {
        BookingNotificationRow {
            id: 1,
            booking_id: Some(9),
            channel: channel.into(),
            recipient_type: Some("talent".into()),
            to_email: Some("emma@example.com".into()),
            subject: None,
            message: Some("You have a new booking".into()),
            meta_json: meta,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn smtp_ok_reads_meta_json() {
        assert!(row("email", json!({"smtp_status": "ok"})).smtp_ok());
        assert!(!row("email", json!({"smtp_status": "error"})).smtp_ok());
        assert!(!row("email", Value::Null).smtp_ok());
    }

    #[test]
    fn channel_parse_ignores_case() {
        assert_eq!(row("EMAIL", Value::Null).channel(), Some(NotificationChannel::Email));
        assert_eq!(row("fax", Value::Null).channel(), None);
    }

    #[test]
    fn headline_prefers_subject() {
        let mut r = row("email", Value::Null);
        assert_eq!(r.headline(), "You have a new booking");
        r.subject = Some("Booking confirmed".into());
        assert_eq!(r.headline(), "Booking confirmed");
    }

    #[test]
    fn stored_channel_settings_are_honored() {
        let settings = ChannelSettings::from_stored(Some(r#"{"sms": true, "push": true}"#));
        assert!(settings.email);
        assert!(settings.sms);
        assert!(settings.push);
    }

    #[test]
    fn stored_email_off_is_kept() {
        let settings = ChannelSettings::from_stored(Some(r#"{"email": false}"#));
        assert!(!settings.email);
        assert!(!settings.is_enabled(NotificationChannel::Email));
    }

    #[test]
    fn unreadable_channel_settings_fall_back_to_defaults() {
        assert_eq!(ChannelSettings::from_stored(Some("not json")), ChannelSettings::default());
        assert_eq!(ChannelSettings::from_stored(None), ChannelSettings::default());
    }
}
