use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// Call time written for every all-day booking.
pub const ALL_DAY_CALL_TIME: &str = "00:00";
/// Wrap time written for every all-day booking.
pub const ALL_DAY_WRAP_TIME: &str = "23:59";

const DEFAULT_UPLOAD_NAME: &str = "upload.bin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingType {
    Casting,
    Option,
    #[default]
    Confirmed,
    TestShoot,
    Fitting,
    Rehearsal,
    #[serde(other)]
    Other,
}

impl BookingType {
    /// Types offered by the booking form, in menu order.
    pub const SELECTABLE: [BookingType; 6] = [
        BookingType::Casting,
        BookingType::Option,
        BookingType::Confirmed,
        BookingType::TestShoot,
        BookingType::Fitting,
        BookingType::Rehearsal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casting => "casting",
            Self::Option => "option",
            Self::Confirmed => "confirmed",
            Self::TestShoot => "test-shoot",
            Self::Fitting => "fitting",
            Self::Rehearsal => "rehearsal",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Casting => "Casting",
            Self::Option => "Option",
            Self::Confirmed => "Confirmed",
            Self::TestShoot => "Test Shoot",
            Self::Fitting => "Fitting",
            Self::Rehearsal => "Rehearsal",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown type strings fall back to [`BookingType::Other`], matching the
/// color table's fallback.
impl FromStr for BookingType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = Self::SELECTABLE
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or(Self::Other);
        Ok(parsed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Only confirmed and completed work is billable.
    pub fn counts_toward_revenue(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Completed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BookingError::validation(format!("unknown booking status '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateType {
    #[default]
    Day,
    Hourly,
    Flat,
    Tbd,
}

impl RateType {
    pub const ALL: [RateType; 4] = [RateType::Day, RateType::Hourly, RateType::Flat, RateType::Tbd];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Hourly => "hourly",
            Self::Flat => "flat",
            Self::Tbd => "tbd",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "Day Rate",
            Self::Hourly => "Hourly",
            Self::Flat => "Flat Fee",
            Self::Tbd => "TBD",
        }
    }
}

impl FromStr for RateType {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BookingError::validation(format!("unknown rate type '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Cad,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Gbp, Currency::Cad];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Cad => "CAD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd | Self::Cad => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
        }
    }
}

impl FromStr for Currency {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BookingError::validation(format!("unknown currency '{}'", s)))
    }
}

/// Which notifications go out when a booking is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyChannels {
    pub email: bool,
    pub sms: bool,
    pub push: bool,
    pub calendar: bool,
}

impl Default for NotifyChannels {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
            push: false,
            calendar: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingFile {
    pub id: i64,
    pub file_name: String,
    pub storage_path: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
}

/// A file picked in the booking form, carried to the server with its bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub talent_id: i64,
    pub talent_name: String,
    pub client_id: Option<i64>,
    pub client_name: String,
    pub date: NaiveDate,
    pub all_day: bool,
    pub call_time: Option<String>,
    pub wrap_time: Option<String>,
    pub location: String,
    pub location_notes: Option<String>,
    pub rate_cents: Option<i64>,
    pub currency: Currency,
    pub rate_type: RateType,
    pub booking_type: BookingType,
    pub status: BookingStatus,
    pub usage_terms: Option<String>,
    pub usage_duration: Option<String>,
    pub exclusive: bool,
    pub notes: Option<String>,
    pub industries: Vec<String>,
    pub notify: NotifyChannels,
    pub files: Vec<BookingFile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Canonical `YYYY-MM-DD` key used to place the booking on the calendar.
    pub fn day_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Positive rate in cents, if any. Negative or missing rates are ignored
    /// by every aggregate.
    pub fn billable_cents(&self) -> Option<i64> {
        self.rate_cents.filter(|cents| *cents >= 0)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}

/// Request body for creating one booking for one talent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookingPayload {
    pub booking_type: BookingType,
    pub status: BookingStatus,
    pub talent_id: i64,
    pub talent_name: String,
    pub client_id: Option<i64>,
    pub client_name: String,
    pub date: NaiveDate,
    pub all_day: bool,
    pub call_time: Option<String>,
    pub wrap_time: Option<String>,
    pub location: String,
    pub location_notes: Option<String>,
    pub rate_cents: Option<i64>,
    pub currency: Currency,
    pub rate_type: RateType,
    pub usage_terms: Option<String>,
    pub usage_duration: Option<String>,
    pub exclusive: bool,
    pub notes: Option<String>,
    pub industries: Vec<String>,
    pub notify: NotifyChannels,
}

impl CreateBookingPayload {
    /// Applies the all-day rule: the booking spans the whole day regardless of
    /// any times that were typed before the toggle.
    pub fn normalized(mut self) -> Self {
        if self.all_day {
            self.call_time = Some(ALL_DAY_CALL_TIME.to_string());
            self.wrap_time = Some(ALL_DAY_WRAP_TIME.to_string());
        }
        self
    }

    pub fn validate(&self) -> Result<(), BookingError> {
        if self.talent_id <= 0 {
            return Err(BookingError::validation("talent is required"));
        }
        if self.client_id.is_none() && self.client_name.trim().is_empty() {
            return Err(BookingError::validation("client is required"));
        }
        if let Some(cents) = self.rate_cents {
            if cents < 0 {
                return Err(BookingError::validation("rate cannot be negative"));
            }
        }
        validate_times(self.all_day, self.call_time.as_deref(), self.wrap_time.as_deref())
    }
}

/// Change to an optional booking field. `Keep` leaves the stored value,
/// `Clear` empties it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op", content = "value")]
pub enum FieldPatch<T> {
    Keep,
    Clear,
    Set(T),
}

impl<T> Default for FieldPatch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T: Clone> FieldPatch<T> {
    /// Edit forms send every field; a missing value means the field was
    /// emptied.
    pub fn from_edited(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Set(v),
            None => Self::Clear,
        }
    }

    pub fn apply_to(&self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *slot = None,
            Self::Set(v) => *slot = Some(v.clone()),
        }
    }
}

/// Partial update; `None` and `FieldPatch::Keep` leave the stored value
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBookingPayload {
    pub booking_type: Option<BookingType>,
    pub status: Option<BookingStatus>,
    pub talent_id: Option<i64>,
    pub talent_name: Option<String>,
    #[serde(default)]
    pub client_id: FieldPatch<i64>,
    pub client_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub all_day: Option<bool>,
    #[serde(default)]
    pub call_time: FieldPatch<String>,
    #[serde(default)]
    pub wrap_time: FieldPatch<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub location_notes: FieldPatch<String>,
    #[serde(default)]
    pub rate_cents: FieldPatch<i64>,
    pub currency: Option<Currency>,
    pub rate_type: Option<RateType>,
    #[serde(default)]
    pub usage_terms: FieldPatch<String>,
    #[serde(default)]
    pub usage_duration: FieldPatch<String>,
    pub exclusive: Option<bool>,
    #[serde(default)]
    pub notes: FieldPatch<String>,
}

impl UpdateBookingPayload {
    /// Merges the patch into `booking` and re-checks the result.
    pub fn apply(&self, booking: &mut Booking) -> Result<(), BookingError> {
        if let Some(v) = self.booking_type {
            booking.booking_type = v;
        }
        if let Some(v) = self.status {
            booking.status = v;
        }
        if let Some(v) = self.talent_id {
            booking.talent_id = v;
        }
        if let Some(v) = &self.talent_name {
            booking.talent_name = v.clone();
        }
        self.client_id.apply_to(&mut booking.client_id);
        if let Some(v) = &self.client_name {
            booking.client_name = v.clone();
        }
        if let Some(v) = self.date {
            booking.date = v;
        }
        if let Some(v) = self.all_day {
            booking.all_day = v;
        }
        self.call_time.apply_to(&mut booking.call_time);
        self.wrap_time.apply_to(&mut booking.wrap_time);
        if let Some(v) = &self.location {
            booking.location = v.clone();
        }
        self.location_notes.apply_to(&mut booking.location_notes);
        self.rate_cents.apply_to(&mut booking.rate_cents);
        if let Some(v) = self.currency {
            booking.currency = v;
        }
        if let Some(v) = self.rate_type {
            booking.rate_type = v;
        }
        self.usage_terms.apply_to(&mut booking.usage_terms);
        self.usage_duration.apply_to(&mut booking.usage_duration);
        if let Some(v) = self.exclusive {
            booking.exclusive = v;
        }
        self.notes.apply_to(&mut booking.notes);

        if booking.all_day {
            booking.call_time = Some(ALL_DAY_CALL_TIME.to_string());
            booking.wrap_time = Some(ALL_DAY_WRAP_TIME.to_string());
        }
        if booking.rate_cents.is_some_and(|cents| cents < 0) {
            return Err(BookingError::validation("rate cannot be negative"));
        }
        validate_times(
            booking.all_day,
            booking.call_time.as_deref(),
            booking.wrap_time.as_deref(),
        )
    }

    /// True when the patch moves the booking to another day or talent, which
    /// means availability has to be checked again.
    pub fn reschedules(&self) -> bool {
        self.date.is_some() || self.talent_id.is_some()
    }
}

fn parse_time(label: &str, value: &str) -> Result<NaiveTime, BookingError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| BookingError::validation(format!("{} must be HH:MM, got '{}'", label, value)))
}

fn validate_times(
    all_day: bool,
    call_time: Option<&str>,
    wrap_time: Option<&str>,
) -> Result<(), BookingError> {
    let call = call_time.map(|t| parse_time("call time", t)).transpose()?;
    let wrap = wrap_time.map(|t| parse_time("wrap time", t)).transpose()?;
    if let (false, Some(call), Some(wrap)) = (all_day, call, wrap) {
        if wrap < call {
            return Err(BookingError::validation("wrap time is before call time"));
        }
    }
    Ok(())
}

/// Makes an uploaded file name safe to use as a path segment. Anything other
/// than ASCII letters, digits, `.`, `_` and `-` becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_UPLOAD_NAME.to_string();
    }
    trimmed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Relative storage key for a booking attachment.
pub fn booking_file_storage_path(
    agency_id: i64,
    booking_id: i64,
    uploaded_at_millis: i64,
    file_name: &str,
) -> String {
    format!(
        "agencies/{}/bookings/{}/files/{}_{}",
        agency_id,
        booking_id,
        uploaded_at_millis,
        sanitize_file_name(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CreateBookingPayload {
        CreateBookingPayload {
            booking_type: BookingType::Casting,
            status: BookingStatus::Pending,
            talent_id: 7,
            talent_name: "Emma".into(),
            client_id: Some(3),
            client_name: "Nike".into(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            all_day: false,
            call_time: Some("09:00".into()),
            wrap_time: Some("17:00".into()),
            location: "Studio 4".into(),
            location_notes: None,
            rate_cents: Some(150_000),
            currency: Currency::Usd,
            rate_type: RateType::Day,
            usage_terms: None,
            usage_duration: None,
            exclusive: false,
            notes: None,
            industries: vec![],
            notify: NotifyChannels::default(),
        }
    }

    // -- enums ---------------------------------------------------------

    #[test]
    fn booking_type_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&BookingType::TestShoot).unwrap();
        assert_eq!(json, "\"test-shoot\"");
        let parsed: BookingType = serde_json::from_str("\"wardrobe\"").unwrap();
        assert_eq!(parsed, BookingType::Other);
    }

    #[test]
    fn booking_type_parse_falls_back_to_other() {
        assert_eq!("Fitting".parse::<BookingType>().unwrap(), BookingType::Fitting);
        assert_eq!("go-see".parse::<BookingType>().unwrap(), BookingType::Other);
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = "archived".parse::<BookingStatus>().unwrap_err();
        assert!(matches!(err, BookingError::ValidationFailed(_)));
    }

    #[test]
    fn only_confirmed_and_completed_count_toward_revenue() {
        let billable: Vec<_> = BookingStatus::ALL
            .into_iter()
            .filter(BookingStatus::counts_toward_revenue)
            .collect();
        assert_eq!(billable, vec![BookingStatus::Confirmed, BookingStatus::Completed]);
    }

    // -- payload validation --------------------------------------------

    #[test]
    fn all_day_overrides_typed_times() {
        let mut p = payload();
        p.all_day = true;
        let p = p.normalized();
        assert_eq!(p.call_time.as_deref(), Some(ALL_DAY_CALL_TIME));
        assert_eq!(p.wrap_time.as_deref(), Some(ALL_DAY_WRAP_TIME));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn missing_talent_or_client_is_rejected() {
        let mut p = payload();
        p.talent_id = 0;
        assert!(p.validate().is_err());

        let mut p = payload();
        p.client_id = None;
        p.client_name = "  ".into();
        assert!(p.validate().is_err());
    }

    #[test]
    fn wrap_before_call_is_rejected_unless_all_day() {
        let mut p = payload();
        p.call_time = Some("18:00".into());
        p.wrap_time = Some("09:00".into());
        assert!(p.validate().is_err());

        p.all_day = true;
        assert!(p.normalized().validate().is_ok());
    }

    #[test]
    fn malformed_time_is_rejected() {
        let mut p = payload();
        p.call_time = Some("9am".into());
        assert!(matches!(p.validate(), Err(BookingError::ValidationFailed(_))));
    }

    // -- partial update ------------------------------------------------

    #[test]
    fn update_only_touches_given_fields() {
        let mut booking = Booking {
            id: 1,
            talent_id: 7,
            talent_name: "Emma".into(),
            client_id: Some(3),
            client_name: "Nike".into(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            all_day: false,
            call_time: Some("09:00".into()),
            wrap_time: Some("17:00".into()),
            location: "Studio 4".into(),
            location_notes: None,
            rate_cents: Some(100),
            currency: Currency::Usd,
            rate_type: RateType::Day,
            booking_type: BookingType::Casting,
            status: BookingStatus::Pending,
            usage_terms: None,
            usage_duration: None,
            exclusive: false,
            notes: Some("bring heels".into()),
            industries: vec![],
            notify: NotifyChannels::default(),
            files: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let patch = UpdateBookingPayload {
            all_day: Some(true),
            location: Some("Pier 59".into()),
            ..Default::default()
        };
        patch.apply(&mut booking).unwrap();

        assert_eq!(booking.location, "Pier 59");
        assert_eq!(booking.notes.as_deref(), Some("bring heels"));
        assert_eq!(booking.call_time.as_deref(), Some("00:00"));
        assert_eq!(booking.wrap_time.as_deref(), Some("23:59"));
        assert!(!patch.reschedules());

        let clear = UpdateBookingPayload {
            notes: FieldPatch::Clear,
            rate_cents: FieldPatch::Clear,
            ..Default::default()
        };
        clear.apply(&mut booking).unwrap();
        assert_eq!(booking.notes, None);
        assert_eq!(booking.rate_cents, None);
        assert_eq!(booking.location, "Pier 59");
    }

    #[test]
    fn field_patch_travels_as_tagged_json() {
        let patch = UpdateBookingPayload {
            notes: FieldPatch::Clear,
            rate_cents: FieldPatch::Set(500),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["notes"], serde_json::json!({ "op": "clear" }));
        assert_eq!(json["rate_cents"], serde_json::json!({ "op": "set", "value": 500 }));
        assert_eq!(json["usage_terms"], serde_json::json!({ "op": "keep" }));

        let back: UpdateBookingPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back, patch);
    }

    // -- files ---------------------------------------------------------

    #[test]
    fn file_names_are_sanitized_for_storage() {
        assert_eq!(sanitize_file_name("call sheet (v2).pdf"), "call_sheet__v2_.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_name("   "), "upload.bin");
    }

    #[test]
    fn storage_path_is_scoped_by_agency_and_booking() {
        assert_eq!(
            booking_file_storage_path(12, 345, 1_700_000_000_000, "mood board.png"),
            "agencies/12/bookings/345/files/1700000000000_mood_board.png"
        );
    }
}
