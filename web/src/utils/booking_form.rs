//! State behind the booking modal, independent of the widgets that edit it.

use booking_types::{
    Booking, BookingError, BookingStatus, BookingType, Client, CreateBookingPayload, Currency,
    FieldPatch, NotifyChannels, RateType, Talent, UpdateBookingPayload, ALL_DAY_CALL_TIME,
    ALL_DAY_WRAP_TIME,
};
use chrono::NaiveDate;

use crate::utils::money::parse_money_to_cents;

/// Agency share shown as the commission preview.
pub const COMMISSION_PERCENT: i64 = 20;
/// Delay before the typed talent search is sent to the server.
pub const TALENT_SEARCH_DEBOUNCE_MS: u64 = 200;
/// The modal closes this long after every booking was saved.
pub const CLOSE_AFTER_SUCCESS_MS: u64 = 800;

pub const USAGE_TERMS: [(&str, &str); 7] = [
    ("social", "Social Media Only"),
    ("print", "Print"),
    ("digital", "Digital"),
    ("broadcast", "Broadcast"),
    ("ecommerce", "E-commerce"),
    ("unlimited", "Unlimited"),
    ("tbd", "TBD"),
];

pub const USAGE_DURATIONS: [(&str, &str); 5] = [
    ("1 month", "1 month"),
    ("6 months", "6 months"),
    ("1 year", "1 year"),
    ("perpetuity", "In Perpetuity"),
    ("tbd", "TBD"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingMode {
    #[default]
    New,
    Edit,
    Duplicate,
}

impl BookingMode {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Edit => "Edit Booking",
            Self::New | Self::Duplicate => "New Booking",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Edit => "Update details for this booking",
            Self::New | Self::Duplicate => "Schedule a booking for your talent",
        }
    }

    pub fn submit_label(&self, booking_type: BookingType) -> String {
        match self {
            Self::Edit => "Update Booking".to_string(),
            Self::New | Self::Duplicate => format!("Save as {}", booking_type.label()),
        }
    }

    pub fn success_title(&self) -> &'static str {
        match self {
            Self::Edit => "Booking Updated",
            Self::New | Self::Duplicate => "Booking Created",
        }
    }
}

/// The client a booking is for. Records typed in before the client list
/// loaded may lack an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRef {
    pub id: Option<i64>,
    pub company: String,
}

impl From<&Client> for ClientRef {
    fn from(client: &Client) -> Self {
        Self {
            id: Some(client.id),
            company: client.company.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    pub mode: BookingMode,
    /// Booking being edited; only set in edit mode.
    pub editing_id: Option<i64>,
    pub booking_type: BookingType,
    pub status: BookingStatus,
    pub multi_talent: bool,
    pub talents: Vec<Talent>,
    pub client: Option<ClientRef>,
    pub date: NaiveDate,
    pub all_day: bool,
    pub call_time: String,
    pub wrap_time: String,
    pub location: String,
    pub location_notes: String,
    pub rate: String,
    pub currency: Currency,
    pub rate_type: RateType,
    pub usage_terms: String,
    pub usage_duration: String,
    pub exclusive: bool,
    pub notes: String,
    pub industries: Vec<String>,
    pub notify: NotifyChannels,
}

impl BookingForm {
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            mode: BookingMode::New,
            editing_id: None,
            booking_type: BookingType::Confirmed,
            status: BookingStatus::Pending,
            multi_talent: false,
            talents: Vec::new(),
            client: None,
            date,
            all_day: false,
            call_time: "09:00".to_string(),
            wrap_time: "17:00".to_string(),
            location: String::new(),
            location_notes: String::new(),
            rate: String::new(),
            currency: Currency::Usd,
            rate_type: RateType::Day,
            usage_terms: String::new(),
            usage_duration: String::new(),
            exclusive: false,
            notes: String::new(),
            industries: Vec::new(),
            notify: NotifyChannels::default(),
        }
    }

    /// Form for `mode`. Edit keeps the booking id; duplicate copies the
    /// fields into a fresh pending booking.
    pub fn for_mode(mode: BookingMode, source: Option<&Booking>, default_date: NaiveDate) -> Self {
        match (mode, source) {
            (BookingMode::New, _) | (_, None) => Self::blank(default_date),
            (mode, Some(booking)) => Self::prefill(mode, booking),
        }
    }

    fn prefill(mode: BookingMode, booking: &Booking) -> Self {
        let editing = mode == BookingMode::Edit;
        Self {
            mode,
            editing_id: editing.then_some(booking.id),
            booking_type: booking.booking_type,
            status: if editing {
                booking.status
            } else {
                BookingStatus::Pending
            },
            multi_talent: false,
            talents: vec![Talent {
                id: booking.talent_id,
                name: booking.talent_name.clone(),
                avatar_url: None,
            }],
            client: Some(ClientRef {
                id: booking.client_id,
                company: booking.client_name.clone(),
            }),
            date: booking.date,
            all_day: booking.all_day,
            call_time: booking.call_time.clone().unwrap_or_default(),
            wrap_time: booking.wrap_time.clone().unwrap_or_default(),
            location: booking.location.clone(),
            location_notes: booking.location_notes.clone().unwrap_or_default(),
            rate: booking
                .rate_cents
                .map(|c| format!("{}.{:02}", c / 100, c % 100))
                .unwrap_or_default(),
            currency: booking.currency,
            rate_type: booking.rate_type,
            usage_terms: booking.usage_terms.clone().unwrap_or_default(),
            usage_duration: booking.usage_duration.clone().unwrap_or_default(),
            exclusive: booking.exclusive,
            notes: booking.notes.clone().unwrap_or_default(),
            industries: booking.industries.clone(),
            notify: booking.notify,
        }
    }

    /// Turning all-day on overwrites the times. Turning it off leaves them
    /// at the full-day values; earlier times are not restored.
    pub fn set_all_day(&mut self, all_day: bool) {
        self.all_day = all_day;
        if all_day {
            self.call_time = ALL_DAY_CALL_TIME.to_string();
            self.wrap_time = ALL_DAY_WRAP_TIME.to_string();
        }
    }

    /// Leaving multi-talent mode keeps only the first selected talent.
    pub fn set_multi_talent(&mut self, multi: bool) {
        self.multi_talent = multi;
        if !multi {
            self.talents.truncate(1);
        }
    }

    /// In multi-talent mode a second click deselects; otherwise the pick
    /// replaces the current talent.
    pub fn select_talent(&mut self, talent: Talent) {
        if !self.multi_talent {
            self.talents = vec![talent];
            return;
        }
        if let Some(pos) = self.talents.iter().position(|t| t.id == talent.id) {
            self.talents.remove(pos);
        } else {
            self.talents.push(talent);
        }
    }

    pub fn remove_talent(&mut self, talent_id: i64) {
        self.talents.retain(|t| t.id != talent_id);
    }

    pub fn is_selected(&self, talent_id: i64) -> bool {
        self.talents.iter().any(|t| t.id == talent_id)
    }

    pub fn can_submit(&self) -> bool {
        !self.talents.is_empty() && self.client.is_some()
    }

    pub fn rate_cents(&self) -> Result<Option<i64>, BookingError> {
        if self.rate.trim().is_empty() {
            return Ok(None);
        }
        match parse_money_to_cents(&self.rate) {
            Some(cents) if cents >= 0 => Ok(Some(cents)),
            Some(_) => Err(BookingError::validation("rate cannot be negative")),
            None => Err(BookingError::validation(format!("'{}' is not a valid rate", self.rate))),
        }
    }

    /// Zero when the rate is blank, invalid, or too large to take a share of.
    pub fn commission_cents(&self) -> i64 {
        self.rate_cents()
            .ok()
            .flatten()
            .and_then(|cents| cents.checked_mul(COMMISSION_PERCENT))
            .map(|share| share / 100)
            .unwrap_or(0)
    }

    fn optional(value: &str) -> Option<String> {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn client_or_err(&self) -> Result<&ClientRef, BookingError> {
        self.client
            .as_ref()
            .ok_or_else(|| BookingError::validation("select a client"))
    }

    /// One creation request per selected talent; every other field is
    /// shared.
    pub fn payloads(&self) -> Result<Vec<CreateBookingPayload>, BookingError> {
        if self.talents.is_empty() {
            return Err(BookingError::validation("select at least one talent"));
        }
        let client = self.client_or_err()?;
        let rate_cents = self.rate_cents()?;

        self.talents
            .iter()
            .map(|talent| {
                let payload = CreateBookingPayload {
                    booking_type: self.booking_type,
                    status: self.status,
                    talent_id: talent.id,
                    talent_name: talent.name.clone(),
                    client_id: client.id,
                    client_name: client.company.clone(),
                    date: self.date,
                    all_day: self.all_day,
                    call_time: Self::optional(&self.call_time),
                    wrap_time: Self::optional(&self.wrap_time),
                    location: self.location.trim().to_string(),
                    location_notes: Self::optional(&self.location_notes),
                    rate_cents,
                    currency: self.currency,
                    rate_type: self.rate_type,
                    usage_terms: Self::optional(&self.usage_terms),
                    usage_duration: Self::optional(&self.usage_duration),
                    exclusive: self.exclusive,
                    notes: Self::optional(&self.notes),
                    industries: self.industries.clone(),
                    notify: self.notify,
                }
                .normalized();
                payload.validate()?;
                Ok(payload)
            })
            .collect()
    }

    /// Patch for the booking being edited, carrying the first talent. Every
    /// editable field is sent, so a field left blank clears the stored value.
    pub fn update_payload(&self) -> Result<UpdateBookingPayload, BookingError> {
        let talent = self
            .talents
            .first()
            .ok_or_else(|| BookingError::validation("select at least one talent"))?;
        let client = self.client_or_err()?;
        let (call_time, wrap_time) = if self.all_day {
            (ALL_DAY_CALL_TIME.to_string(), ALL_DAY_WRAP_TIME.to_string())
        } else {
            (self.call_time.clone(), self.wrap_time.clone())
        };
        Ok(UpdateBookingPayload {
            booking_type: Some(self.booking_type),
            status: Some(self.status),
            talent_id: Some(talent.id),
            talent_name: Some(talent.name.clone()),
            client_id: FieldPatch::from_edited(client.id),
            client_name: Some(client.company.clone()),
            date: Some(self.date),
            all_day: Some(self.all_day),
            call_time: FieldPatch::from_edited(Self::optional(&call_time)),
            wrap_time: FieldPatch::from_edited(Self::optional(&wrap_time)),
            location: Some(self.location.trim().to_string()),
            location_notes: FieldPatch::from_edited(Self::optional(&self.location_notes)),
            rate_cents: FieldPatch::from_edited(self.rate_cents()?),
            currency: Some(self.currency),
            rate_type: Some(self.rate_type),
            usage_terms: FieldPatch::from_edited(Self::optional(&self.usage_terms)),
            usage_duration: FieldPatch::from_edited(Self::optional(&self.usage_duration)),
            exclusive: Some(self.exclusive),
            notes: FieldPatch::from_edited(Self::optional(&self.notes)),
        })
    }

    pub fn talent_names(&self) -> String {
        self.talents
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn success_message(&self) -> String {
        let verb = if self.mode == BookingMode::Edit {
            "updated"
        } else {
            "scheduled"
        };
        format!(
            "Successfully {} {} for {} on {}.",
            verb,
            self.booking_type.as_str(),
            self.talent_names(),
            self.date.format("%Y-%m-%d")
        )
    }
}

/// Clients whose company contains `query`, ignoring case.
pub fn filter_clients<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    let query = query.trim().to_lowercase();
    clients
        .iter()
        .filter(|c| c.company.to_lowercase().contains(&query))
        .collect()
}

/// Tracks the latest scheduled search so late timers can tell they are
/// stale.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Debounce {
    generation: u64,
}

impl Debounce {
    pub fn schedule(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation == ticket
    }

    /// Results to show for a finished search, or `None` when a newer search
    /// was scheduled. A failed search shows nothing.
    pub fn settle<T, E>(&self, ticket: u64, outcome: Result<Vec<T>, E>) -> Option<Vec<T>> {
        self.is_current(ticket).then(|| outcome.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::{booking_on, client_named, talent};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ready_form() -> BookingForm {
        let mut form = BookingForm::blank(d(2026, 1, 12));
        form.client = Some(ClientRef {
            id: Some(3),
            company: "Nike".into(),
        });
        form.rate = "1500".into();
        form
    }

    // -- modes ---------------------------------------------------------

    #[test]
    fn labels_follow_mode() {
        assert_eq!(BookingMode::Edit.title(), "Edit Booking");
        assert_eq!(BookingMode::Duplicate.title(), "New Booking");
        assert_eq!(BookingMode::Edit.submit_label(BookingType::Casting), "Update Booking");
        assert_eq!(
            BookingMode::New.submit_label(BookingType::TestShoot),
            "Save as Test Shoot"
        );
    }

    #[test]
    fn edit_keeps_id_and_duplicate_drops_it() {
        let mut booking = booking_on(42, "2026-01-15");
        booking.status = BookingStatus::Confirmed;
        booking.rate_cents = Some(150_050);

        let edit = BookingForm::for_mode(BookingMode::Edit, Some(&booking), d(2026, 1, 1));
        assert_eq!(edit.editing_id, Some(42));
        assert_eq!(edit.status, BookingStatus::Confirmed);
        assert_eq!(edit.rate, "1500.50");
        assert_eq!(edit.talents.len(), 1);

        let dup = BookingForm::for_mode(BookingMode::Duplicate, Some(&booking), d(2026, 1, 1));
        assert_eq!(dup.editing_id, None);
        assert_eq!(dup.status, BookingStatus::Pending);
        assert_eq!(dup.date, booking.date);
    }

    #[test]
    fn new_mode_ignores_source_booking() {
        let booking = booking_on(42, "2026-01-15");
        let form = BookingForm::for_mode(BookingMode::New, Some(&booking), d(2026, 3, 1));
        assert!(form.talents.is_empty());
        assert_eq!(form.date, d(2026, 3, 1));
    }

    // -- all-day -------------------------------------------------------

    #[test]
    fn all_day_is_a_one_way_sync() {
        let mut form = ready_form();
        form.call_time = "10:30".into();
        form.wrap_time = "14:00".into();

        form.set_all_day(true);
        assert_eq!(form.call_time, "00:00");
        assert_eq!(form.wrap_time, "23:59");

        form.set_all_day(false);
        assert_eq!(form.call_time, "00:00");
        assert_eq!(form.wrap_time, "23:59");
    }

    // -- talent selection ----------------------------------------------

    #[test]
    fn single_mode_replaces_talent() {
        let mut form = ready_form();
        form.select_talent(talent(1, "Emma"));
        form.select_talent(talent(2, "Milan"));
        assert_eq!(form.talent_names(), "Milan");
    }

    #[test]
    fn multi_mode_toggles_and_turning_off_keeps_first() {
        let mut form = ready_form();
        form.set_multi_talent(true);
        form.select_talent(talent(1, "Emma"));
        form.select_talent(talent(2, "Milan"));
        form.select_talent(talent(3, "Julia"));
        form.select_talent(talent(2, "Milan"));
        assert_eq!(form.talent_names(), "Emma, Julia");

        form.set_multi_talent(false);
        assert_eq!(form.talent_names(), "Emma");
    }

    // -- submission payloads -------------------------------------------

    #[test]
    fn submit_needs_talent_and_client() {
        let mut form = BookingForm::blank(d(2026, 1, 12));
        assert!(!form.can_submit());
        form.select_talent(talent(1, "Emma"));
        assert!(!form.can_submit());
        form.client = Some(ClientRef {
            id: Some(3),
            company: "Nike".into(),
        });
        assert!(form.can_submit());
    }

    #[test]
    fn two_talents_give_two_payloads_with_shared_fields() {
        let mut form = ready_form();
        form.set_multi_talent(true);
        form.select_talent(talent(1, "Emma"));
        form.select_talent(talent(2, "Milan"));

        let payloads = form.payloads().unwrap();
        assert_eq!(payloads.len(), 2);
        assert_ne!(payloads[0].talent_id, payloads[1].talent_id);
        for p in &payloads {
            assert_eq!(p.date, d(2026, 1, 12));
            assert_eq!(p.client_id, Some(3));
            assert_eq!(p.rate_cents, Some(150_000));
        }
    }

    #[test]
    fn bad_rate_blocks_payloads() {
        let mut form = ready_form();
        form.select_talent(talent(1, "Emma"));
        form.rate = "-5".into();
        assert!(matches!(form.payloads(), Err(BookingError::ValidationFailed(_))));
    }

    #[test]
    fn commission_is_twenty_percent() {
        let form = ready_form();
        assert_eq!(form.commission_cents(), 30_000);
        let blank = BookingForm::blank(d(2026, 1, 1));
        assert_eq!(blank.commission_cents(), 0);
    }

    #[test]
    fn oversize_rate_is_rejected_without_overflow() {
        let mut form = ready_form();
        form.select_talent(talent(1, "Emma"));

        form.rate = "10000000000000000".into();
        assert_eq!(form.rate_cents(), Ok(Some(1_000_000_000_000_000_000)));
        assert_eq!(form.commission_cents(), 0);

        form.rate = "922337203685477581".into();
        assert!(matches!(form.rate_cents(), Err(BookingError::ValidationFailed(_))));
        assert_eq!(form.commission_cents(), 0);
        assert!(form.payloads().is_err());
    }

    #[test]
    fn update_payload_forces_full_day_times() {
        let mut form = ready_form();
        form.select_talent(talent(1, "Emma"));
        form.all_day = true;
        form.call_time = "08:00".into();
        let patch = form.update_payload().unwrap();
        assert_eq!(patch.call_time, FieldPatch::Set("00:00".to_string()));
        assert_eq!(patch.wrap_time, FieldPatch::Set("23:59".to_string()));
        assert_eq!(patch.talent_id, Some(1));
    }

    #[test]
    fn blanked_fields_are_cleared_on_edit() {
        let mut booking = booking_on(42, "2026-01-15");
        booking.notes = Some("bring heels".into());
        booking.rate_cents = Some(150_000);
        booking.usage_terms = Some("print".into());
        booking.location_notes = Some("side door".into());

        let mut form = BookingForm::for_mode(BookingMode::Edit, Some(&booking), d(2026, 1, 1));
        form.notes.clear();
        form.rate = "  ".into();
        form.usage_terms.clear();

        form.update_payload().unwrap().apply(&mut booking).unwrap();
        assert_eq!(booking.notes, None);
        assert_eq!(booking.rate_cents, None);
        assert_eq!(booking.usage_terms, None);
        assert_eq!(booking.location_notes.as_deref(), Some("side door"));
    }

    #[test]
    fn success_message_lists_talents() {
        let mut form = ready_form();
        form.set_multi_talent(true);
        form.select_talent(talent(1, "Emma"));
        form.select_talent(talent(2, "Milan"));
        assert_eq!(
            form.success_message(),
            "Successfully scheduled confirmed for Emma, Milan on 2026-01-12."
        );
    }

    // -- helpers -------------------------------------------------------

    #[test]
    fn client_filter_is_case_insensitive_substring() {
        let clients = vec![client_named(1, "Nike"), client_named(2, "Vogue Paris")];
        let hits: Vec<i64> = filter_clients(&clients, "PAR").iter().map(|c| c.id).collect();
        assert_eq!(hits, vec![2]);
        assert_eq!(filter_clients(&clients, "").len(), 2);
    }

    #[test]
    fn only_latest_debounce_ticket_is_current() {
        let mut debounce = Debounce::default();
        let first = debounce.schedule();
        let second = debounce.schedule();
        assert!(!debounce.is_current(first));
        assert!(debounce.is_current(second));
    }

    #[test]
    fn stale_search_results_are_dropped_even_on_failure() {
        let mut debounce = Debounce::default();
        let first = debounce.schedule();
        let second = debounce.schedule();

        assert_eq!(debounce.settle::<Talent, &str>(first, Err("timeout")), None);
        assert_eq!(debounce.settle::<Talent, &str>(first, Ok(vec![talent(1, "Emma")])), None);
        assert_eq!(
            debounce.settle::<Talent, &str>(second, Ok(vec![talent(2, "Milan")])),
            Some(vec![talent(2, "Milan")])
        );
        assert_eq!(debounce.settle::<Talent, &str>(second, Err("timeout")), Some(vec![]));
    }
}
