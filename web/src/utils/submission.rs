//! Multi-talent booking submission.
//!
//! Each selected talent gets its own request, issued one after another. A
//! failure does not stop the batch; the outcome lists what was saved and
//! what was rejected so the modal can report partial success precisely.

use booking_types::{
    Booking, BookingError, CreateBookingPayload, Talent, UpdateBookingPayload, UploadedFile,
};

use crate::components::toast::Toast;
use crate::utils::booking_form::{BookingForm, BookingMode};

/// Where booking writes go. The browser talks to the server functions; tests
/// substitute a recording fake.
#[allow(async_fn_in_trait)]
pub trait BookingGateway {
    async fn create(
        &self,
        payload: CreateBookingPayload,
        files: Vec<UploadedFile>,
    ) -> Result<Booking, BookingError>;

    async fn update(&self, id: i64, patch: UpdateBookingPayload) -> Result<Booking, BookingError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct TalentFailure {
    pub talent: Talent,
    pub error: BookingError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub created: Vec<Booking>,
    pub updated: Option<Booking>,
    pub failed: Vec<TalentFailure>,
}

impl BatchOutcome {
    pub fn saved_count(&self) -> usize {
        self.created.len() + usize::from(self.updated.is_some())
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn has_conflict(&self) -> bool {
        self.failed
            .iter()
            .any(|f| matches!(f.error, BookingError::Conflict(_)))
    }

    /// Toast for the finished batch. A booked-out talent gets the
    /// "Talent unavailable" toast; any other failure the generic one.
    pub fn toast(&self, form: &BookingForm) -> Toast {
        if self.is_success() {
            return Toast::success(form.mode.success_title(), form.success_message());
        }

        let names = self
            .failed
            .iter()
            .map(|f| f.talent.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let total = self.saved_count() + self.failed.len();
        let tally = format!("{} of {} bookings saved.", self.saved_count(), total);

        match self.failed.iter().find(|f| matches!(f.error, BookingError::Conflict(_))) {
            Some(conflict) => Toast::error(
                conflict.error.toast_title(),
                format!("{} unavailable on {}. {}", names, form.date.format("%Y-%m-%d"), tally),
            ),
            None => {
                let first = &self.failed[0].error;
                Toast::error(first.toast_title(), format!("{} {}", first.detail(), tally))
            }
        }
    }
}

/// Submits the form. Validation problems are returned before any request is
/// made; per-talent failures are collected in the outcome.
///
/// In edit mode the first talent updates the original booking and any other
/// talent gets a new booking.
pub async fn submit_bookings<G: BookingGateway>(
    gateway: &G,
    form: &BookingForm,
    files: Vec<UploadedFile>,
) -> Result<BatchOutcome, BookingError> {
    let payloads = form.payloads()?;
    let mut outcome = BatchOutcome::default();

    let mut remaining = payloads.into_iter().zip(form.talents.iter());

    if let (BookingMode::Edit, Some(id)) = (form.mode, form.editing_id) {
        let patch = form.update_payload()?;
        if let Some((_, talent)) = remaining.next() {
            match gateway.update(id, patch).await {
                Ok(booking) => outcome.updated = Some(booking),
                Err(error) => outcome.failed.push(TalentFailure {
                    talent: talent.clone(),
                    error,
                }),
            }
        }
    }

    for (payload, talent) in remaining {
        match gateway.create(payload, files.clone()).await {
            Ok(booking) => outcome.created.push(booking),
            Err(error) => outcome.failed.push(TalentFailure {
                talent: talent.clone(),
                error,
            }),
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::toast::ToastIntent;
    use crate::utils::booking_form::ClientRef;
    use crate::utils::test_support::{booking_on, talent};
    use chrono::NaiveDate;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(i64),
        Update(i64, Option<i64>),
    }

    /// Records calls and rejects the talents listed in `reject`.
    #[derive(Default)]
    struct FakeGateway {
        calls: RefCell<Vec<Call>>,
        payloads: RefCell<Vec<CreateBookingPayload>>,
        reject: Vec<(i64, BookingError)>,
    }

    impl FakeGateway {
        fn rejecting(reject: Vec<(i64, BookingError)>) -> Self {
            Self {
                reject,
                ..Default::default()
            }
        }

        fn rejection(&self, talent_id: i64) -> Option<BookingError> {
            self.reject
                .iter()
                .find(|(id, _)| *id == talent_id)
                .map(|(_, e)| e.clone())
        }
    }

    impl BookingGateway for FakeGateway {
        async fn create(
            &self,
            payload: CreateBookingPayload,
            _files: Vec<UploadedFile>,
        ) -> Result<Booking, BookingError> {
            self.calls.borrow_mut().push(Call::Create(payload.talent_id));
            self.payloads.borrow_mut().push(payload.clone());
            if let Some(err) = self.rejection(payload.talent_id) {
                return Err(err);
            }
            let mut booking = booking_on(100 + payload.talent_id, "2026-01-12");
            booking.talent_id = payload.talent_id;
            Ok(booking)
        }

        async fn update(&self, id: i64, patch: UpdateBookingPayload) -> Result<Booking, BookingError> {
            self.calls.borrow_mut().push(Call::Update(id, patch.talent_id));
            if let Some(err) = patch.talent_id.and_then(|t| self.rejection(t)) {
                return Err(err);
            }
            Ok(booking_on(id, "2026-01-12"))
        }
    }

    fn form_with(talents: &[(i64, &str)]) -> BookingForm {
        let mut form = BookingForm::blank(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
        form.client = Some(ClientRef {
            id: Some(3),
            company: "Nike".into(),
        });
        form.rate = "800".into();
        form.set_multi_talent(true);
        for (id, name) in talents {
            form.select_talent(talent(*id, name));
        }
        form
    }

    #[tokio::test]
    async fn two_talents_make_two_sequential_create_calls() {
        let gateway = FakeGateway::default();
        let form = form_with(&[(1, "Emma"), (2, "Milan")]);

        let outcome = submit_bookings(&gateway, &form, vec![]).await.unwrap();

        assert_eq!(*gateway.calls.borrow(), vec![Call::Create(1), Call::Create(2)]);
        let payloads = gateway.payloads.borrow();
        assert_eq!(payloads[0].date, payloads[1].date);
        assert_eq!(payloads[0].client_id, payloads[1].client_id);
        assert_eq!(payloads[0].rate_cents, payloads[1].rate_cents);
        assert_eq!(outcome.created.len(), 2);
        assert!(outcome.is_success());

        let toast = outcome.toast(&form);
        assert_eq!(toast.title, "Booking Created");
        assert_eq!(toast.intent, ToastIntent::Success);
    }

    #[tokio::test]
    async fn failure_mid_batch_keeps_going_and_reports_per_talent() {
        let gateway = FakeGateway::rejecting(vec![(
            2,
            BookingError::Conflict("Talent is unavailable during the selected date".into()),
        )]);
        let form = form_with(&[(1, "Emma"), (2, "Milan"), (3, "Julia")]);

        let outcome = submit_bookings(&gateway, &form, vec![]).await.unwrap();

        assert_eq!(gateway.calls.borrow().len(), 3);
        assert_eq!(outcome.created.len(), 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].talent.name, "Milan");

        let toast = outcome.toast(&form);
        assert_eq!(toast.title, "Talent unavailable");
        assert!(toast.description.contains("2 of 3 bookings saved."));
    }

    #[tokio::test]
    async fn other_failures_get_the_generic_toast() {
        let gateway =
            FakeGateway::rejecting(vec![(1, BookingError::Unknown("database unavailable".into()))]);
        let form = form_with(&[(1, "Emma")]);

        let outcome = submit_bookings(&gateway, &form, vec![]).await.unwrap();

        let toast = outcome.toast(&form);
        assert_eq!(toast.title, "Failed to create booking");
        assert!(!outcome.has_conflict());
    }

    #[tokio::test]
    async fn edit_updates_the_original_then_creates_extras() {
        let gateway = FakeGateway::default();
        let source = booking_on(42, "2026-01-12");
        let mut form = BookingForm::for_mode(BookingMode::Edit, Some(&source), source.date);
        form.set_multi_talent(true);
        form.select_talent(talent(7, "Carla"));

        let outcome = submit_bookings(&gateway, &form, vec![]).await.unwrap();

        assert_eq!(
            *gateway.calls.borrow(),
            vec![Call::Update(42, Some(source.talent_id)), Call::Create(7)]
        );
        assert!(outcome.updated.is_some());
        assert_eq!(outcome.saved_count(), 2);
        assert_eq!(outcome.toast(&form).title, "Booking Updated");
    }

    #[tokio::test]
    async fn invalid_form_makes_no_calls() {
        let gateway = FakeGateway::default();
        let mut form = form_with(&[(1, "Emma")]);
        form.client = None;

        let result = submit_bookings(&gateway, &form, vec![]).await;

        assert!(matches!(result, Err(BookingError::ValidationFailed(_))));
        assert!(gateway.calls.borrow().is_empty());
    }
}
