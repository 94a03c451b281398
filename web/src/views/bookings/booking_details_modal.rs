use booking_types::{Booking, BookingError, BookingStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::state::use_bookings_data;
use crate::components::{use_toaster, ModalShell, Toast};
use crate::server::{booking_error, cancel_booking, complete_booking};
use crate::utils::calendar::booking_color;
use crate::utils::dialog::confirm;
use crate::utils::money::format_cents;
use crate::utils::time_format::{long_date, time_range_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusAction {
    Cancel,
    Complete,
}

impl StatusAction {
    fn prompt(&self) -> &'static str {
        match self {
            Self::Cancel => "Are you sure you want to cancel this booking?\nThis action cannot be undone.",
            Self::Complete => "Mark this booking as completed?\nThe status will be updated to Completed.",
        }
    }

    fn done_title(&self) -> &'static str {
        match self {
            Self::Cancel => "Booking cancelled",
            Self::Complete => "Booking marked as completed",
        }
    }
}

fn detail_row(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail-row">
            <span class="detail-label">{label}</span>
            <span class="detail-value">{value}</span>
        </div>
    }
}

#[component]
pub fn BookingDetailsModal(
    show: RwSignal<bool>,
    booking: RwSignal<Option<Booking>>,
    on_edit: Callback<Booking>,
    on_duplicate: Callback<Booking>,
) -> impl IntoView {
    let data = use_bookings_data();
    let toaster = use_toaster();
    let busy = RwSignal::new(false);

    let run_action = move |action: StatusAction| {
        let Some(id) = booking.with_untracked(|b| b.as_ref().map(|b| b.id)) else {
            return;
        };
        if busy.get_untracked() || !confirm(action.prompt()) {
            return;
        }
        busy.set(true);
        let token = data.token();
        spawn_local(async move {
            let result: Result<Booking, BookingError> = match action {
                StatusAction::Cancel => cancel_booking(token, id).await,
                StatusAction::Complete => complete_booking(token, id).await,
            }
            .map_err(booking_error);

            match result {
                Ok(updated) => {
                    toaster.push(Toast::success(
                        action.done_title(),
                        "The status has been successfully updated.",
                    ));
                    data.upsert_booking(updated.clone());
                    data.reload_clients();
                    booking.set(Some(updated));
                    show.set(false);
                }
                Err(e) => toaster.push(Toast::error("Update failed", e.detail())),
            }
            busy.set(false);
        });
    };

    let title = Signal::derive(|| "Booking Details".to_string());

    view! {
        <ModalShell show=show title=title>
            {move || booking.get().map(|b| {
                let chip = booking_color(&b).style();
                let rate = b
                    .rate_cents
                    .map(|cents| format!("{} / {}", format_cents(cents, b.currency), b.rate_type.label()))
                    .unwrap_or_else(|| "TBD".to_string());
                let closed = matches!(b.status, BookingStatus::Cancelled | BookingStatus::Completed);
                let for_edit = b.clone();
                let for_duplicate = b.clone();

                view! {
                    <div class="booking-details">
                        <div class="booking-details-badges">
                            <span class="badge" style=chip>{b.booking_type.label()}</span>
                            <span class=format!("badge status-{}", b.status.as_str())>{b.status.label()}</span>
                        </div>

                        <div class="booking-details-people">
                            <div>
                                <p class="detail-label">"Talent"</p>
                                <p class="detail-strong">{b.talent_name.clone()}</p>
                            </div>
                            <div>
                                <p class="detail-label">"Client"</p>
                                <p class="detail-strong">{b.client_name.clone()}</p>
                            </div>
                        </div>

                        {detail_row("Date", long_date(b.date))}
                        {detail_row("Time", time_range_label(&b))}
                        {detail_row("Location", if b.location.is_empty() { "TBD".to_string() } else { b.location.clone() })}
                        {b.location_notes.clone().map(|notes| detail_row("Location Notes", notes))}
                        {detail_row("Rate", rate)}
                        {b.usage_terms.clone().map(|terms| {
                            let duration = b.usage_duration.clone().unwrap_or_default();
                            detail_row("Usage", format!("{} {}", terms, duration).trim().to_string())
                        })}
                        {b.exclusive.then(|| detail_row("Exclusivity", "Exclusive".to_string()))}
                        {b.notes.clone().map(|notes| view! {
                            <div class="booking-notes">
                                <p class="detail-label">"Notes"</p>
                                <p>{notes}</p>
                            </div>
                        })}
                        {(!b.files.is_empty()).then(|| view! {
                            <div class="booking-files">
                                <p class="detail-label">"Files"</p>
                                <ul>
                                    {b.files
                                        .iter()
                                        .map(|f| view! { <li>{f.file_name.clone()}</li> })
                                        .collect_view()}
                                </ul>
                            </div>
                        })}

                        <div class="booking-details-actions">
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| on_edit.run(for_edit.clone())
                            >
                                "Edit"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| on_duplicate.run(for_duplicate.clone())
                            >
                                "Duplicate"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                disabled=Signal::derive(move || closed || busy.get())
                                on_click=move |_| run_action(StatusAction::Complete)
                            >
                                "Complete"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                class="danger"
                                disabled=Signal::derive(move || closed || busy.get())
                                on_click=move |_| run_action(StatusAction::Cancel)
                            >
                                "Cancel Booking"
                            </Button>
                        </div>
                    </div>
                }
            })}
        </ModalShell>
    }
}
