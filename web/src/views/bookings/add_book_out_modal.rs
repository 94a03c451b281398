use booking_types::{BookOutReason, NewBookOut};
use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::state::use_bookings_data;
use crate::components::{use_toaster, ModalShell, Toast};
use crate::server::{booking_error, create_book_out};

fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[component]
pub fn AddBookOutModal(show: RwSignal<bool>) -> impl IntoView {
    let data = use_bookings_data();
    let toaster = use_toaster();

    let reason = RwSignal::new(BookOutReason::Personal);
    let talent_id = RwSignal::new(String::new());
    let start_date = RwSignal::new(String::new());
    let end_date = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let notify_talent = RwSignal::new(false);
    let saving = RwSignal::new(false);

    let reset = move || {
        reason.set(BookOutReason::Personal);
        talent_id.set(String::new());
        start_date.set(String::new());
        end_date.set(String::new());
        notes.set(String::new());
        notify_talent.set(false);
    };

    let draft = move || -> Option<NewBookOut> {
        Some(NewBookOut {
            talent_id: talent_id.get().parse().ok()?,
            reason: reason.get(),
            start_date: parse_day(&start_date.get())?,
            end_date: parse_day(&end_date.get())?,
            notes: Some(notes.get().trim().to_string()).filter(|n| !n.is_empty()),
        })
    };

    let save = move |_| {
        let Some(book_out) = draft() else {
            return;
        };
        if let Err(e) = book_out.validate() {
            toaster.push(Toast::error("Invalid book-out", e.detail()));
            return;
        }
        saving.set(true);
        let token = data.token();
        spawn_local(async move {
            match create_book_out(token, book_out).await.map_err(booking_error) {
                Ok(created) => {
                    toaster.push(Toast::success(
                        "Book-out added",
                        format!("{} is now marked unavailable.", created.start_date.format("%b %-d, %Y")),
                    ));
                    data.push_book_out(created);
                    reset();
                    show.set(false);
                }
                Err(e) => toaster.push(Toast::error("Failed to add book-out", e.detail())),
            }
            saving.set(false);
        });
    };

    view! {
        <ModalShell
            show=show
            title=Signal::derive(|| "Talent Availability & Book-Outs".to_string())
            subtitle=Signal::derive(|| "Manage when talent is unavailable for bookings".to_string())
        >
            <div class="book-out-form">
                <div class="form-field">
                    <label>"Reason *"</label>
                    <select
                        prop:value=move || reason.get().as_str()
                        on:change=move |ev| {
                            if let Some(r) = BookOutReason::parse(&event_target_value(&ev)) {
                                reason.set(r);
                            }
                        }
                    >
                        {BookOutReason::ALL
                            .iter()
                            .map(|r| view! { <option value=r.as_str() class="capitalize">{r.label()}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-field">
                    <label>"Talent *"</label>
                    <select
                        prop:value=move || talent_id.get()
                        on:change=move |ev| talent_id.set(event_target_value(&ev))
                    >
                        <option value="">"Select talent"</option>
                        {move || data.talents
                            .get()
                            .into_iter()
                            .map(|t| view! { <option value=t.id.to_string()>{t.name}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-row">
                    <div class="form-field">
                        <label>"Start Date *"</label>
                        <input
                            type="date"
                            prop:value=move || start_date.get()
                            on:change=move |ev| start_date.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-field">
                        <label>"End Date *"</label>
                        <input
                            type="date"
                            prop:value=move || end_date.get()
                            on:change=move |ev| end_date.set(event_target_value(&ev))
                        />
                    </div>
                </div>

                <div class="form-field">
                    <label>"Notes"</label>
                    <textarea
                        placeholder="Additional details..."
                        prop:value=move || notes.get()
                        on:input=move |ev| notes.set(event_target_value(&ev))
                    ></textarea>
                </div>

                <label class="inline-check">
                    <input
                        type="checkbox"
                        prop:checked=move || notify_talent.get()
                        on:change=move |ev| notify_talent.set(event_target_checked(&ev))
                    />
                    "Notify talent via email"
                </label>
            </div>

            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| show.set(false)>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || saving.get() || draft().is_none())
                    on_click=save
                >
                    "Save Book-Out"
                </Button>
            </div>
        </ModalShell>
    }
}
