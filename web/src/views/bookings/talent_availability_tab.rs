use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::add_book_out_modal::AddBookOutModal;
use super::state::use_bookings_data;
use crate::components::{use_toaster, Toast};
use crate::server::{booking_error, delete_book_out};
use crate::utils::availability::{book_outs_for, date_range_label, TalentNames};
use crate::utils::dialog::confirm;

/// Book-out cards with a remove button, optionally for one talent only.
#[component]
pub fn BookOutList(
    #[prop(optional)] talent_filter: Option<Signal<Option<i64>>>,
    empty_hint: &'static str,
) -> impl IntoView {
    let data = use_bookings_data();
    let toaster = use_toaster();

    let rows = Memo::new(move |_| {
        let talent = talent_filter.and_then(|f| f.get());
        data.book_outs.with(|all| book_outs_for(all, talent))
    });

    let remove = move |id: i64| {
        if !confirm("Delete Book-Out? This action cannot be undone.") {
            return;
        }
        let token = data.token();
        spawn_local(async move {
            match delete_book_out(token, id).await.map_err(booking_error) {
                Ok(()) => data.remove_book_out(id),
                Err(e) => toaster.push(Toast::error("Remove failed", e.detail())),
            }
        });
    };

    view! {
        {move || {
            let rows = rows.get();
            if rows.is_empty() {
                return view! {
                    <div class="empty-state">
                        <div class="empty-icon">"📅"</div>
                        <h3>"No book-outs scheduled"</h3>
                        <p class="muted">{empty_hint}</p>
                    </div>
                }
                .into_any();
            }

            let names = data.talents.with(|t| TalentNames::new(t));
            view! {
                <div class="book-out-list">
                    {rows
                        .into_iter()
                        .map(|book_out| {
                            let id = book_out.id;
                            view! {
                                <div class="book-out-card">
                                    <div>
                                        <h4>{names.get(book_out.talent_id).to_string()}</h4>
                                        <p class="muted">{date_range_label(&book_out)}</p>
                                        <span class="badge badge-warning capitalize">{book_out.reason.label()}</span>
                                        {book_out.notes.map(|n| view! { <p class="book-out-notes">{n}</p> })}
                                    </div>
                                    <Button
                                        appearance=ButtonAppearance::Secondary
                                        class="danger"
                                        on_click=move |_| remove(id)
                                    >
                                        "Remove"
                                    </Button>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            }
            .into_any()
        }}
    }
}

#[component]
pub fn TalentAvailabilityTab() -> impl IntoView {
    let data = use_bookings_data();
    let show_add = RwSignal::new(false);
    let talent_filter = RwSignal::new(None::<i64>);

    view! {
        <div class="talent-availability-tab">
            <div class="tab-header">
                <div>
                    <h2>"Talent Availability"</h2>
                    <p class="muted">"Manage book-outs and talent unavailability"</p>
                </div>
                <div class="tab-header-actions">
                    <select
                        class="calendar-select"
                        on:change=move |ev| talent_filter.set(event_target_value(&ev).parse().ok())
                    >
                        <option value="">"All Talent"</option>
                        {move || data.talents
                            .get()
                            .into_iter()
                            .map(|t| view! { <option value=t.id.to_string()>{t.name}</option> })
                            .collect_view()}
                    </select>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| show_add.set(true)>
                        "+ Add Book-Out"
                    </Button>
                </div>
            </div>

            <BookOutList
                talent_filter=Signal::derive(move || talent_filter.get())
                empty_hint="Add unavailability periods for your talent"
            />

            <AddBookOutModal show=show_add/>
        </div>
    }
}
