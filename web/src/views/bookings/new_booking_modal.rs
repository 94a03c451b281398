use std::time::Duration;

use booking_types::{
    Booking, BookingStatus, BookingType, Client, Currency, NewClient, RateType, Talent,
    UploadedFile,
};
use chrono::NaiveDate;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::add_client_modal::ClientFields;
use super::state::use_bookings_data;
use crate::components::{use_toaster, ModalShell, Toast};
use crate::server::{booking_error, get_agency_talents};
use crate::server_clients::create_agency_client;
use crate::utils::availability::is_booked_out;
use crate::utils::booking_form::{
    filter_clients, BookingForm, BookingMode, ClientRef, Debounce, CLOSE_AFTER_SUCCESS_MS,
    COMMISSION_PERCENT, TALENT_SEARCH_DEBOUNCE_MS, USAGE_DURATIONS, USAGE_TERMS,
};
use crate::utils::files::format_size;
use crate::utils::gateway::ServerGateway;
use crate::utils::money::format_cents;
use crate::utils::submission::submit_bookings;
use crate::utils::time_format::today;

/// Booking form shared by new, edit and duplicate. The form is rebuilt from
/// `mode` and `source` every time the modal opens.
#[component]
pub fn NewBookingModal(
    show: RwSignal<bool>,
    mode: RwSignal<BookingMode>,
    source: RwSignal<Option<Booking>>,
    default_date: Signal<NaiveDate>,
) -> impl IntoView {
    let data = use_bookings_data();
    let toaster = use_toaster();

    let form = RwSignal::new(BookingForm::blank(today()));
    let files = RwSignal::new(Vec::<UploadedFile>::new());
    let submitting = RwSignal::new(false);

    let talent_query = RwSignal::new(String::new());
    let talent_results = RwSignal::new(Vec::<Talent>::new());
    let debounce = StoredValue::new(Debounce::default());

    let client_query = RwSignal::new(String::new());
    let show_add_client = RwSignal::new(false);
    let new_client = RwSignal::new(NewClient::default());
    let saving_client = RwSignal::new(false);

    Effect::new(move |_| {
        if show.get() {
            let fresh = source.with_untracked(|s| {
                BookingForm::for_mode(mode.get_untracked(), s.as_ref(), default_date.get_untracked())
            });
            form.set(fresh);
            files.set(Vec::new());
            client_query.set(String::new());
            show_add_client.set(false);
            talent_query.set(String::new());
        }
    });

    // Each keystroke restarts the delay; only the latest search may land.
    Effect::new(move |_| {
        let query = talent_query.get();
        if !show.get_untracked() {
            return;
        }
        let mut ticket = 0;
        debounce.update_value(|d| ticket = d.schedule());

        set_timeout(
            move || {
                if !debounce.with_value(|d| d.is_current(ticket)) {
                    return;
                }
                let token = data.token();
                spawn_local(async move {
                    let q = Some(query.trim().to_string()).filter(|q| !q.is_empty());
                    let outcome = get_agency_talents(token, q).await;
                    if let Err(e) = &outcome {
                        warn!("talent search failed: {}", e);
                    }
                    if let Some(list) = debounce.with_value(|d| d.settle(ticket, outcome)) {
                        talent_results.set(list);
                    }
                });
            },
            Duration::from_millis(TALENT_SEARCH_DEBOUNCE_MS),
        );
    });

    let matching_clients = Memo::new(move |_| {
        let query = client_query.get();
        data.clients.with(|clients| {
            filter_clients(clients, &query)
                .into_iter()
                .cloned()
                .collect::<Vec<Client>>()
        })
    });

    let save_new_client = move |_| {
        let body = new_client.get_untracked();
        if let Err(e) = body.validate() {
            toaster.push(Toast::error("Missing information", e.detail()));
            return;
        }
        saving_client.set(true);
        let token = data.token();
        spawn_local(async move {
            match create_agency_client(token, body).await.map_err(booking_error) {
                Ok(client) => {
                    form.update(|f| f.client = Some(ClientRef::from(&client)));
                    toaster.push(Toast::success(
                        "Client created",
                        format!("{} was added to your clients.", client.company),
                    ));
                    data.upsert_client(client);
                    new_client.set(NewClient::default());
                    show_add_client.set(false);
                }
                Err(e) => toaster.push(Toast::error("Failed to create client", e.detail())),
            }
            saving_client.set(false);
        });
    };

    let submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        if !current.can_submit() {
            return;
        }
        submitting.set(true);
        let uploads = files.get_untracked();
        let gateway = ServerGateway { token: data.token() };

        spawn_local(async move {
            match submit_bookings(&gateway, &current, uploads).await {
                Ok(outcome) => {
                    toaster.push(outcome.toast(&current));
                    let saved: Vec<Booking> = outcome
                        .updated
                        .iter()
                        .chain(outcome.created.iter())
                        .cloned()
                        .collect();
                    if !saved.is_empty() {
                        for booking in saved {
                            data.upsert_booking(booking);
                        }
                        data.reload_clients();
                    }
                    if outcome.is_success() {
                        set_timeout(
                            move || show.set(false),
                            Duration::from_millis(CLOSE_AFTER_SUCCESS_MS),
                        );
                    }
                }
                Err(e) => toaster.push(Toast::error(e.toast_title(), e.detail())),
            }
            submitting.set(false);
        });
    };

    let on_files_selected = move |ev: web_sys::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let input = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
            if let Some(list) = input.and_then(|i| i.files()) {
                spawn_local(async move {
                    let read = crate::utils::files::read_selected_files(&list).await;
                    files.update(|f| f.extend(read));
                });
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let title = Signal::derive(move || mode.get().title().to_string());
    let subtitle = Signal::derive(move || mode.get().subtitle().to_string());

    view! {
        <ModalShell show=show title=title subtitle=subtitle wide=true>
            <div class="booking-form">
                <div class="form-field">
                    <label>"Booking Type *"</label>
                    <select
                        prop:value=move || form.with(|f| f.booking_type.as_str())
                        on:change=move |ev| {
                            let Ok(t) = event_target_value(&ev).parse::<BookingType>();
                            form.update(|f| f.booking_type = t);
                        }
                    >
                        {BookingType::SELECTABLE
                            .iter()
                            .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                            .collect_view()}
                    </select>
                </div>

                {move || (form.with(|f| f.mode) == BookingMode::Edit).then(|| view! {
                    <div class="form-field">
                        <label>"Status"</label>
                        <select
                            prop:value=move || form.with(|f| f.status.as_str())
                            on:change=move |ev| {
                                if let Ok(s) = event_target_value(&ev).parse::<BookingStatus>() {
                                    form.update(|f| f.status = s);
                                }
                            }
                        >
                            {BookingStatus::ALL
                                .iter()
                                .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                })}

                <div class="form-section">
                    <div class="form-section-header">
                        <label>"Talent *"</label>
                        <label class="inline-check">
                            <input
                                type="checkbox"
                                prop:checked=move || form.with(|f| f.multi_talent)
                                on:change=move |ev| form.update(|f| f.set_multi_talent(event_target_checked(&ev)))
                            />
                            "Book multiple talent"
                        </label>
                    </div>
                    <Input value=talent_query placeholder="Search talent by name..."/>

                    <div class="selected-talents">
                        {move || form.with(|f| f.talents.clone())
                            .into_iter()
                            .map(|talent| {
                                let id = talent.id;
                                view! {
                                    <span class="talent-chip">
                                        {talent.name}
                                        <button type="button" on:click=move |_| form.update(|f| f.remove_talent(id))>
                                            "×"
                                        </button>
                                    </span>
                                }
                            })
                            .collect_view()}
                    </div>

                    <div class="talent-options">
                        {move || {
                            let date = form.with(|f| f.date);
                            talent_results
                                .get()
                                .into_iter()
                                .map(|talent| {
                                    let id = talent.id;
                                    let name = talent.name.clone();
                                    let booked_out = data.book_outs.with(|b| is_booked_out(b, id, date));
                                    view! {
                                        <button
                                            type="button"
                                            class=move || {
                                                if form.with(|f| f.is_selected(id)) {
                                                    "talent-option selected"
                                                } else {
                                                    "talent-option"
                                                }
                                            }
                                            on:click=move |_| {
                                                let talent = talent.clone();
                                                form.update(|f| f.select_talent(talent));
                                            }
                                        >
                                            <span>{name}</span>
                                            {booked_out.then(|| view! {
                                                <span class="badge badge-danger">"Unavailable"</span>
                                            })}
                                        </button>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </div>

                <div class="form-section">
                    <label>"Client *"</label>
                    {move || {
                        if show_add_client.get() {
                            view! {
                                <div class="inline-client-form">
                                    <h4>"New Client"</h4>
                                    <ClientFields client=new_client compact=true/>
                                    <div class="inline-actions">
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| show_add_client.set(false)
                                        >
                                            "Cancel"
                                        </Button>
                                        <Button
                                            appearance=ButtonAppearance::Primary
                                            disabled=Signal::derive(move || {
                                                saving_client.get() || !new_client.with(NewClient::is_complete)
                                            })
                                            on_click=save_new_client
                                        >
                                            "Save Client"
                                        </Button>
                                    </div>
                                </div>
                            }
                            .into_any()
                        } else {
                            view! {
                                <div class="client-picker">
                                    {move || form.with(|f| f.client.clone()).map(|client| view! {
                                        <div class="selected-client">
                                            <strong>{client.company}</strong>
                                            <button type="button" on:click=move |_| form.update(|f| f.client = None)>
                                                "Change"
                                            </button>
                                        </div>
                                    })}
                                    <Input value=client_query placeholder="Search client by name..."/>
                                    <div class="client-options">
                                        {move || matching_clients
                                            .get()
                                            .into_iter()
                                            .map(|client| {
                                                let company = client.company.clone();
                                                let count = client.bookings_count;
                                                view! {
                                                    <button
                                                        type="button"
                                                        class="client-option"
                                                        on:click=move |_| form.update(|f| f.client = Some(ClientRef::from(&client)))
                                                    >
                                                        <span>{company}</span>
                                                        <span class="muted">{format!("{} bookings", count)}</span>
                                                    </button>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                    <Button
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| show_add_client.set(true)
                                    >
                                        "+ Add New Client"
                                    </Button>
                                </div>
                            }
                            .into_any()
                        }
                    }}
                </div>

                <div class="form-row">
                    <div class="form-field">
                        <label>"Date *"</label>
                        <input
                            type="date"
                            prop:value=move || form.with(|f| f.date.format("%Y-%m-%d").to_string())
                            on:change=move |ev| {
                                if let Ok(date) = NaiveDate::parse_from_str(&event_target_value(&ev), "%Y-%m-%d") {
                                    form.update(|f| f.date = date);
                                }
                            }
                        />
                    </div>
                    <label class="inline-check">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.all_day)
                            on:change=move |ev| form.update(|f| f.set_all_day(event_target_checked(&ev)))
                        />
                        "All day"
                    </label>
                    <div class="form-field">
                        <label>"Call Time"</label>
                        <input
                            type="time"
                            prop:disabled=move || form.with(|f| f.all_day)
                            prop:value=move || form.with(|f| f.call_time.clone())
                            on:input=move |ev| form.update(|f| f.call_time = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-field">
                        <label>"Wrap Time"</label>
                        <input
                            type="time"
                            prop:disabled=move || form.with(|f| f.all_day)
                            prop:value=move || form.with(|f| f.wrap_time.clone())
                            on:input=move |ev| form.update(|f| f.wrap_time = event_target_value(&ev))
                        />
                    </div>
                </div>

                <div class="form-field">
                    <label>"Location *"</label>
                    <input
                        type="text"
                        placeholder="Enter address..."
                        prop:value=move || form.with(|f| f.location.clone())
                        on:input=move |ev| form.update(|f| f.location = event_target_value(&ev))
                    />
                </div>
                <div class="form-field">
                    <label>"Location Notes"</label>
                    <input
                        type="text"
                        placeholder="e.g., Studio B, 3rd floor"
                        prop:value=move || form.with(|f| f.location_notes.clone())
                        on:input=move |ev| form.update(|f| f.location_notes = event_target_value(&ev))
                    />
                </div>

                <div class="form-row">
                    <div class="form-field">
                        <label>"Rate/Fee"</label>
                        <input
                            type="text"
                            inputmode="decimal"
                            placeholder="0.00"
                            prop:value=move || form.with(|f| f.rate.clone())
                            on:input=move |ev| form.update(|f| f.rate = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-field">
                        <label>"Currency"</label>
                        <select
                            prop:value=move || form.with(|f| f.currency.code())
                            on:change=move |ev| {
                                if let Ok(c) = event_target_value(&ev).parse::<Currency>() {
                                    form.update(|f| f.currency = c);
                                }
                            }
                        >
                            {Currency::ALL
                                .iter()
                                .map(|c| view! { <option value=c.code()>{c.code()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-field">
                        <label>"Rate Type"</label>
                        <select
                            prop:value=move || form.with(|f| f.rate_type.as_str())
                            on:change=move |ev| {
                                if let Ok(r) = event_target_value(&ev).parse::<RateType>() {
                                    form.update(|f| f.rate_type = r);
                                }
                            }
                        >
                            {RateType::ALL
                                .iter()
                                .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                </div>

                {move || {
                    let (commission, currency) = form.with(|f| (f.commission_cents(), f.currency));
                    (commission > 0).then(|| view! {
                        <div class="commission-preview">
                            <span>{format!("Agency Commission ({}%)", COMMISSION_PERCENT)}</span>
                            <strong>{format_cents(commission, currency)}</strong>
                        </div>
                    })
                }}

                <div class="form-row">
                    <div class="form-field">
                        <label>"Usage Terms"</label>
                        <select
                            prop:value=move || form.with(|f| f.usage_terms.clone())
                            on:change=move |ev| form.update(|f| f.usage_terms = event_target_value(&ev))
                        >
                            <option value="">"Select usage terms"</option>
                            {USAGE_TERMS
                                .iter()
                                .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-field">
                        <label>"Usage Duration"</label>
                        <select
                            prop:value=move || form.with(|f| f.usage_duration.clone())
                            on:change=move |ev| form.update(|f| f.usage_duration = event_target_value(&ev))
                        >
                            <option value="">"Select duration"</option>
                            {USAGE_DURATIONS
                                .iter()
                                .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <label class="inline-check">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.exclusive)
                            on:change=move |ev| form.update(|f| f.exclusive = event_target_checked(&ev))
                        />
                        "Exclusive"
                    </label>
                </div>

                <div class="form-field">
                    <label>"Attached Files (Call sheets, contracts, references)"</label>
                    <input type="file" multiple=true on:change=on_files_selected/>
                    <ul class="file-list">
                        {move || files
                            .get()
                            .into_iter()
                            .enumerate()
                            .map(|(index, file)| view! {
                                <li>
                                    <span>{file.file_name}</span>
                                    <span class="muted">{format_size(file.bytes.len())}</span>
                                    <button
                                        type="button"
                                        on:click=move |_| files.update(|f| {
                                            if index < f.len() {
                                                f.remove(index);
                                            }
                                        })
                                    >
                                        "×"
                                    </button>
                                </li>
                            })
                            .collect_view()}
                    </ul>
                </div>

                <div class="form-field">
                    <label>"Special Instructions / Notes"</label>
                    <textarea
                        placeholder="Internal notes, special instructions..."
                        prop:value=move || form.with(|f| f.notes.clone())
                        on:input=move |ev| form.update(|f| f.notes = event_target_value(&ev))
                    ></textarea>
                </div>

                <div class="form-section notify-options">
                    <label>"Notifications"</label>
                    <label class="inline-check">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.notify.email)
                            on:change=move |ev| form.update(|f| f.notify.email = event_target_checked(&ev))
                        />
                        "Email talent"
                    </label>
                    <label class="inline-check">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.notify.sms)
                            on:change=move |ev| form.update(|f| f.notify.sms = event_target_checked(&ev))
                        />
                        "SMS talent"
                    </label>
                    <label class="inline-check">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.notify.push)
                            on:change=move |ev| form.update(|f| f.notify.push = event_target_checked(&ev))
                        />
                        "Push notification (mobile app)"
                    </label>
                    <label class="inline-check">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.notify.calendar)
                            on:change=move |ev| form.update(|f| f.notify.calendar = event_target_checked(&ev))
                        />
                        "Send calendar invite (.ics file)"
                    </label>
                </div>
            </div>

            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| show.set(false)>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || submitting.get() || !form.with(BookingForm::can_submit))
                    on_click=submit
                >
                    {move || {
                        if submitting.get() {
                            "Saving...".to_string()
                        } else {
                            form.with(|f| f.mode.submit_label(f.booking_type))
                        }
                    }}
                </Button>
            </div>
        </ModalShell>
    }
}
