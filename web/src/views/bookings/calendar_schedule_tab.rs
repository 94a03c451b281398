use booking_types::Booking;
use chrono::{Datelike, NaiveDate};
use leptos::ev;
use leptos::prelude::*;
use thaw::*;

use super::booking_details_modal::BookingDetailsModal;
use super::manage_availability_modal::ManageAvailabilityModal;
use super::new_booking_modal::NewBookingModal;
use super::state::use_bookings_data;
use crate::utils::booking_form::BookingMode;
use crate::utils::calendar::{
    booking_color, legend, next_day, next_month, picker_label, previous_day, previous_month,
    with_day, with_month, with_year, CalendarShortcut, MonthGrid, ScheduleStats, MONTH_NAMES,
    SELECTABLE_YEARS, WEEKDAY_LABELS,
};
use crate::utils::time_format::today;

// Every view mode renders the month grid.
const VIEW_MODES: [(&str, &str); 5] = [
    ("month", "Month"),
    ("week", "Week"),
    ("day", "Day"),
    ("team", "Team View"),
    ("agenda", "Agenda"),
];

const TALENT_SCOPES: [(&str, &str); 3] = [
    ("single", "Single View"),
    ("all", "All Talent"),
    ("selected", "Selected Talent"),
];

/// Tag name of the focused element, used to keep shortcuts out of text fields.
fn focused_tag() -> Option<String> {
    document().active_element().map(|el| el.tag_name())
}

#[component]
pub fn CalendarScheduleTab() -> impl IntoView {
    let data = use_bookings_data();

    let current_date = RwSignal::new(today());
    let view_mode = RwSignal::new("month".to_string());
    let talent_scope = RwSignal::new("all".to_string());

    let show_new_booking = RwSignal::new(false);
    let show_details = RwSignal::new(false);
    let show_availability = RwSignal::new(false);
    let booking_mode = RwSignal::new(BookingMode::New);
    let selected_booking = RwSignal::new(None::<Booking>);

    let grid = Memo::new(move |_| {
        let date = current_date.get();
        data.bookings.with(|bookings| {
            data.book_outs
                .with(|book_outs| MonthGrid::build(date, today(), bookings, book_outs))
        })
    });
    let stats = Memo::new(move |_| data.bookings.with(|b| ScheduleStats::compute(b, today())));

    let open_new_booking = move || {
        booking_mode.set(BookingMode::New);
        selected_booking.set(None);
        show_new_booking.set(true);
    };

    let open_with_mode = move |mode: BookingMode, booking: Booking| {
        selected_booking.set(Some(booking));
        booking_mode.set(mode);
        show_details.set(false);
        show_new_booking.set(true);
    };

    let keydown = window_event_listener(ev::keydown, move |ev| {
        let tag = focused_tag();
        let Some(shortcut) = CalendarShortcut::from_key(&ev.key(), tag.as_deref()) else {
            return;
        };
        match shortcut {
            CalendarShortcut::NewBooking => {
                ev.prevent_default();
                open_new_booking();
            }
            CalendarShortcut::Today => current_date.set(today()),
            CalendarShortcut::PreviousDay => current_date.update(|d| *d = previous_day(*d)),
            CalendarShortcut::NextDay => current_date.update(|d| *d = next_day(*d)),
            CalendarShortcut::CloseModals => {
                show_new_booking.set(false);
                show_details.set(false);
                show_availability.set(false);
            }
        }
    });
    on_cleanup(move || keydown.remove());

    let stat_card = move |label: &'static str, value: Signal<usize>| {
        view! {
            <div class="stat-card">
                <p class="stat-label">{label}</p>
                <p class="stat-value">{move || value.get()}</p>
            </div>
        }
    };

    view! {
        <div class="calendar-schedule-tab">
            <div class="tab-header">
                <div>
                    <h2>"Bookings & Schedule"</h2>
                    <p class="muted">"Manage your talent's bookings and availability"</p>
                </div>
                <div class="tab-header-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| show_availability.set(true)
                    >
                        "Manage Availability"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_new_booking()>
                        "+ New Booking"
                    </Button>
                </div>
            </div>

            <div class="stat-grid">
                {stat_card("Total Bookings", Signal::derive(move || stats.get().total))}
                {stat_card("This Month", Signal::derive(move || stats.get().this_month))}
                {stat_card("Confirmed", Signal::derive(move || stats.get().confirmed))}
                {stat_card("Pending", Signal::derive(move || stats.get().pending))}
            </div>

            <div class="bookings-card">
                <div class="calendar-toolbar">
                    <div class="calendar-navigation">
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| current_date.update(|d| *d = previous_month(*d))
                        >
                            "← Previous"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| current_date.set(today())
                        >
                            "Today"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| current_date.update(|d| *d = next_month(*d))
                        >
                            "Next →"
                        </Button>
                        <h3 class="calendar-title">{move || grid.with(|g| g.title())}</h3>
                    </div>

                    <div class="calendar-pickers">
                        <select
                            class="calendar-select"
                            prop:value=move || current_date.get().month().to_string()
                            on:change=move |ev| {
                                if let Ok(month) = event_target_value(&ev).parse::<u32>() {
                                    current_date.update(|d| *d = with_month(*d, month));
                                }
                            }
                        >
                            {MONTH_NAMES
                                .iter()
                                .enumerate()
                                .map(|(i, name)| view! { <option value=(i + 1).to_string()>{*name}</option> })
                                .collect_view()}
                        </select>
                        <select
                            class="calendar-select"
                            prop:value=move || current_date.get().year().to_string()
                            on:change=move |ev| {
                                if let Ok(year) = event_target_value(&ev).parse::<i32>() {
                                    current_date.update(|d| *d = with_year(*d, year));
                                }
                            }
                        >
                            {SELECTABLE_YEARS
                                .iter()
                                .map(|year| view! { <option value=year.to_string()>{*year}</option> })
                                .collect_view()}
                        </select>
                        <label class="date-picker">
                            <span>{move || picker_label(current_date.get())}</span>
                            <input
                                type="date"
                                prop:value=move || current_date.get().format("%Y-%m-%d").to_string()
                                on:change=move |ev| {
                                    if let Ok(date) = NaiveDate::parse_from_str(&event_target_value(&ev), "%Y-%m-%d") {
                                        current_date.set(date);
                                    }
                                }
                            />
                        </label>
                        <select
                            class="calendar-select"
                            prop:value=move || view_mode.get()
                            on:change=move |ev| view_mode.set(event_target_value(&ev))
                        >
                            {VIEW_MODES
                                .iter()
                                .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                .collect_view()}
                        </select>
                        <select
                            class="calendar-select"
                            prop:value=move || talent_scope.get()
                            on:change=move |ev| talent_scope.set(event_target_value(&ev))
                        >
                            {TALENT_SCOPES
                                .iter()
                                .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                .collect_view()}
                        </select>
                    </div>
                </div>

                <div class="calendar-weekdays">
                    {WEEKDAY_LABELS
                        .iter()
                        .map(|day| view! { <div class="calendar-weekday">{*day}</div> })
                        .collect_view()}
                </div>

                <div class="calendar-days">
                    {move || {
                        let grid = grid.get();
                        let mut cells = Vec::with_capacity(grid.leading.len() + grid.days.len());

                        for day in grid.leading {
                            cells.push(view! {
                                <div class="calendar-day filler">
                                    <span class="day-number">{day}</span>
                                </div>
                            }.into_any());
                        }

                        for cell in grid.days {
                            let day = cell.day;
                            let mut class = String::from("calendar-day");
                            if cell.is_today {
                                class.push_str(" today");
                            }
                            if cell.is_selected {
                                class.push_str(" selected");
                            }
                            if cell.unavailable {
                                class.push_str(" unavailable");
                            }
                            if cell.conflict {
                                class.push_str(" conflict");
                            }

                            cells.push(view! {
                                <div
                                    class=class
                                    on:click=move |_| current_date.update(|d| *d = with_day(*d, day))
                                >
                                    <div class="day-header">
                                        <span class="day-number">{day}</span>
                                        {cell.unavailable.then(|| view! {
                                            <span class="day-marker unavailable" title="Talent booked out">"✕"</span>
                                        })}
                                        {cell.conflict.then(|| view! {
                                            <span class="day-marker conflict" title="Booking overlaps a book-out">"!"</span>
                                        })}
                                    </div>
                                    <div class="day-bookings">
                                        {cell.bookings
                                            .into_iter()
                                            .map(|booking| {
                                                let style = booking_color(&booking).style();
                                                let name = booking.talent_name.clone();
                                                view! {
                                                    <div
                                                        class="booking-chip"
                                                        style=style
                                                        on:click=move |ev| {
                                                            ev.stop_propagation();
                                                            selected_booking.set(Some(booking.clone()));
                                                            show_details.set(true);
                                                        }
                                                    >
                                                        {name}
                                                    </div>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </div>
                            }.into_any());
                        }

                        cells
                    }}
                </div>

                <div class="calendar-legend">
                    {legend()
                        .into_iter()
                        .map(|entry| view! {
                            <span class="legend-item">
                                <span class="legend-swatch" style=format!("background: {};", entry.background)>
                                    {entry.marker}
                                </span>
                                {entry.label}
                            </span>
                        })
                        .collect_view()}
                </div>
                <p class="shortcut-hint muted">
                    "Shortcuts: C new booking · T today · ←/→ previous/next day · Esc close"
                </p>
            </div>

            <ManageAvailabilityModal show=show_availability/>
            <NewBookingModal
                show=show_new_booking
                mode=booking_mode
                source=selected_booking
                default_date=Signal::derive(move || current_date.get())
            />
            <BookingDetailsModal
                show=show_details
                booking=selected_booking
                on_edit=Callback::new(move |b: Booking| open_with_mode(BookingMode::Edit, b))
                on_duplicate=Callback::new(move |b: Booking| open_with_mode(BookingMode::Duplicate, b))
            />
        </div>
    }
}
