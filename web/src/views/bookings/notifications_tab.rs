use booking_types::{BookingNotificationRow, NotificationChannel};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::state::use_bookings_data;
use crate::components::{use_toaster, LoadingView, Toast};
use crate::server_notifications::list_booking_notifications;
use crate::utils::notifications::{feed, DeliveryStats, LOG_FETCH_LIMIT};
use crate::utils::settings::use_channel_settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum NotificationsSection {
    #[default]
    Logs,
    Settings,
    Preferences,
    Test,
}

impl NotificationsSection {
    const ALL: [NotificationsSection; 4] = [Self::Logs, Self::Settings, Self::Preferences, Self::Test];

    fn label(&self) -> &'static str {
        match self {
            Self::Logs => "Notification Logs",
            Self::Settings => "Event Settings",
            Self::Preferences => "Talent Preferences",
            Self::Test => "Test & Preview",
        }
    }
}

const EVENTS: [&str; 3] = ["Booking Created/Confirmed", "Booking Updated", "Booking Cancelled"];

/// Only email is delivered today; the other channels render disabled.
fn channel_available(channel: NotificationChannel) -> bool {
    channel == NotificationChannel::Email
}

fn channel_name(channel: NotificationChannel) -> &'static str {
    match channel {
        NotificationChannel::Email => "Email",
        NotificationChannel::Sms => "SMS",
        NotificationChannel::Push => "Push",
    }
}

#[component]
fn ChannelToggles(#[prop(optional)] editable: bool) -> impl IntoView {
    let store = use_channel_settings();

    [NotificationChannel::Email, NotificationChannel::Sms, NotificationChannel::Push]
        .into_iter()
        .map(|channel| {
            let available = channel_available(channel);
            view! {
                <label class="channel-toggle">
                    <input
                        type="checkbox"
                        disabled={!(editable && available)}
                        prop:checked=move || store.is_enabled(channel)
                        on:change=move |ev| store.set(channel, event_target_checked(&ev))
                    />
                    <span>{channel_name(channel)}</span>
                    {(!available).then(|| view! { <span class="badge muted">"Coming Soon"</span> })}
                </label>
            }
        })
        .collect_view()
}

#[component]
fn NotificationLogs(rows: RwSignal<Vec<BookingNotificationRow>>, loading: RwSignal<bool>) -> impl IntoView {
    let store = use_channel_settings();
    let query = RwSignal::new(String::new());

    let stats = Memo::new(move |_| rows.with(|r| DeliveryStats::compute(r)));
    let items = Memo::new(move |_| {
        let settings = store.get();
        let needle = query.get().trim().to_lowercase();
        rows.with(|r| feed(r, &settings))
            .into_iter()
            .filter(|item| {
                needle.is_empty()
                    || item.recipient.to_lowercase().contains(&needle)
                    || item.message.to_lowercase().contains(&needle)
            })
            .collect::<Vec<_>>()
    });

    let stat_card = |label: &'static str, value: Signal<String>, hint: Option<&'static str>| {
        view! {
            <div class="stat-card">
                <p class="stat-label">{label}</p>
                <p class="stat-value">{move || value.get()}</p>
                {hint.map(|h| view! { <p class="muted small">{h}</p> })}
            </div>
        }
    };

    view! {
        <div class="stat-grid">
            {stat_card("Emails Sent", Signal::derive(move || stats.get().emails_sent.to_string()), None)}
            {stat_card("SMS Sent", Signal::derive(|| "0".to_string()), Some("Coming Soon"))}
            {stat_card("Push Sent", Signal::derive(|| "0".to_string()), Some("Coming Soon"))}
            {stat_card("Failed", Signal::derive(move || stats.get().failed.to_string()), None)}
        </div>

        <div class="bookings-card">
            <div class="card-header">
                <h3>"Recent Notifications"</h3>
                <input
                    type="search"
                    class="search-input"
                    placeholder="Search notifications..."
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
            </div>
            {move || {
                if loading.get() {
                    return view! { <LoadingView message=Some("Loading notifications...".to_string()) compact=true/> }
                        .into_any();
                }
                let items = items.get();
                if items.is_empty() {
                    return view! { <p class="empty-state muted">"No notification logs yet."</p> }.into_any();
                }
                view! {
                    <ul class="notification-feed">
                        {items
                            .into_iter()
                            .map(|item| {
                                let status_class = if item.ok { "badge success" } else { "badge danger" };
                                view! {
                                    <li class="notification-item">
                                        <span class="badge">{item.channel.badge()}</span>
                                        <div class="notification-body">
                                            <p class="strong">{item.title}</p>
                                            <p class="muted small">{format!("To: {}", item.recipient)}</p>
                                            <p>{item.message.clone()}</p>
                                        </div>
                                        <div class="notification-meta">
                                            <span class="muted small">{item.time.clone()}</span>
                                            <span class=status_class>{item.detail()}</span>
                                        </div>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                .into_any()
            }}
        </div>
    }
}

/// Only the created/confirmed event is wired to the stored toggles.
#[component]
fn EventSettings() -> impl IntoView {
    view! {
        <div class="bookings-card">
            <h3>"Event Notification Settings"</h3>
            <p class="muted">"Configure which channels to use for each event type"</p>
            {EVENTS
                .iter()
                .enumerate()
                .map(|(i, event)| view! {
                    <div class="event-setting">
                        <p class="strong">{*event}</p>
                        <div class="channel-toggles">
                            <ChannelToggles editable={i == 0}/>
                        </div>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn TalentPreferences() -> impl IntoView {
    let data = use_bookings_data();
    let query = RwSignal::new(String::new());

    let matching = move || {
        let needle = query.get();
        data.talents.with(|talents| {
            talents
                .iter()
                .filter(|t| t.matches(&needle))
                .map(|t| t.name.clone())
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="bookings-card">
            <h3>"Per-Talent Notification Preferences"</h3>
            <p class="muted">"Override agency defaults for specific talent"</p>
            <input
                type="search"
                class="search-input"
                placeholder="Search talent by name..."
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <ul class="talent-preferences">
                {move || {
                    matching()
                        .into_iter()
                        .map(|name| view! {
                            <li>
                                <span class="strong">{name}</span>
                                <span class="muted small">"Using agency defaults"</span>
                            </li>
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}

#[component]
fn TestDelivery() -> impl IntoView {
    let data = use_bookings_data();
    let toaster = use_toaster();
    let talent = RwSignal::new(String::new());

    view! {
        <div class="bookings-card">
            <h3>"Test Notification Delivery"</h3>
            <p class="muted">"Send a test notification to verify delivery and formatting"</p>
            <div class="form-field">
                <label>"Select Talent"</label>
                <select
                    prop:value=move || talent.get()
                    on:change=move |ev| talent.set(event_target_value(&ev))
                >
                    <option value="">"Choose talent to notify"</option>
                    {move || data.talents.with(|talents| {
                        talents
                            .iter()
                            .map(|t| view! { <option value=t.name.clone()>{t.name.clone()}</option> })
                            .collect_view()
                    })}
                </select>
            </div>
            <Button
                appearance=ButtonAppearance::Primary
                disabled=Signal::derive(move || talent.with(String::is_empty))
                on_click=move |_| {
                    toaster.push(Toast::info(
                        "Test notifications are not delivered",
                        "Messages are sent when a booking is created.",
                    ))
                }
            >
                "Send Test Notification"
            </Button>

            <div class="template-preview">
                <h4>"Preview Templates"</h4>
                <p><span class="strong">"Subject: "</span>"New Booking Confirmed"</p>
                <p>{move || {
                    let name = talent.get();
                    let name = if name.is_empty() { "there".to_string() } else { name };
                    format!("Hi {},", name)
                }}</p>
                <p>"You have a new confirmed booking. Client, date, call and wrap time, location and rate are listed in the message."</p>
                <p class="muted small">"Calendar invite (.ics) attached"</p>
            </div>
        </div>
    }
}

#[component]
pub fn NotificationsTab() -> impl IntoView {
    let data = use_bookings_data();
    let toaster = use_toaster();
    let section = RwSignal::new(NotificationsSection::default());
    let rows = RwSignal::new(Vec::<BookingNotificationRow>::new());
    let loading = RwSignal::new(false);

    Effect::new(move |_| {
        if section.get() != NotificationsSection::Logs {
            return;
        }
        loading.set(true);
        let token = data.token();
        spawn_local(async move {
            match list_booking_notifications(token, Some(LOG_FETCH_LIMIT)).await {
                Ok(fetched) => rows.set(fetched),
                Err(e) => {
                    leptos::logging::warn!("notification log load failed: {}", e);
                    toaster.push(Toast::error("Failed to load notifications", e.to_string()));
                    rows.set(Vec::new());
                }
            }
            loading.set(false);
        });
    });

    view! {
        <div class="notifications-tab">
            <div class="tab-header">
                <div>
                    <h2>"Notifications Center"</h2>
                    <p class="muted">"Manage booking notifications and delivery logs"</p>
                </div>
            </div>

            <div class="sub-tabs">
                {NotificationsSection::ALL
                    .into_iter()
                    .map(|s| view! {
                        <Button
                            appearance=Signal::derive(move || {
                                if section.get() == s {
                                    ButtonAppearance::Primary
                                } else {
                                    ButtonAppearance::Subtle
                                }
                            })
                            on_click=move |_| section.set(s)
                        >
                            {s.label()}
                        </Button>
                    })
                    .collect_view()}
            </div>

            {move || match section.get() {
                NotificationsSection::Logs => view! { <NotificationLogs rows=rows loading=loading/> }.into_any(),
                NotificationsSection::Settings => view! { <EventSettings/> }.into_any(),
                NotificationsSection::Preferences => view! { <TalentPreferences/> }.into_any(),
                NotificationsSection::Test => view! { <TestDelivery/> }.into_any(),
            }}
        </div>
    }
}
