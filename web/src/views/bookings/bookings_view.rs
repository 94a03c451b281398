use leptos::prelude::*;
use thaw::*;

use super::booking_requests_tab::BookingRequestsTab;
use super::calendar_schedule_tab::CalendarScheduleTab;
use super::client_database_tab::ClientDatabaseTab;
use super::management_analytics_view::ManagementAnalyticsView;
use super::notifications_tab::NotificationsTab;
use super::state::provide_bookings_data;
use super::talent_availability_tab::TalentAvailabilityTab;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingsTab {
    #[default]
    Calendar,
    Requests,
    Clients,
    Availability,
    Notifications,
    Analytics,
}

impl BookingsTab {
    pub const ALL: [BookingsTab; 6] = [
        BookingsTab::Calendar,
        BookingsTab::Requests,
        BookingsTab::Clients,
        BookingsTab::Availability,
        BookingsTab::Notifications,
        BookingsTab::Analytics,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Calendar => "Calendar & Schedule",
            Self::Requests => "Booking Requests",
            Self::Clients => "Client Database",
            Self::Availability => "Talent Availability",
            Self::Notifications => "Notifications",
            Self::Analytics => "Management & Analytics",
        }
    }
}

/// Agency bookings page: tab bar over the shared booking records.
#[component]
pub fn BookingsView() -> impl IntoView {
    let data = provide_bookings_data();
    let active_tab = RwSignal::new(BookingsTab::default());

    // Effects only run in the browser, where the token lives.
    Effect::new(move |_| data.load_all());

    view! {
        <div class="bookings-view">
            <div class="bookings-tab-bar">
                {BookingsTab::ALL
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <Button
                                appearance=Signal::derive(move || {
                                    if active_tab.get() == tab {
                                        ButtonAppearance::Primary
                                    } else {
                                        ButtonAppearance::Subtle
                                    }
                                })
                                on_click=move |_| active_tab.set(tab)
                            >
                                {tab.label()}
                            </Button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="bookings-tab-content">
                {move || match active_tab.get() {
                    BookingsTab::Calendar => view! { <CalendarScheduleTab/> }.into_any(),
                    BookingsTab::Requests => view! { <BookingRequestsTab/> }.into_any(),
                    BookingsTab::Clients => view! { <ClientDatabaseTab/> }.into_any(),
                    BookingsTab::Availability => view! { <TalentAvailabilityTab/> }.into_any(),
                    BookingsTab::Notifications => view! { <NotificationsTab/> }.into_any(),
                    BookingsTab::Analytics => view! { <ManagementAnalyticsView/> }.into_any(),
                }}
            </div>
        </div>
    }
}
