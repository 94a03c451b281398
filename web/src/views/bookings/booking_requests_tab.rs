use leptos::prelude::*;

#[component]
pub fn BookingRequestsTab() -> impl IntoView {
    view! {
        <div class="bookings-card placeholder-card">
            <h2>"Booking Requests"</h2>
            <p class="muted">"Feature currently under development."</p>
        </div>
    }
}
