use leptos::prelude::*;
use thaw::*;

/// Overlay + panel used by every bookings modal. The overlay stays mounted
/// and is shown through the `show` class; clicking the backdrop closes it.
#[component]
pub fn ModalShell(
    show: RwSignal<bool>,
    title: Signal<String>,
    #[prop(optional)] subtitle: Option<Signal<String>>,
    #[prop(optional)] wide: bool,
    children: Children,
) -> impl IntoView {
    let panel_class = if wide {
        "booking-modal booking-modal-wide"
    } else {
        "booking-modal"
    };

    view! {
        <div
            class=move || if show.get() { "booking-modal-overlay show" } else { "booking-modal-overlay" }
            on:click=move |_| show.set(false)
        >
            <div class=panel_class on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <div>
                        <h2>{move || title.get()}</h2>
                        {subtitle.map(|s| view! { <p class="modal-subtitle">{move || s.get()}</p> })}
                    </div>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| show.set(false)
                        class="close-button"
                    >
                        "×"
                    </Button>
                </div>
                <div class="modal-content">{children()}</div>
            </div>
        </div>
    }
}
