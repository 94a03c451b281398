use leptos::prelude::*;
use thaw::*;

use super::add_book_out_modal::AddBookOutModal;
use super::talent_availability_tab::BookOutList;
use crate::components::ModalShell;

/// Calendar shortcut to the book-out list without leaving the schedule.
#[component]
pub fn ManageAvailabilityModal(show: RwSignal<bool>) -> impl IntoView {
    let show_add = RwSignal::new(false);

    view! {
        <ModalShell
            show=show
            title=Signal::derive(|| "Talent Availability & Book-Outs".to_string())
            subtitle=Signal::derive(|| "Manage when talent is unavailable for bookings".to_string())
            wide=true
        >
            <Button appearance=ButtonAppearance::Primary on_click=move |_| show_add.set(true)>
                "+ Add Book-Out"
            </Button>
            <BookOutList empty_hint="Talent will appear available for all dates"/>
        </ModalShell>
        <AddBookOutModal show=show_add/>
    }
}
