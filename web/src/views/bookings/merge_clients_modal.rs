use booking_types::Client;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::state::use_bookings_data;
use crate::components::{use_toaster, ModalShell, Toast};
use crate::server::booking_error;
use crate::server_clients::merge_agency_clients;
use crate::utils::clients::duplicate_groups;

fn client_options(clients: &[Client], skip: Option<i64>) -> impl IntoView {
    clients
        .iter()
        .filter(|c| Some(c.id) != skip)
        .map(|c| {
            let label = format!("{} ({} bookings)", c.company, c.bookings_count);
            view! { <option value=c.id.to_string()>{label}</option> }
        })
        .collect_view()
}

/// Folds one client record into another. Bookings move to the target and
/// the source record is deleted.
#[component]
pub fn MergeClientsModal(show: RwSignal<bool>) -> impl IntoView {
    let data = use_bookings_data();
    let toaster = use_toaster();
    let source = RwSignal::new(None::<i64>);
    let target = RwSignal::new(None::<i64>);
    let merging = RwSignal::new(false);

    // Preselect the first duplicate pair when the modal opens.
    Effect::new(move |_| {
        if !show.get() {
            return;
        }
        let pair = data.clients.with_untracked(|clients| {
            duplicate_groups(clients)
                .into_iter()
                .next()
                .and_then(|ids| Some((*ids.get(1)?, *ids.first()?)))
        });
        source.set(pair.map(|(s, _)| s));
        target.set(pair.map(|(_, t)| t));
    });

    let parse_id = |value: String| value.parse::<i64>().ok();

    let merge = move |_| {
        let (Some(source_id), Some(target_id)) = (source.get_untracked(), target.get_untracked()) else {
            return;
        };
        if source_id == target_id {
            toaster.push(Toast::error("Pick two different clients", "A client cannot be merged into itself."));
            return;
        }
        merging.set(true);
        let token = data.token();
        spawn_local(async move {
            match merge_agency_clients(token, source_id, target_id).await.map_err(booking_error) {
                Ok(merged) => {
                    toaster.push(Toast::success(
                        "Clients merged",
                        format!("Bookings now belong to {}.", merged.company),
                    ));
                    data.remove_client(source_id);
                    data.upsert_client(merged);
                    data.reload_bookings();
                    show.set(false);
                }
                Err(e) => toaster.push(Toast::error("Merge failed", e.detail())),
            }
            merging.set(false);
        });
    };

    let duplicates = move || {
        data.clients.with(|clients| {
            duplicate_groups(clients)
                .into_iter()
                .filter_map(|ids| {
                    let id = *ids.first()?;
                    clients.iter().find(|c| c.id == id).map(|c| (c.company.clone(), ids.len()))
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <ModalShell
            show=show
            title=Signal::derive(|| "Merge Duplicate Clients".to_string())
            subtitle=Signal::derive(|| "Move every booking from one client record into another".to_string())
        >
            {move || {
                let groups = duplicates();
                (!groups.is_empty()).then(|| view! {
                    <div class="duplicate-hint">
                        <p class="muted">"Possible duplicates:"</p>
                        <ul>
                            {groups
                                .into_iter()
                                .map(|(company, count)| view! { <li>{format!("{} ({} records)", company, count)}</li> })
                                .collect_view()}
                        </ul>
                    </div>
                })
            }}

            <div class="form-field">
                <label>"Merge this client"</label>
                <select
                    prop:value=move || source.get().map(|id| id.to_string()).unwrap_or_default()
                    on:change=move |ev| source.set(parse_id(event_target_value(&ev)))
                >
                    <option value="">"Select client to remove"</option>
                    {move || data.clients.with(|c| client_options(c, None))}
                </select>
            </div>
            <div class="form-field">
                <label>"Into this client"</label>
                <select
                    prop:value=move || target.get().map(|id| id.to_string()).unwrap_or_default()
                    on:change=move |ev| target.set(parse_id(event_target_value(&ev)))
                >
                    <option value="">"Select client to keep"</option>
                    {move || data.clients.with(|c| client_options(c, source.get()))}
                </select>
            </div>

            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| show.set(false)>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || {
                        merging.get() || source.get().is_none() || target.get().is_none()
                    })
                    on_click=merge
                >
                    {move || if merging.get() { "Merging..." } else { "Merge Clients" }}
                </Button>
            </div>
        </ModalShell>
    }
}
