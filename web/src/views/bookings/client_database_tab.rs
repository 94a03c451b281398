use booking_types::{Client, Currency};
use chrono::Utc;
use leptos::prelude::*;
use thaw::*;

use super::add_client_modal::AddClientModal;
use super::merge_clients_modal::MergeClientsModal;
use super::state::use_bookings_data;
use crate::components::LoadingView;
use crate::utils::clients::{duplicate_groups, ClientFilter, ClientSort, ClientStats, INDUSTRY_FILTERS};
use crate::utils::money::format_cents;
use crate::utils::time_format::long_date;

const VISIBLE_TAGS: usize = 2;

fn tag_badges(tags: &[String]) -> impl IntoView {
    let extra = tags.len().saturating_sub(VISIBLE_TAGS);
    view! {
        <div class="tag-list">
            {tags
                .iter()
                .take(VISIBLE_TAGS)
                .map(|t| view! { <span class="badge tag">{t.clone()}</span> })
                .collect_view()}
            {(extra > 0).then(|| view! { <span class="badge muted">{format!("+{}", extra)}</span> })}
        </div>
    }
}

#[component]
fn ClientDetailPanel(client: RwSignal<Option<Client>>, on_edit: Callback<Client>) -> impl IntoView {
    let data = use_bookings_data();

    move || {
        client.get().map(|c| {
            let history = data.bookings.with(|bookings| {
                let mut own: Vec<_> = bookings
                    .iter()
                    .filter(|b| b.client_id == Some(c.id))
                    .cloned()
                    .collect();
                own.sort_by(|a, b| b.date.cmp(&a.date));
                own
            });
            let editable = c.clone();

            view! {
                <aside class="client-detail-panel">
                    <div class="panel-header">
                        <h3>{c.company.clone()}</h3>
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| client.set(None)>
                            "×"
                        </Button>
                    </div>
                    <p>{c.contact_name.clone()}</p>
                    {c.email.clone().map(|e| view! { <p class="muted">{e}</p> })}
                    {c.phone.clone().map(|p| view! { <p class="muted">{p}</p> })}
                    <p class="muted">{format!("Terms: {}", c.terms.label())}</p>

                    <div class="stat-grid compact">
                        <div class="stat-card">
                            <p class="stat-label">"Revenue"</p>
                            <p class="stat-value">{format_cents(c.revenue_cents, Currency::Usd)}</p>
                        </div>
                        <div class="stat-card">
                            <p class="stat-label">"Bookings"</p>
                            <p class="stat-value">{c.bookings_count}</p>
                        </div>
                    </div>

                    {c.notes.clone().map(|n| view! { <p class="client-notes">{n}</p> })}

                    <h4>"Booking History"</h4>
                    {if history.is_empty() {
                        view! { <p class="muted">"No booking history yet"</p> }.into_any()
                    } else {
                        view! {
                            <ul class="booking-history">
                                {history
                                    .into_iter()
                                    .map(|b| view! {
                                        <li>
                                            <span>{long_date(b.date)}</span>
                                            <span>{b.talent_name.clone()}</span>
                                            <span class="badge">{b.status.label()}</span>
                                        </li>
                                    })
                                    .collect_view()}
                            </ul>
                        }.into_any()
                    }}

                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_edit.run(editable.clone())
                    >
                        "Edit Client"
                    </Button>
                </aside>
            }
        })
    }
}

#[component]
pub fn ClientDatabaseTab() -> impl IntoView {
    let data = use_bookings_data();

    let filter = RwSignal::new(ClientFilter::default());
    let show_editor = RwSignal::new(false);
    let show_merge = RwSignal::new(false);
    let editing = RwSignal::new(None::<Client>);
    let selected = RwSignal::new(None::<Client>);

    let stats = Memo::new(move |_| data.clients.with(|c| ClientStats::compute(c, Utc::now())));
    let visible = Memo::new(move |_| filter.with(|f| data.clients.with(|c| f.apply(c))));
    let duplicate_count = Memo::new(move |_| data.clients.with(|c| duplicate_groups(c).len()));

    let open_editor = move |client: Option<Client>| {
        editing.set(client);
        show_editor.set(true);
    };

    // Keep the side panel in step with edits and merges.
    Effect::new(move |_| {
        let clients = data.clients.get();
        if let Some(id) = selected.with_untracked(|s| s.as_ref().map(|c| c.id)) {
            selected.set(clients.into_iter().find(|c| c.id == id));
        }
    });

    let stat_card = |label: &'static str, value: Signal<String>| {
        view! {
            <div class="stat-card">
                <p class="stat-label">{label}</p>
                <p class="stat-value">{move || value.get()}</p>
            </div>
        }
    };

    view! {
        <div class="client-database-tab">
            <div class="tab-header">
                <div>
                    <h2>"Client Database"</h2>
                    <p class="muted">"Manage your client relationships and booking history"</p>
                </div>
                <div class="tab-header-actions">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| show_merge.set(true)>
                        {move || match duplicate_count.get() {
                            0 => "Merge Duplicates".to_string(),
                            n => format!("Merge Duplicates ({})", n),
                        }}
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_editor(None)>
                        "+ Add Client"
                    </Button>
                </div>
            </div>

            <div class="stat-grid">
                {stat_card("Total Clients", Signal::derive(move || stats.get().total.to_string()))}
                {stat_card(
                    "Active This Month",
                    Signal::derive(move || stats.get().active_this_month.to_string()),
                )}
                {stat_card(
                    "Total Revenue",
                    Signal::derive(move || format_cents(stats.get().revenue_cents, Currency::Usd)),
                )}
                {stat_card(
                    "Avg Booking Value",
                    Signal::derive(move || format_cents(stats.get().avg_booking_cents, Currency::Usd)),
                )}
            </div>

            <div class="bookings-card">
                <div class="filter-row">
                    <input
                        type="search"
                        class="search-input"
                        placeholder="Search by company name..."
                        prop:value=move || filter.with(|f| f.query.clone())
                        on:input=move |ev| filter.update(|f| f.query = event_target_value(&ev))
                    />
                    <select
                        prop:value=move || filter.with(|f| f.industry.clone())
                        on:change=move |ev| filter.update(|f| f.industry = event_target_value(&ev))
                    >
                        {INDUSTRY_FILTERS
                            .iter()
                            .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                            .collect_view()}
                    </select>
                    <select
                        prop:value=move || filter.with(|f| f.sort.as_str())
                        on:change=move |ev| filter.update(|f| f.sort = ClientSort::parse(&event_target_value(&ev)))
                    >
                        {ClientSort::ALL
                            .iter()
                            .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div class="client-database-body">
                    {move || {
                        if data.loading.get() && data.clients.with(Vec::is_empty) {
                            return view! { <LoadingView message=Some("Loading clients...".to_string())/> }
                                .into_any();
                        }
                        let rows = visible.get();
                        if rows.is_empty() {
                            return view! {
                                <div class="empty-state">
                                    <h3>"No clients yet"</h3>
                                    <p class="muted">"Start adding clients to track your business relationships"</p>
                                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_editor(None)>
                                        "+ Add Your First Client"
                                    </Button>
                                </div>
                            }
                            .into_any();
                        }
                        view! {
                            <table class="data-table">
                                <thead>
                                    <tr>
                                        <th>"Company"</th>
                                        <th>"Contact"</th>
                                        <th>"Industries"</th>
                                        <th>"Bookings"</th>
                                        <th>"Revenue"</th>
                                        <th>"Last Booking"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {rows
                                        .into_iter()
                                        .map(|client| {
                                            let row_client = client.clone();
                                            let edit_client = client.clone();
                                            let last = client
                                                .last_booking_at
                                                .map(|at| long_date(at.date_naive()))
                                                .unwrap_or_else(|| "Never".to_string());
                                            view! {
                                                <tr class="clickable" on:click=move |_| selected.set(Some(row_client.clone()))>
                                                    <td>
                                                        <div class="strong">{client.company.clone()}</div>
                                                        <div class="muted small">{client.email.clone().unwrap_or_default()}</div>
                                                    </td>
                                                    <td>{client.contact_name.clone()}</td>
                                                    <td>{tag_badges(&client.industry_tags)}</td>
                                                    <td>{client.bookings_count}</td>
                                                    <td class="revenue">{format_cents(client.revenue_cents, Currency::Usd)}</td>
                                                    <td>{last}</td>
                                                    <td>
                                                        <button
                                                            class="link-button"
                                                            on:click=move |ev| {
                                                                ev.stop_propagation();
                                                                open_editor(Some(edit_client.clone()));
                                                            }
                                                        >
                                                            "Edit"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        }
                        .into_any()
                    }}

                    <ClientDetailPanel
                        client=selected
                        on_edit=Callback::new(move |c: Client| open_editor(Some(c)))
                    />
                </div>
            </div>

            <AddClientModal show=show_editor editing=editing/>
            <MergeClientsModal show=show_merge/>
        </div>
    }
}
