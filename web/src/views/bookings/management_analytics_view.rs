use booking_types::{Booking, BookingType};
use chrono::NaiveDate;
use leptos::prelude::*;
use thaw::*;

use super::state::use_bookings_data;
use crate::components::{use_toaster, Toast};
use crate::utils::analytics::{overview, top_talent, type_counts};
use crate::utils::booking_filters::{
    bookings_to_csv, export_file_name, BookingFilter, ExportColumn, SortDirection, SortKey,
};
use crate::utils::money::{format_cents, parse_money_to_cents};
use crate::utils::time_format::{long_date, time_range_label, today};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AnalyticsSection {
    #[default]
    Analytics,
    Manage,
    Reports,
}

impl AnalyticsSection {
    const ALL: [AnalyticsSection; 3] = [Self::Analytics, Self::Manage, Self::Reports];

    fn label(&self) -> &'static str {
        match self {
            Self::Analytics => "Analytics",
            Self::Manage => "Manage Bookings",
            Self::Reports => "Reports & Export",
        }
    }
}

fn type_label(key: &str) -> &'static str {
    BookingType::SELECTABLE
        .iter()
        .find(|t| t.as_str() == key)
        .map(BookingType::label)
        .unwrap_or(BookingType::Other.label())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn cents_value(cents: Option<i64>) -> String {
    cents.map(|c| (c / 100).to_string()).unwrap_or_default()
}

#[component]
fn AnalyticsOverviewPanel() -> impl IntoView {
    let data = use_bookings_data();
    let figures = Memo::new(move |_| data.bookings.with(|b| overview(b, today())));
    let by_type = Memo::new(move |_| {
        data.bookings.with(|b| {
            type_counts(b)
                .into_iter()
                .map(|(key, count)| (type_label(key), count))
                .collect::<Vec<_>>()
        })
    });
    let top = Memo::new(move |_| data.bookings.with(|b| top_talent(b)));

    let stat_card = |label: &'static str, value: Signal<String>| {
        view! {
            <div class="stat-card">
                <p class="stat-label">{label}</p>
                <p class="stat-value">{move || value.get()}</p>
            </div>
        }
    };

    view! {
        <div class="stat-grid">
            {stat_card("This Month", Signal::derive(move || figures.get().month_count.to_string()))}
            {stat_card("This Week", Signal::derive(move || figures.get().week_count.to_string()))}
            {stat_card(
                "Revenue",
                Signal::derive(move || {
                    format_cents(figures.get().month_revenue_cents, booking_types::Currency::Usd)
                }),
            )}
            {stat_card(
                "Conversion",
                Signal::derive(move || {
                    figures.get().conversion_pct.map(|p| format!("{}%", p)).unwrap_or_else(|| "N/A".to_string())
                }),
            )}
        </div>

        <div class="analytics-panels">
            <div class="bookings-card">
                <h3>"Bookings by Type"</h3>
                {move || {
                    let rows = by_type.get();
                    let total: usize = rows.iter().map(|(_, c)| c).sum();
                    if rows.is_empty() {
                        return view! { <p class="muted">"No bookings yet"</p> }.into_any();
                    }
                    rows.into_iter()
                        .map(|(label, count)| {
                            let width = count * 100 / total.max(1);
                            view! {
                                <div class="type-row">
                                    <span>{label}</span>
                                    <div class="type-bar">
                                        <div class="type-bar-fill" style=format!("width: {}%;", width)></div>
                                    </div>
                                    <span class="strong">{count}</span>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>
            <div class="bookings-card">
                <h3>"Top Booked Talent"</h3>
                {move || match top.get() {
                    Some(t) => view! {
                        <p class="strong">{t.name}</p>
                        <p class="muted">{format!("{} bookings", t.count)}</p>
                    }
                    .into_any(),
                    None => view! { <p class="muted">"No bookings yet"</p> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn ManageBookingsPanel(filter: RwSignal<BookingFilter>, filtered: Memo<Vec<Booking>>) -> impl IntoView {
    let sort_header = move |key: SortKey| {
        view! {
            <th
                class="sortable"
                on:click=move |_| {
                    filter.update(|f| {
                        if f.sort_key == key {
                            f.direction = f.direction.toggled();
                        } else {
                            f.sort_key = key;
                            f.direction = SortDirection::Desc;
                        }
                    })
                }
            >
                {key.label()}
                {move || filter.with(|f| {
                    if f.sort_key != key {
                        ""
                    } else if f.direction == SortDirection::Asc {
                        " ▲"
                    } else {
                        " ▼"
                    }
                })}
            </th>
        }
    };

    view! {
        <div class="bookings-card">
            <input
                type="search"
                class="search-input"
                placeholder="Search by talent, client, location, or notes..."
                prop:value=move || filter.with(|f| f.query.clone())
                on:input=move |ev| filter.update(|f| f.query = event_target_value(&ev))
            />
            <div class="filter-row">
                <div class="form-field">
                    <label>"Date Range"</label>
                    <input
                        type="date"
                        prop:value=move || filter.with(|f| date_value(f.date_start))
                        on:change=move |ev| filter.update(|f| f.date_start = parse_date(&event_target_value(&ev)))
                    />
                    <input
                        type="date"
                        prop:value=move || filter.with(|f| date_value(f.date_end))
                        on:change=move |ev| filter.update(|f| f.date_end = parse_date(&event_target_value(&ev)))
                    />
                </div>
                <div class="form-field">
                    <label>"Rate Range"</label>
                    <input
                        type="number"
                        placeholder="Min"
                        prop:value=move || filter.with(|f| cents_value(f.rate_min_cents))
                        on:change=move |ev| filter.update(|f| f.rate_min_cents = parse_money_to_cents(&event_target_value(&ev)))
                    />
                    <input
                        type="number"
                        placeholder="Max"
                        prop:value=move || filter.with(|f| cents_value(f.rate_max_cents))
                        on:change=move |ev| filter.update(|f| f.rate_max_cents = parse_money_to_cents(&event_target_value(&ev)))
                    />
                </div>
                <div class="form-field">
                    <label>"Sort By"</label>
                    <select
                        prop:value=move || filter.with(|f| f.sort_key.as_str())
                        on:change=move |ev| {
                            if let Some(key) = SortKey::parse(&event_target_value(&ev)) {
                                filter.update(|f| f.sort_key = key);
                            }
                        }
                    >
                        {SortKey::ALL
                            .iter()
                            .map(|k| view! { <option value=k.as_str()>{k.label()}</option> })
                            .collect_view()}
                    </select>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| filter.update(|f| f.direction = f.direction.toggled())
                    >
                        {move || filter.with(|f| match f.direction {
                            SortDirection::Asc => "Ascending",
                            SortDirection::Desc => "Descending",
                        })}
                    </Button>
                </div>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| filter.set(BookingFilter::default())>
                    "Clear Filters"
                </Button>
            </div>

            <p class="muted small">{move || format!("{} bookings", filtered.with(Vec::len))}</p>

            <table class="data-table">
                <thead>
                    <tr>
                        {sort_header(SortKey::BookingDate)}
                        {sort_header(SortKey::TalentName)}
                        {sort_header(SortKey::ClientName)}
                        <th>"Time"</th>
                        <th>"Location"</th>
                        {sort_header(SortKey::RateAmount)}
                        <th>"Type"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        filtered
                            .get()
                            .into_iter()
                            .map(|b| view! {
                                <tr>
                                    <td>{long_date(b.date)}</td>
                                    <td>{b.talent_name.clone()}</td>
                                    <td>{b.client_name.clone()}</td>
                                    <td>{time_range_label(&b)}</td>
                                    <td>{b.location.clone()}</td>
                                    <td>{b.rate_cents.map(|c| format_cents(c, b.currency)).unwrap_or_default()}</td>
                                    <td>{b.booking_type.label()}</td>
                                    <td><span class="badge">{b.status.label()}</span></td>
                                </tr>
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn ReportsPanel(filtered: Memo<Vec<Booking>>) -> impl IntoView {
    let toaster = use_toaster();
    let columns = RwSignal::new(ExportColumn::ALL.to_vec());

    let export = move |_| {
        let selected: Vec<ExportColumn> = ExportColumn::ALL
            .into_iter()
            .filter(|c| columns.with_untracked(|cols| cols.contains(c)))
            .collect();
        if selected.is_empty() {
            toaster.push(Toast::error("Nothing to export", "Select at least one column."));
            return;
        }
        let csv = filtered.with_untracked(|rows| bookings_to_csv(rows, &selected));
        let name = export_file_name(today());

        #[cfg(feature = "hydrate")]
        {
            match crate::utils::files::download_text(&name, "text/csv;charset=utf-8", &csv) {
                Ok(()) => toaster.push(Toast::success("Export ready", name)),
                Err(e) => {
                    leptos::logging::warn!("csv export failed: {:?}", e);
                    toaster.push(Toast::error("Export failed", "The file could not be created."));
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (csv, name);
    };

    view! {
        <div class="bookings-card">
            <h3>"Export Bookings"</h3>
            <p class="muted">
                {move || format!("Exports the {} bookings matching the Manage Bookings filters.", filtered.with(Vec::len))}
            </p>
            <div class="export-columns">
                {ExportColumn::ALL
                    .into_iter()
                    .map(|column| view! {
                        <label class="checkbox-label">
                            <input
                                type="checkbox"
                                prop:checked=move || columns.with(|c| c.contains(&column))
                                on:change=move |ev| {
                                    let on = event_target_checked(&ev);
                                    columns.update(|c| {
                                        c.retain(|x| *x != column);
                                        if on {
                                            c.push(column);
                                        }
                                    });
                                }
                            />
                            {column.header()}
                        </label>
                    })
                    .collect_view()}
            </div>
            <Button appearance=ButtonAppearance::Primary on_click=export>
                "Export CSV"
            </Button>
        </div>

        <div class="bookings-card">
            <h3>"Schedule Automated Reports"</h3>
            <p class="muted">"Receive booking reports automatically via email"</p>
            <p class="muted small">"Scheduled reports are not available yet."</p>
        </div>
    }
}

#[component]
pub fn ManagementAnalyticsView() -> impl IntoView {
    let data = use_bookings_data();
    let section = RwSignal::new(AnalyticsSection::default());
    let filter = RwSignal::new(BookingFilter::default());
    let filtered = Memo::new(move |_| filter.with(|f| data.bookings.with(|b| f.apply(b))));

    view! {
        <div class="management-analytics">
            <div class="tab-header">
                <div>
                    <h2>"Management & Analytics"</h2>
                    <p class="muted">"Filter, search, and analyze your bookings"</p>
                </div>
            </div>

            <div class="sub-tabs">
                {AnalyticsSection::ALL
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
                AnalyticsSection::Analytics => view! { <AnalyticsOverviewPanel/> }.into_any(),
                AnalyticsSection::Manage => view! { <ManageBookingsPanel filter=filter filtered=filtered/> }.into_any(),
                AnalyticsSection::Reports => view! { <ReportsPanel filtered=filtered/> }.into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_labels_fall_back_to_other() {
        assert_eq!(type_label("test-shoot"), "Test Shoot");
        assert_eq!(type_label("casting"), "Casting");
        assert_eq!(type_label("mystery"), "Other");
    }

    #[test]
    fn filter_inputs_render_whole_units() {
        assert_eq!(cents_value(Some(150_000)), "1500");
        assert_eq!(cents_value(None), "");
        assert_eq!(date_value(parse_date("2026-03-04")), "2026-03-04");
        assert_eq!(parse_date("not a date"), None);
    }
}
