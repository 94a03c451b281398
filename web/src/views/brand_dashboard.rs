//! Brand-facing dashboard: campaign overview with escrow, the creator
//! marketplace, contracts and usage licenses.

use booking_types::{BrandSummary, Campaign, Contract, Creator, Currency, License};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::components::{provide_toaster, ErrorView, LoadingView, ModalShell, ToastHost};
use crate::server_brand::{
    list_brand_campaigns, list_brand_contracts, list_brand_licenses, list_marketplace_creators,
};
use crate::utils::auth::get_brand_token;
use crate::utils::money::{format_cents, format_thousands};
use crate::utils::time_format::{long_date, today};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum BrandSection {
    #[default]
    Home,
    Marketplace,
    Campaigns,
    Contracts,
    Usage,
}

impl BrandSection {
    const ALL: [BrandSection; 5] = [
        Self::Home,
        Self::Marketplace,
        Self::Campaigns,
        Self::Contracts,
        Self::Usage,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Home => "Dashboard",
            Self::Marketplace => "Find Creators",
            Self::Campaigns => "My Campaigns",
            Self::Contracts => "Contracts",
            Self::Usage => "Usage Rights",
        }
    }
}

#[derive(Clone, Copy)]
struct BrandData {
    campaigns: RwSignal<Vec<Campaign>>,
    contracts: RwSignal<Vec<Contract>>,
    licenses: RwSignal<Vec<License>>,
    creators: RwSignal<Vec<Creator>>,
    loading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
}

impl BrandData {
    fn new() -> Self {
        Self {
            campaigns: RwSignal::new(Vec::new()),
            contracts: RwSignal::new(Vec::new()),
            licenses: RwSignal::new(Vec::new()),
            creators: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    fn load(&self) {
        let data = *self;
        let token = get_brand_token();
        data.loading.set(true);
        data.error.set(None);
        spawn_local(async move {
            let result = async {
                let campaigns = list_brand_campaigns(token.clone()).await?;
                let contracts = list_brand_contracts(token.clone()).await?;
                let licenses = list_brand_licenses(token.clone()).await?;
                let creators = list_marketplace_creators(token).await?;
                Ok::<_, ServerFnError>((campaigns, contracts, licenses, creators))
            }
            .await;

            match result {
                Ok((campaigns, contracts, licenses, creators)) => {
                    data.campaigns.set(campaigns);
                    data.contracts.set(contracts);
                    data.licenses.set(licenses);
                    data.creators.set(creators);
                }
                Err(e) => {
                    leptos::logging::warn!("brand dashboard load failed: {}", e);
                    data.error.set(Some(e.to_string()));
                }
            }
            data.loading.set(false);
        });
    }
}

fn usd(cents: i64) -> String {
    format_cents(cents, Currency::Usd)
}

fn optional_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(long_date).unwrap_or_else(|| "TBD".to_string())
}

fn format_followers(count: i64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

#[component]
fn DashboardHome(data: BrandData, summary: Memo<BrandSummary>) -> impl IntoView {
    let show_escrow = RwSignal::new(false);

    let escrow_rows = move || {
        let ids = summary.with(|s| s.escrow_project_ids.clone());
        data.campaigns.with(|campaigns| {
            campaigns
                .iter()
                .filter(|c| ids.contains(&c.id))
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="stat-grid">
            <div class="stat-card">
                <p class="stat-label">"Active Projects"</p>
                <p class="stat-value">{move || summary.get().active_campaigns}</p>
                <p class="muted small">{move || format!("{} awaiting approval", summary.get().pending_approvals)}</p>
            </div>
            <div class="stat-card clickable" on:click=move |_| show_escrow.set(true)>
                <p class="stat-label">"In Escrow"</p>
                <p class="stat-value">{move || format_thousands(summary.get().escrow_total_cents)}</p>
                <p class="muted small">"Click for details"</p>
            </div>
            <div class="stat-card">
                <p class="stat-label">"Pending Approvals"</p>
                <p class="stat-value">{move || summary.get().pending_approvals}</p>
                <p class="muted small">"Action needed"</p>
            </div>
            <div class="stat-card">
                <p class="stat-label">"Live Licenses"</p>
                <p class="stat-value">{move || summary.get().live_licenses}</p>
                <p class="muted small">{move || format!("{} expiring soon", summary.get().expiring_licenses)}</p>
            </div>
        </div>

        <div class="bookings-card">
            <h3>"Recent Campaigns"</h3>
            {move || {
                data.campaigns.with(|campaigns| {
                    campaigns
                        .iter()
                        .take(3)
                        .map(|c| view! {
                            <div class="campaign-row">
                                <div>
                                    <p class="strong">{c.name.clone()}</p>
                                    <p class="muted small">{c.creators.join(", ")}</p>
                                </div>
                                <span class="badge">{c.status.label()}</span>
                                <span>{format!("{} assets", c.assets_delivered)}</span>
                            </div>
                        })
                        .collect_view()
                })
            }}
        </div>

        <ModalShell
            show=show_escrow
            title=Signal::derive(|| "Escrow Details".to_string())
            subtitle=Signal::derive(|| "Funds held until content is approved".to_string())
            wide=true
        >
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Project"</th>
                        <th>"Status"</th>
                        <th>"Budget"</th>
                        <th>"In Escrow"</th>
                        <th>"Due"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        escrow_rows()
                            .into_iter()
                            .map(|c| view! {
                                <tr>
                                    <td>{c.name.clone()}</td>
                                    <td>{c.status.label()}</td>
                                    <td>{usd(c.budget_cents)}</td>
                                    <td>{usd(c.escrow_cents)}</td>
                                    <td>{optional_date(c.due_date)}</td>
                                </tr>
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <p class="strong">{move || format!("Total: {}", usd(summary.get().escrow_total_cents))}</p>
        </ModalShell>
    }
}

#[component]
fn CreatorMarketplace(creators: RwSignal<Vec<Creator>>) -> impl IntoView {
    let query = RwSignal::new(String::new());
    let matching = move || {
        let q = query.get();
        creators.with(|all| all.iter().filter(|c| c.matches(&q)).cloned().collect::<Vec<_>>())
    };

    view! {
        <div class="bookings-card">
            <input
                type="search"
                class="search-input"
                placeholder="Search creators by name, location, or tag..."
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <div class="creator-grid">
                {move || {
                    let found = matching();
                    if found.is_empty() {
                        return view! { <p class="muted">"No creators match your search"</p> }.into_any();
                    }
                    found
                        .into_iter()
                        .map(|c| view! {
                            <div class="creator-card">
                                <div class="creator-header">
                                    <p class="strong">{c.name.clone()}</p>
                                    {c.verified.then(|| view! { <span class="badge success">"Verified"</span> })}
                                </div>
                                <p class="muted small">{format!("{} · {}", c.location, c.creator_type)}</p>
                                <p>{c.tagline.clone()}</p>
                                <div class="creator-stats">
                                    <span>{format!("{} followers", format_followers(c.followers))}</span>
                                    <span>{format!("{:.1}% engagement", c.engagement_pct)}</span>
                                </div>
                                <div class="tag-list">
                                    {c.tags
                                        .iter()
                                        .map(|t| view! { <span class="badge tag">{t.clone()}</span> })
                                        .collect_view()}
                                </div>
                                <p class="strong">{format!("From {}", usd(c.price_cents))}</p>
                                <p class="muted small">{format!("Turnaround: {}", c.turnaround)}</p>
                            </div>
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </div>
    }
}

#[component]
fn CampaignsTable(campaigns: RwSignal<Vec<Campaign>>) -> impl IntoView {
    view! {
        <div class="bookings-card">
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Campaign"</th>
                        <th>"Creators"</th>
                        <th>"Status"</th>
                        <th>"Budget"</th>
                        <th>"Go Live"</th>
                        <th>"Territory"</th>
                        <th>"Channels"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        campaigns.with(|all| {
                            all.iter()
                                .map(|c| view! {
                                    <tr>
                                        <td class="strong">{c.name.clone()}</td>
                                        <td>{c.creators.join(", ")}</td>
                                        <td><span class="badge">{c.status.label()}</span></td>
                                        <td>{usd(c.budget_cents)}</td>
                                        <td>{optional_date(c.go_live)}</td>
                                        <td>{c.territory.clone()}</td>
                                        <td>{c.channels.join(", ")}</td>
                                    </tr>
                                })
                                .collect_view()
                        })
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn ContractsTable(contracts: RwSignal<Vec<Contract>>, summary: Memo<BrandSummary>) -> impl IntoView {
    view! {
        <div class="bookings-card">
            <p class="muted">
                {move || format!("Creator earnings after platform fees: {}", usd(summary.get().creator_earnings_cents))}
            </p>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Project"</th>
                        <th>"Creator"</th>
                        <th>"Status"</th>
                        <th>"Term"</th>
                        <th>"Total Fee"</th>
                        <th>"Creator Earnings"</th>
                        <th>"Payment"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        contracts.with(|all| {
                            all.iter()
                                .map(|c| {
                                    let creator = match &c.creator_handle {
                                        Some(handle) => format!("{} ({})", c.creator_name, handle),
                                        None => c.creator_name.clone(),
                                    };
                                    let term = format!(
                                        "{} to {}",
                                        optional_date(c.signed_date),
                                        optional_date(c.expiration_date),
                                    );
                                    view! {
                                        <tr>
                                            <td class="strong">{c.project_name.clone()}</td>
                                            <td>{creator}</td>
                                            <td><span class="badge">{c.status.label()}</span></td>
                                            <td>{term}</td>
                                            <td>{usd(c.total_fee_cents)}</td>
                                            <td>{usd(c.creator_earnings_cents())}</td>
                                            <td>{c.payment_status.label()}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn LicensesTable(licenses: RwSignal<Vec<License>>) -> impl IntoView {
    view! {
        <div class="bookings-card">
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Asset"</th>
                        <th>"Creator"</th>
                        <th>"Territory"</th>
                        <th>"Channels"</th>
                        <th>"Ends"</th>
                        <th>"Days Left"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let now = today();
                        licenses.with(|all| {
                            all.iter()
                                .map(|l| view! {
                                    <tr>
                                        <td class="strong">{l.asset_name.clone()}</td>
                                        <td>{l.creator_name.clone()}</td>
                                        <td>{l.territory.clone()}</td>
                                        <td>{l.channels.join(", ")}</td>
                                        <td>{long_date(l.end_date)}</td>
                                        <td>{l.days_remaining(now)}</td>
                                        <td><span class="badge">{l.status.label()}</span></td>
                                    </tr>
                                })
                                .collect_view()
                        })
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
pub fn BrandDashboard() -> impl IntoView {
    provide_toaster();
    let data = BrandData::new();
    let section = RwSignal::new(BrandSection::default());

    Effect::new(move |_| data.load());

    let summary = Memo::new(move |_| {
        data.campaigns.with(|campaigns| {
            data.contracts.with(|contracts| {
                data.licenses
                    .with(|licenses| BrandSummary::compute(campaigns, contracts, licenses))
            })
        })
    });

    view! {
        <div class="brand-dashboard">
            <nav class="brand-nav">
                {BrandSection::ALL
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
            </nav>

            <section class="brand-content">
                <h2>{move || section.get().label()}</h2>
                {move || {
                    if let Some(message) = data.error.get() {
                        return view! {
                            <ErrorView
                                message=Some(message)
                                on_retry=Callback::new(move |_| data.load())
                            />
                        }
                        .into_any();
                    }
                    if data.loading.get() {
                        return view! { <LoadingView message=Some("Loading dashboard...".to_string())/> }.into_any();
                    }
                    match section.get() {
                        BrandSection::Home => view! { <DashboardHome data=data summary=summary/> }.into_any(),
                        BrandSection::Marketplace => {
                            view! { <CreatorMarketplace creators=data.creators/> }.into_any()
                        }
                        BrandSection::Campaigns => view! { <CampaignsTable campaigns=data.campaigns/> }.into_any(),
                        BrandSection::Contracts => {
                            view! { <ContractsTable contracts=data.contracts summary=summary/> }.into_any()
                        }
                        BrandSection::Usage => view! { <LicensesTable licenses=data.licenses/> }.into_any(),
                    }
                }}
            </section>
            <ToastHost/>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follower_counts_are_abbreviated() {
        assert_eq!(format_followers(950), "950");
        assert_eq!(format_followers(12_300), "12.3K");
        assert_eq!(format_followers(2_500_000), "2.5M");
    }

    #[test]
    fn missing_dates_read_tbd() {
        assert_eq!(optional_date(None), "TBD");
    }
}
