//! Client database filtering and the stat cards above it.

use booking_types::Client;
use chrono::{DateTime, Datelike, Utc};

/// Industry filter values offered in the dropdown; "all" disables filtering.
pub const INDUSTRY_FILTERS: [(&str, &str); 9] = [
    ("all", "All Industries"),
    ("fashion", "Fashion"),
    ("beauty", "Beauty"),
    ("fitness", "Fitness"),
    ("commercial", "Commercial"),
    ("editorial", "Editorial"),
    ("ecommerce", "E-commerce"),
    ("advertising", "Advertising"),
    ("filmtv", "Film/TV"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientSort {
    #[default]
    Name,
    Bookings,
    Revenue,
    Recent,
}

impl ClientSort {
    pub const ALL: [ClientSort; 4] = [
        ClientSort::Name,
        ClientSort::Bookings,
        ClientSort::Revenue,
        ClientSort::Recent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Bookings => "bookings",
            Self::Revenue => "revenue",
            Self::Recent => "recent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Sort by Name",
            Self::Bookings => "Sort by Bookings",
            Self::Revenue => "Sort by Revenue",
            Self::Recent => "Sort by Last Booking",
        }
    }

    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientStats {
    pub total: usize,
    pub active_this_month: usize,
    pub revenue_cents: i64,
    pub avg_booking_cents: i64,
}

impl ClientStats {
    pub fn compute(clients: &[Client], now: DateTime<Utc>) -> Self {
        let active_this_month = clients
            .iter()
            .filter(|c| {
                c.last_booking_at
                    .is_some_and(|at| at.year() == now.year() && at.month() == now.month())
            })
            .count();
        let revenue_cents: i64 = clients.iter().map(|c| c.revenue_cents).sum();
        let bookings: i64 = clients.iter().map(|c| c.bookings_count).sum();
        Self {
            total: clients.len(),
            active_this_month,
            revenue_cents,
            avg_booking_cents: revenue_cents / bookings.max(1),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientFilter {
    pub query: String,
    pub industry: String,
    pub sort: ClientSort,
}

impl ClientFilter {
    fn matches(&self, client: &Client) -> bool {
        let query = self.query.trim().to_lowercase();
        let text_hit = query.is_empty()
            || [
                Some(client.company.as_str()),
                Some(client.contact_name.as_str()),
                client.email.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&query));

        let industry = self.industry.trim();
        let industry_hit = industry.is_empty() || industry == "all" || client.has_industry(industry);

        text_hit && industry_hit
    }

    /// Name sorts ascending; every other key puts the largest or most recent
    /// first.
    pub fn apply(&self, clients: &[Client]) -> Vec<Client> {
        let mut hits: Vec<Client> = clients.iter().filter(|c| self.matches(c)).cloned().collect();
        match self.sort {
            ClientSort::Name => hits.sort_by_key(|c| c.company.to_lowercase()),
            ClientSort::Bookings => hits.sort_by(|a, b| b.bookings_count.cmp(&a.bookings_count)),
            ClientSort::Revenue => hits.sort_by(|a, b| b.revenue_cents.cmp(&a.revenue_cents)),
            ClientSort::Recent => hits.sort_by(|a, b| b.last_booking_at.cmp(&a.last_booking_at)),
        }
        hits
    }
}

/// Ids of clients whose company name collides with another one, ignoring
/// case and surrounding whitespace. Used to suggest merges.
pub fn duplicate_groups(clients: &[Client]) -> Vec<Vec<i64>> {
    let mut groups: Vec<(String, Vec<i64>)> = Vec::new();
    for client in clients {
        let key = client.company.trim().to_lowercase();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, ids)) => ids.push(client.id),
            None => groups.push((key, vec![client.id])),
        }
    }
    groups
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(_, ids)| ids)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::client_named;
    use chrono::TimeZone;

    fn roster() -> Vec<Client> {
        let mut nike = client_named(1, "Nike");
        nike.industry_tags = vec!["Fashion".into(), "Film/TV".into()];
        nike.revenue_cents = 300_000;
        nike.bookings_count = 3;
        nike.last_booking_at = Some(Utc.with_ymd_and_hms(2026, 1, 4, 10, 0, 0).unwrap());

        let mut vogue = client_named(2, "vogue");
        vogue.email = Some("casting@vogue.example".into());
        vogue.industry_tags = vec!["Editorial".into()];
        vogue.revenue_cents = 100_000;
        vogue.bookings_count = 1;
        vogue.last_booking_at = Some(Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap());

        let adidas = client_named(3, "Adidas");
        vec![nike, vogue, adidas]
    }

    #[test]
    fn stats_average_over_all_bookings() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        let stats = ClientStats::compute(&roster(), now);
        assert_eq!(
            stats,
            ClientStats {
                total: 3,
                active_this_month: 1,
                revenue_cents: 400_000,
                avg_booking_cents: 100_000,
            }
        );
        assert_eq!(ClientStats::compute(&[], now).avg_booking_cents, 0);
    }

    #[test]
    fn industry_filter_uses_normalized_keys() {
        let filter = ClientFilter {
            industry: "filmtv".into(),
            ..Default::default()
        };
        let ids: Vec<i64> = filter.apply(&roster()).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn query_checks_email_and_sorts_by_name() {
        let filter = ClientFilter {
            query: "VOGUE.example".into(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&roster())[0].id, 2);

        let all = ClientFilter::default().apply(&roster());
        let names: Vec<&str> = all.iter().map(|c| c.company.as_str()).collect();
        assert_eq!(names, vec!["Adidas", "Nike", "vogue"]);
    }

    #[test]
    fn recent_sort_puts_never_booked_last() {
        let filter = ClientFilter {
            sort: ClientSort::parse("recent"),
            ..Default::default()
        };
        let ids: Vec<i64> = filter.apply(&roster()).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn duplicates_group_by_company_name() {
        let mut clients = roster();
        clients.push(client_named(9, " NIKE "));
        assert_eq!(duplicate_groups(&clients), vec![vec![1, 9]]);
    }
}
