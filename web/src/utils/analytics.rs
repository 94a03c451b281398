use std::collections::BTreeMap;

use booking_types::{Booking, BookingStatus, BookingType};
use chrono::{Datelike, NaiveDate, Weekday};

/// Figures on the Analytics tab, relative to `today`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsOverview {
    pub month_count: usize,
    pub week_count: usize,
    pub month_revenue_cents: i64,
    pub conversion_pct: Option<u32>,
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Weeks start on Sunday.
fn same_week(a: NaiveDate, b: NaiveDate) -> bool {
    a.week(Weekday::Sun).first_day() == b.week(Weekday::Sun).first_day()
}

/// Sum of this month's billable rates. Only confirmed or completed bookings
/// count, and negative or missing rates are skipped.
pub fn month_revenue_cents(bookings: &[Booking], today: NaiveDate) -> i64 {
    bookings
        .iter()
        .filter(|b| b.status.counts_toward_revenue() && same_month(b.date, today))
        .filter_map(Booking::billable_cents)
        .sum()
}

/// Share of castings and options that turned into confirmed or completed
/// work. `None` when nothing was ever pitched.
pub fn conversion_pct(bookings: &[Booking]) -> Option<u32> {
    let pitched = bookings
        .iter()
        .filter(|b| matches!(b.booking_type, BookingType::Casting | BookingType::Option))
        .count();
    if pitched == 0 {
        return None;
    }
    let won = bookings
        .iter()
        .filter(|b| {
            b.booking_type == BookingType::Confirmed
                || matches!(b.status, BookingStatus::Confirmed | BookingStatus::Completed)
        })
        .count();
    Some(((won * 100 / pitched).min(100)) as u32)
}

pub fn overview(bookings: &[Booking], today: NaiveDate) -> AnalyticsOverview {
    AnalyticsOverview {
        month_count: bookings.iter().filter(|b| same_month(b.date, today)).count(),
        week_count: bookings.iter().filter(|b| same_week(b.date, today)).count(),
        month_revenue_cents: month_revenue_cents(bookings, today),
        conversion_pct: conversion_pct(bookings),
    }
}

/// Bookings per type, keyed by wire name so the listing is stable.
pub fn type_counts(bookings: &[Booking]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for b in bookings {
        *counts.entry(b.booking_type.as_str()).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopTalent {
    pub name: String,
    pub count: usize,
}

/// Most booked talent. On a tie the one booked first in the list wins.
pub fn top_talent(bookings: &[Booking]) -> Option<TopTalent> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for b in bookings {
        let name = if b.talent_name.trim().is_empty() {
            "Unknown"
        } else {
            b.talent_name.as_str()
        };
        let count = counts.entry(name).or_insert(0);
        if *count == 0 {
            order.push(name);
        }
        *count += 1;
    }

    let mut best: Option<TopTalent> = None;
    for name in order {
        let count = counts[name];
        if best.as_ref().map_or(true, |b| count > b.count) {
            best = Some(TopTalent {
                name: name.to_string(),
                count,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::booking_on;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn priced(id: i64, date: &str, status: BookingStatus, cents: Option<i64>) -> Booking {
        let mut b = booking_on(id, date);
        b.status = status;
        b.rate_cents = cents;
        b
    }

    #[test]
    fn revenue_counts_only_billable_status_in_current_month() {
        let bookings = vec![
            priced(1, "2026-01-05", BookingStatus::Confirmed, Some(100_000)),
            priced(2, "2026-01-06", BookingStatus::Completed, Some(50_000)),
            priced(3, "2026-01-07", BookingStatus::Pending, Some(70_000)),
            priced(4, "2026-01-08", BookingStatus::Cancelled, Some(90_000)),
            priced(5, "2026-02-01", BookingStatus::Confirmed, Some(30_000)),
            priced(6, "2026-01-09", BookingStatus::Confirmed, Some(-5_000)),
            priced(7, "2026-01-10", BookingStatus::Confirmed, None),
        ];
        assert_eq!(month_revenue_cents(&bookings, d(2026, 1, 20)), 150_000);
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2026-01-11 is a Sunday, 2026-01-10 the Saturday before.
        let bookings = vec![booking_on(1, "2026-01-10"), booking_on(2, "2026-01-11"), booking_on(3, "2026-01-17")];
        let stats = overview(&bookings, d(2026, 1, 14));
        assert_eq!(stats.week_count, 2);
        assert_eq!(stats.month_count, 3);
    }

    #[test]
    fn type_counts_group_by_wire_name() {
        let mut fitting = booking_on(2, "2026-01-02");
        fitting.booking_type = BookingType::Fitting;
        let counts = type_counts(&[booking_on(1, "2026-01-01"), fitting, booking_on(3, "2026-01-03")]);
        assert_eq!(counts.get("casting"), Some(&2));
        assert_eq!(counts.get("fitting"), Some(&1));
    }

    #[test]
    fn top_talent_prefers_first_on_tie() {
        let mut a = booking_on(1, "2026-01-01");
        a.talent_name = "Emma".into();
        let mut b = booking_on(2, "2026-01-02");
        b.talent_name = "Milan".into();
        let mut c = booking_on(3, "2026-01-03");
        c.talent_name = "Milan".into();
        let mut e = booking_on(4, "2026-01-04");
        e.talent_name = "Emma".into();

        let top = top_talent(&[a, b, c, e]).unwrap();
        assert_eq!(top, TopTalent { name: "Emma".into(), count: 2 });
        assert_eq!(top_talent(&[]), None);
    }

    #[test]
    fn conversion_is_none_without_pitches() {
        let mut confirmed = booking_on(1, "2026-01-01");
        confirmed.booking_type = BookingType::Confirmed;
        assert_eq!(conversion_pct(&[confirmed.clone()]), None);

        let casting = booking_on(2, "2026-01-02");
        assert_eq!(conversion_pct(&[confirmed, casting]), Some(100));
    }
}
