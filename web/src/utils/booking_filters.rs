//! Search, filter and sort for the Manage Bookings list, and CSV export.

use std::cmp::Ordering;

use booking_types::Booking;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    BookingDate,
    TalentName,
    ClientName,
    RateAmount,
    CreatedDate,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::BookingDate,
        SortKey::TalentName,
        SortKey::ClientName,
        SortKey::RateAmount,
        SortKey::CreatedDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BookingDate => "bookingDate",
            Self::TalentName => "talentName",
            Self::ClientName => "clientName",
            Self::RateAmount => "rateAmount",
            Self::CreatedDate => "createdDate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BookingDate => "Booking Date",
            Self::TalentName => "Talent Name",
            Self::ClientName => "Client Name",
            Self::RateAmount => "Rate Amount",
            Self::CreatedDate => "Created Date",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub query: String,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub rate_min_cents: Option<i64>,
    pub rate_max_cents: Option<i64>,
    pub sort_key: SortKey,
    pub direction: SortDirection,
}

impl BookingFilter {
    /// Query matches talent, client, location or notes, ignoring case.
    pub fn matches(&self, booking: &Booking) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() {
            let hit = [
                booking.talent_name.as_str(),
                booking.client_name.as_str(),
                booking.location.as_str(),
                booking.notes.as_deref().unwrap_or_default(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }

        if self.date_start.is_some_and(|start| booking.date < start) {
            return false;
        }
        if self.date_end.is_some_and(|end| booking.date > end) {
            return false;
        }

        let rate = booking.rate_cents.unwrap_or(0);
        if self.rate_min_cents.is_some_and(|min| rate < min) {
            return false;
        }
        if self.rate_max_cents.is_some_and(|max| rate > max) {
            return false;
        }
        true
    }

    fn compare(&self, a: &Booking, b: &Booking) -> Ordering {
        let ordering = match self.sort_key {
            SortKey::BookingDate => a.date.cmp(&b.date),
            SortKey::TalentName => a.talent_name.to_lowercase().cmp(&b.talent_name.to_lowercase()),
            SortKey::ClientName => a.client_name.to_lowercase().cmp(&b.client_name.to_lowercase()),
            SortKey::RateAmount => a.rate_cents.unwrap_or(0).cmp(&b.rate_cents.unwrap_or(0)),
            SortKey::CreatedDate => a.created_at.cmp(&b.created_at),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Matching bookings in display order. The sort is stable, so equal keys
    /// keep their incoming order.
    pub fn apply(&self, bookings: &[Booking]) -> Vec<Booking> {
        let mut hits: Vec<Booking> = bookings.iter().filter(|b| self.matches(b)).cloned().collect();
        hits.sort_by(|a, b| self.compare(a, b));
        hits
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportColumn {
    TalentName,
    ClientName,
    BookingDate,
    CallTime,
    WrapTime,
    Location,
    Rate,
    Type,
    Status,
    Notes,
    CreatedDate,
    UpdatedDate,
}

impl ExportColumn {
    pub const ALL: [ExportColumn; 12] = [
        ExportColumn::TalentName,
        ExportColumn::ClientName,
        ExportColumn::BookingDate,
        ExportColumn::CallTime,
        ExportColumn::WrapTime,
        ExportColumn::Location,
        ExportColumn::Rate,
        ExportColumn::Type,
        ExportColumn::Status,
        ExportColumn::Notes,
        ExportColumn::CreatedDate,
        ExportColumn::UpdatedDate,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Self::TalentName => "Talent Name",
            Self::ClientName => "Client Name",
            Self::BookingDate => "Booking Date",
            Self::CallTime => "Call Time",
            Self::WrapTime => "Wrap Time",
            Self::Location => "Location",
            Self::Rate => "Rate",
            Self::Type => "Type",
            Self::Status => "Status",
            Self::Notes => "Notes",
            Self::CreatedDate => "Created Date",
            Self::UpdatedDate => "Updated Date",
        }
    }

    fn value(&self, b: &Booking) -> String {
        match self {
            Self::TalentName => b.talent_name.clone(),
            Self::ClientName => b.client_name.clone(),
            Self::BookingDate => b.day_key(),
            Self::CallTime => b.call_time.clone().unwrap_or_default(),
            Self::WrapTime => b.wrap_time.clone().unwrap_or_default(),
            Self::Location => b.location.clone(),
            Self::Rate => b
                .rate_cents
                .map(|c| format!("{}.{:02} {}", c / 100, (c % 100).abs(), b.currency.code()))
                .unwrap_or_default(),
            Self::Type => b.booking_type.as_str().to_string(),
            Self::Status => b.status.as_str().to_string(),
            Self::Notes => b.notes.clone().unwrap_or_default(),
            Self::CreatedDate => b.created_at.format("%Y-%m-%d").to_string(),
            Self::UpdatedDate => b.updated_at.format("%Y-%m-%d").to_string(),
        }
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// RFC 4180 CSV with a header row and CRLF line endings.
pub fn bookings_to_csv(bookings: &[Booking], columns: &[ExportColumn]) -> String {
    let mut out = String::new();
    let header: Vec<String> = columns.iter().map(|c| csv_field(c.header())).collect();
    out.push_str(&header.join(","));
    out.push_str("\r\n");
    for b in bookings {
        let row: Vec<String> = columns.iter().map(|c| csv_field(&c.value(b))).collect();
        out.push_str(&row.join(","));
        out.push_str("\r\n");
    }
    out
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("bookings-{}.csv", today.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::booking_on;

    fn sample() -> Vec<Booking> {
        let mut a = booking_on(1, "2026-01-10");
        a.talent_name = "Emma".into();
        a.client_name = "Nike".into();
        a.rate_cents = Some(50_000);
        let mut b = booking_on(2, "2026-01-20");
        b.talent_name = "milan".into();
        b.client_name = "Vogue".into();
        b.location = "Paris".into();
        b.rate_cents = Some(150_000);
        let mut c = booking_on(3, "2026-02-02");
        c.talent_name = "Julia".into();
        c.client_name = "Adidas".into();
        c.notes = Some("needs PARIS visa".into());
        c.rate_cents = None;
        vec![a, b, c]
    }

    fn ids(bookings: &[Booking]) -> Vec<i64> {
        bookings.iter().map(|b| b.id).collect()
    }

    #[test]
    fn query_searches_location_and_notes() {
        let filter = BookingFilter {
            query: "paris".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&sample())), vec![3, 2]);
    }

    #[test]
    fn date_and_rate_ranges_are_inclusive() {
        let filter = BookingFilter {
            date_start: NaiveDate::from_ymd_opt(2026, 1, 10),
            date_end: NaiveDate::from_ymd_opt(2026, 1, 20),
            rate_min_cents: Some(50_000),
            sort_key: SortKey::BookingDate,
            direction: SortDirection::Asc,
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&sample())), vec![1, 2]);
    }

    #[test]
    fn sorts_by_name_ignoring_case_and_by_rate() {
        let mut filter = BookingFilter {
            sort_key: SortKey::TalentName,
            direction: SortDirection::Asc,
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&sample())), vec![1, 3, 2]);

        filter.sort_key = SortKey::RateAmount;
        filter.direction = filter.direction.toggled();
        assert_eq!(ids(&filter.apply(&sample())), vec![2, 1, 3]);
    }

    #[test]
    fn csv_quotes_fields_that_need_it() {
        let mut b = booking_on(1, "2026-01-10");
        b.talent_name = "Emma".into();
        b.notes = Some("bring \"red\" heels, size 8".into());
        b.rate_cents = Some(150_050);
        let csv = bookings_to_csv(
            &[b],
            &[ExportColumn::TalentName, ExportColumn::Rate, ExportColumn::Notes],
        );
        assert_eq!(
            csv,
            "Talent Name,Rate,Notes\r\nEmma,1500.50 USD,\"bring \"\"red\"\" heels, size 8\"\r\n"
        );
    }

    #[test]
    fn full_export_has_every_header() {
        let csv = bookings_to_csv(&[], &ExportColumn::ALL);
        assert_eq!(
            csv.trim_end(),
            "Talent Name,Client Name,Booking Date,Call Time,Wrap Time,Location,Rate,Type,Status,Notes,Created Date,Updated Date"
        );
    }
}
