//! Record builders shared by the unit tests.

use booking_types::{
    Booking, BookingStatus, BookingType, Client, Currency, NotifyChannels, PaymentTerms, RateType,
    Talent,
};
use chrono::{NaiveDate, TimeZone, Utc};

pub fn booking_on(id: i64, date: &str) -> Booking {
    let created_at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    Booking {
        id,
        talent_id: id,
        talent_name: format!("Talent {}", id),
        client_id: Some(1),
        client_name: "Nike".to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        all_day: false,
        call_time: Some("09:00".to_string()),
        wrap_time: Some("17:00".to_string()),
        location: "Studio 4".to_string(),
        location_notes: None,
        rate_cents: None,
        currency: Currency::Usd,
        rate_type: RateType::Day,
        booking_type: BookingType::Casting,
        status: BookingStatus::Pending,
        usage_terms: None,
        usage_duration: None,
        exclusive: false,
        notes: None,
        industries: Vec::new(),
        notify: NotifyChannels::default(),
        files: Vec::new(),
        created_at,
        updated_at: created_at,
    }
}

pub fn talent(id: i64, name: &str) -> Talent {
    Talent {
        id,
        name: name.to_string(),
        avatar_url: None,
    }
}

pub fn client_named(id: i64, company: &str) -> Client {
    Client {
        id,
        company: company.to_string(),
        contact_name: "Jordan".to_string(),
        email: None,
        phone: None,
        website: None,
        address: None,
        terms: PaymentTerms::Net30,
        industry_tags: Vec::new(),
        notes: None,
        revenue_cents: 0,
        bookings_count: 0,
        last_booking_at: None,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
    }
}
