use std::collections::HashMap;

use booking_types::{BookOut, Talent};
use chrono::NaiveDate;

pub const UNKNOWN_TALENT: &str = "Unknown Talent";

/// Talent id to display name, for book-out cards.
#[derive(Debug, Clone, Default)]
pub struct TalentNames(HashMap<i64, String>);

impl TalentNames {
    pub fn new(talents: &[Talent]) -> Self {
        Self(talents.iter().map(|t| (t.id, t.name.clone())).collect())
    }

    pub fn get(&self, id: i64) -> &str {
        self.0.get(&id).map(String::as_str).unwrap_or(UNKNOWN_TALENT)
    }
}

/// "Jan 5, 2026"
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn date_range_label(book_out: &BookOut) -> String {
    format!("{} - {}", short_date(book_out.start_date), short_date(book_out.end_date))
}

/// Book-outs sorted by start date, optionally restricted to one talent.
pub fn book_outs_for(book_outs: &[BookOut], talent_id: Option<i64>) -> Vec<BookOut> {
    let mut rows: Vec<BookOut> = book_outs
        .iter()
        .filter(|b| talent_id.map_or(true, |id| b.talent_id == id))
        .cloned()
        .collect();
    rows.sort_by_key(|b| (b.start_date, b.id));
    rows
}

/// True when `talent_id` is booked out on `date`.
pub fn is_booked_out(book_outs: &[BookOut], talent_id: i64, date: NaiveDate) -> bool {
    book_outs
        .iter()
        .any(|b| b.talent_id == talent_id && b.covers(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::talent;
    use booking_types::BookOutReason;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn book_out(id: i64, talent_id: i64, start: &str, end: &str) -> BookOut {
        BookOut {
            id,
            talent_id,
            reason: BookOutReason::Vacation,
            start_date: d(start),
            end_date: d(end),
            notes: None,
        }
    }

    #[test]
    fn unknown_ids_fall_back() {
        let names = TalentNames::new(&[talent(1, "Emma")]);
        assert_eq!(names.get(1), "Emma");
        assert_eq!(names.get(2), "Unknown Talent");
    }

    #[test]
    fn range_label_uses_short_month() {
        let row = book_out(1, 1, "2026-01-05", "2026-01-12");
        assert_eq!(date_range_label(&row), "Jan 5, 2026 - Jan 12, 2026");
    }

    #[test]
    fn booked_out_is_inclusive_and_per_talent() {
        let rows = vec![book_out(1, 1, "2026-01-05", "2026-01-07")];
        assert!(is_booked_out(&rows, 1, d("2026-01-05")));
        assert!(is_booked_out(&rows, 1, d("2026-01-07")));
        assert!(!is_booked_out(&rows, 1, d("2026-01-08")));
        assert!(!is_booked_out(&rows, 2, d("2026-01-06")));
    }

    #[test]
    fn filtered_list_is_sorted_by_start() {
        let rows = vec![
            book_out(1, 1, "2026-03-01", "2026-03-02"),
            book_out(2, 2, "2026-01-01", "2026-01-02"),
            book_out(3, 1, "2026-02-01", "2026-02-02"),
        ];
        let ids: Vec<i64> = book_outs_for(&rows, Some(1)).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(book_outs_for(&rows, None).len(), 3);
    }
}
