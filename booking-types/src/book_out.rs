use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookOutReason {
    #[default]
    Personal,
    Medical,
    Vacation,
    OtherBooking,
    Other,
}

impl BookOutReason {
    pub const ALL: [BookOutReason; 5] = [
        BookOutReason::Personal,
        BookOutReason::Medical,
        BookOutReason::Vacation,
        BookOutReason::OtherBooking,
        BookOutReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Medical => "medical",
            Self::Vacation => "vacation",
            Self::OtherBooking => "other_booking",
            Self::Other => "other",
        }
    }

    /// Display text: the stored key with underscores turned into spaces.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value.trim())
    }
}

impl fmt::Display for BookOutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A date range during which a talent cannot be booked. Both ends are
/// inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookOut {
    pub id: i64,
    pub talent_id: i64,
    pub reason: BookOutReason,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

impl BookOut {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    pub fn length_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookOut {
    pub talent_id: i64,
    pub reason: BookOutReason,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

impl NewBookOut {
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.talent_id <= 0 {
            return Err(BookingError::validation("talent is required"));
        }
        if self.end_date < self.start_date {
            return Err(BookingError::validation("end date is before start date"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn book_out() -> BookOut {
        BookOut {
            id: 1,
            talent_id: 4,
            reason: BookOutReason::Vacation,
            start_date: d(2026, 1, 10),
            end_date: d(2026, 1, 12),
            notes: None,
        }
    }

    #[test]
    fn covers_is_inclusive_on_both_ends() {
        let b = book_out();
        assert!(b.covers(d(2026, 1, 10)));
        assert!(b.covers(d(2026, 1, 12)));
        assert!(!b.covers(d(2026, 1, 9)));
        assert!(!b.covers(d(2026, 1, 13)));
        assert_eq!(b.length_days(), 3);
    }

    #[test]
    fn overlap_detects_touching_ranges() {
        let b = book_out();
        assert!(b.overlaps(d(2026, 1, 12), d(2026, 1, 20)));
        assert!(!b.overlaps(d(2026, 1, 13), d(2026, 1, 20)));
    }

    #[test]
    fn reason_label_replaces_underscores() {
        assert_eq!(BookOutReason::OtherBooking.label(), "other booking");
        assert_eq!(BookOutReason::parse("medical"), Some(BookOutReason::Medical));
        assert_eq!(BookOutReason::parse("holiday"), None);
    }

    #[test]
    fn new_book_out_requires_ordered_dates() {
        let mut new = NewBookOut {
            talent_id: 4,
            reason: BookOutReason::Personal,
            start_date: d(2026, 2, 2),
            end_date: d(2026, 2, 1),
            notes: None,
        };
        assert!(new.validate().is_err());
        new.end_date = d(2026, 2, 2);
        assert!(new.validate().is_ok());
    }
}
