//! Month grid, color table and keyboard shortcuts for the schedule calendar.

use booking_types::{BookOut, Booking, BookingStatus, BookingType};
use chrono::{Datelike, Days, Months, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Years offered by the year dropdown.
pub const SELECTABLE_YEARS: [i32; 5] = [2025, 2026, 2027, 2028, 2029];

/// Canonical `YYYY-MM-DD` key for a day of a month.
pub fn day_key(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Number of empty slots before the 1st in a Sunday-first week row.
pub fn first_weekday_offset(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub day: u32,
    pub key: String,
    pub is_today: bool,
    pub is_selected: bool,
    /// Some talent is booked out on this day.
    pub unavailable: bool,
    /// A booking sits on a day its talent is booked out.
    pub conflict: bool,
    pub bookings: Vec<Booking>,
}

/// One rendered month. `leading` holds the trailing day numbers of the
/// previous month shown as padding; they carry no bookings and are not
/// clickable.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub leading: Vec<u32>,
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    pub fn build(
        current: NaiveDate,
        today: NaiveDate,
        bookings: &[Booking],
        book_outs: &[BookOut],
    ) -> Self {
        let year = current.year();
        let month = current.month();
        let offset = first_weekday_offset(year, month);

        let first = first_of_month(current);
        let leading = (0..offset)
            .rev()
            .filter_map(|back| first.checked_sub_days(Days::new(u64::from(back) + 1)))
            .map(|d| d.day())
            .collect();

        let days = (1..=days_in_month(year, month))
            .map(|day| {
                let key = day_key(year, month, day);
                let date = NaiveDate::from_ymd_opt(year, month, day);
                let day_bookings: Vec<Booking> = bookings
                    .iter()
                    .filter(|b| b.day_key() == key)
                    .cloned()
                    .collect();
                let blocking: Vec<&BookOut> = match date {
                    Some(date) => book_outs.iter().filter(|bo| bo.covers(date)).collect(),
                    None => Vec::new(),
                };
                let conflict = day_bookings.iter().any(|b| {
                    !b.is_cancelled() && blocking.iter().any(|bo| bo.talent_id == b.talent_id)
                });

                DayCell {
                    day,
                    is_today: date == Some(today),
                    is_selected: day == current.day(),
                    unavailable: !blocking.is_empty(),
                    conflict,
                    bookings: day_bookings,
                    key,
                }
            })
            .collect();

        Self {
            year,
            month,
            leading,
            days,
        }
    }

    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    pub fn cell(&self, day: u32) -> Option<&DayCell> {
        self.days.iter().find(|c| c.day == day)
    }
}

/// Background and text color for a calendar chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipColor {
    pub background: &'static str,
    pub text: &'static str,
}

impl ChipColor {
    pub fn style(&self) -> String {
        format!("background-color: {}; color: {};", self.background, self.text)
    }
}

pub fn type_color(booking_type: BookingType) -> ChipColor {
    let (background, text) = match booking_type {
        BookingType::Casting => ("#dbeafe", "#1e40af"),
        BookingType::Option => ("#fef9c3", "#854d0e"),
        BookingType::Confirmed => ("#dcfce7", "#166534"),
        BookingType::TestShoot => ("#ffedd5", "#9a3412"),
        BookingType::Fitting => ("#fefce8", "#a16207"),
        BookingType::Rehearsal => ("#e5e7eb", "#1f2937"),
        BookingType::Other => ("#e0e7ff", "#3730a3"),
    };
    ChipColor { background, text }
}

/// Chip color for a booking; finished and cancelled work is shown by status.
pub fn booking_color(booking: &Booking) -> ChipColor {
    match booking.status {
        BookingStatus::Completed => ChipColor {
            background: "#f3e8ff",
            text: "#6b21a8",
        },
        BookingStatus::Cancelled => ChipColor {
            background: "#fee2e2",
            text: "#991b1b",
        },
        _ => type_color(booking.booking_type),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub background: &'static str,
    pub marker: Option<&'static str>,
}

pub fn legend() -> Vec<LegendEntry> {
    let entry = |label, background| LegendEntry {
        label,
        background,
        marker: None,
    };
    vec![
        entry("Casting", "#dbeafe"),
        entry("Option", "#fef9c3"),
        entry("Confirmed", "#dcfce7"),
        entry("Completed", "#f3e8ff"),
        entry("Cancelled", "#fee2e2"),
        entry("Test Shoot", "#ffedd5"),
        entry("Fitting", "#fefce8"),
        entry("Rehearsal", "#e5e7eb"),
        LegendEntry {
            label: "Unavailable",
            background: "#fee2e2",
            marker: Some("✕"),
        },
        LegendEntry {
            label: "Conflict",
            background: "#fef2f2",
            marker: Some("!"),
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarShortcut {
    NewBooking,
    Today,
    PreviousDay,
    NextDay,
    CloseModals,
}

impl CalendarShortcut {
    /// Decodes a `keydown` key. Keys typed into a text field are ignored.
    pub fn from_key(key: &str, focused_tag: Option<&str>) -> Option<Self> {
        if let Some(tag) = focused_tag {
            if tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea") {
                return None;
            }
        }
        match key.to_ascii_lowercase().as_str() {
            "c" => Some(Self::NewBooking),
            "t" => Some(Self::Today),
            "escape" => Some(Self::CloseModals),
            "arrowleft" => Some(Self::PreviousDay),
            "arrowright" => Some(Self::NextDay),
            _ => None,
        }
    }
}

// Month arithmetic clamps to the last valid day, so Jan 31 + 1 month is Feb 28/29.

pub fn previous_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

pub fn with_month(date: NaiveDate, month: u32) -> NaiveDate {
    clamp_date(date.year(), month, date.day()).unwrap_or(date)
}

pub fn with_year(date: NaiveDate, year: i32) -> NaiveDate {
    clamp_date(year, date.month(), date.day()).unwrap_or(date)
}

pub fn with_day(date: NaiveDate, day: u32) -> NaiveDate {
    clamp_date(date.year(), date.month(), day).unwrap_or(date)
}

fn clamp_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = days_in_month(year, month);
    if last == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, last))
}

/// `MM/DD/YYYY`, as shown on the date picker button.
pub fn picker_label(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Header numbers of the schedule tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleStats {
    pub total: usize,
    pub this_month: usize,
    pub confirmed: usize,
    pub pending: usize,
}

impl ScheduleStats {
    pub fn compute(bookings: &[Booking], today: NaiveDate) -> Self {
        let mut stats = Self {
            total: bookings.len(),
            ..Default::default()
        };
        for b in bookings {
            if b.date.year() == today.year() && b.date.month() == today.month() {
                stats.this_month += 1;
            }
            match b.status {
                BookingStatus::Confirmed => stats.confirmed += 1,
                BookingStatus::Pending => stats.pending += 1,
                _ => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::booking_on;
    use booking_types::BookOutReason;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // -- grid ----------------------------------------------------------

    #[test]
    fn january_2026_has_31_cells_after_4_fillers() {
        let grid = MonthGrid::build(d(2026, 1, 12), d(2026, 1, 12), &[], &[]);
        assert_eq!(grid.days.len(), 31);
        // Jan 1 2026 is a Thursday.
        assert_eq!(grid.leading, vec![28, 29, 30, 31]);
        assert_eq!(grid.title(), "January 2026");
    }

    #[test]
    fn february_fillers_come_from_january() {
        // Feb 1 2026 is a Sunday.
        let grid = MonthGrid::build(d(2026, 2, 1), d(2026, 1, 12), &[], &[]);
        assert!(grid.leading.is_empty());
        assert_eq!(grid.days.len(), 28);

        let grid = MonthGrid::build(d(2028, 2, 10), d(2026, 1, 12), &[], &[]);
        assert_eq!(grid.days.len(), 29);
    }

    #[test]
    fn booking_lands_only_on_its_own_day() {
        let bookings = vec![booking_on(1, "2026-01-15")];
        let jan = MonthGrid::build(d(2026, 1, 1), d(2026, 1, 1), &bookings, &[]);
        let with_booking: Vec<u32> = jan
            .days
            .iter()
            .filter(|c| !c.bookings.is_empty())
            .map(|c| c.day)
            .collect();
        assert_eq!(with_booking, vec![15]);

        let feb = MonthGrid::build(d(2026, 2, 1), d(2026, 1, 1), &bookings, &[]);
        assert!(feb.days.iter().all(|c| c.bookings.is_empty()));
        let dec = MonthGrid::build(d(2025, 12, 1), d(2026, 1, 1), &bookings, &[]);
        assert!(dec.days.iter().all(|c| c.bookings.is_empty()));
    }

    #[test]
    fn book_out_marks_unavailable_and_conflict() {
        let mut booking = booking_on(1, "2026-01-15");
        booking.talent_id = 9;
        let book_out = BookOut {
            id: 1,
            talent_id: 9,
            reason: BookOutReason::Medical,
            start_date: d(2026, 1, 14),
            end_date: d(2026, 1, 16),
            notes: None,
        };
        let grid = MonthGrid::build(d(2026, 1, 1), d(2026, 1, 1), &[booking], &[book_out]);
        let cell = grid.cell(15).unwrap();
        assert!(cell.unavailable);
        assert!(cell.conflict);
        let cell = grid.cell(14).unwrap();
        assert!(cell.unavailable);
        assert!(!cell.conflict);
        assert!(!grid.cell(17).unwrap().unavailable);
    }

    #[test]
    fn today_and_selection_are_flagged() {
        let grid = MonthGrid::build(d(2026, 3, 20), d(2026, 3, 2), &[], &[]);
        assert!(grid.cell(2).unwrap().is_today);
        assert!(grid.cell(20).unwrap().is_selected);
        assert!(!grid.cell(2).unwrap().is_selected);
    }

    // -- colors --------------------------------------------------------

    #[test]
    fn unknown_type_uses_fallback_color() {
        assert_eq!(type_color(BookingType::Other).background, "#e0e7ff");
        assert_ne!(
            type_color(BookingType::Casting),
            type_color(BookingType::Confirmed)
        );
    }

    #[test]
    fn legend_lists_markers_last() {
        let legend = legend();
        assert_eq!(legend.len(), 10);
        assert_eq!(legend[8].marker, Some("✕"));
        assert_eq!(legend[9].label, "Conflict");
    }

    // -- shortcuts -----------------------------------------------------

    #[test]
    fn shortcuts_decode_case_insensitively() {
        assert_eq!(CalendarShortcut::from_key("C", None), Some(CalendarShortcut::NewBooking));
        assert_eq!(CalendarShortcut::from_key("t", Some("DIV")), Some(CalendarShortcut::Today));
        assert_eq!(
            CalendarShortcut::from_key("Escape", Some("BODY")),
            Some(CalendarShortcut::CloseModals)
        );
        assert_eq!(
            CalendarShortcut::from_key("ArrowRight", None),
            Some(CalendarShortcut::NextDay)
        );
        assert_eq!(CalendarShortcut::from_key("x", None), None);
    }

    #[test]
    fn shortcuts_are_ignored_while_typing() {
        assert_eq!(CalendarShortcut::from_key("c", Some("INPUT")), None);
        assert_eq!(CalendarShortcut::from_key("ArrowLeft", Some("TEXTAREA")), None);
    }

    // -- navigation ----------------------------------------------------

    #[test]
    fn month_navigation_wraps_years_and_clamps_days() {
        assert_eq!(next_month(d(2025, 12, 5)), d(2026, 1, 5));
        assert_eq!(previous_month(d(2026, 1, 5)), d(2025, 12, 5));
        assert_eq!(next_month(d(2026, 1, 31)), d(2026, 2, 28));
    }

    #[test]
    fn day_navigation_crosses_month_boundaries() {
        assert_eq!(next_day(d(2026, 1, 31)), d(2026, 2, 1));
        assert_eq!(previous_day(d(2026, 3, 1)), d(2026, 2, 28));
    }

    #[test]
    fn year_and_month_selects_clamp_the_day() {
        assert_eq!(with_year(d(2028, 2, 29), 2027), d(2027, 2, 28));
        assert_eq!(with_month(d(2026, 3, 31), 4), d(2026, 4, 30));
        assert_eq!(with_day(d(2026, 1, 10), 22), d(2026, 1, 22));
    }

    #[test]
    fn schedule_stats_count_status_and_month() {
        let mut confirmed = booking_on(1, "2026-01-05");
        confirmed.status = BookingStatus::Confirmed;
        let pending = booking_on(2, "2026-02-05");
        let stats = ScheduleStats::compute(&[confirmed, pending], d(2026, 1, 20));
        assert_eq!(
            stats,
            ScheduleStats {
                total: 2,
                this_month: 1,
                confirmed: 1,
                pending: 1
            }
        );
    }
}
