use booking_types::Booking;
use chrono::NaiveDate;

/// "14:30" -> "2:30 PM", "09:00" -> "9 AM". Unparseable input is returned
/// unchanged.
pub fn to_12_hour(time_24: &str) -> String {
    let Some((hour, minute)) = time_24.trim().split_once(':') else {
        return time_24.to_string();
    };
    let Ok(hour) = hour.parse::<u32>() else {
        return time_24.to_string();
    };
    if hour > 23 {
        return time_24.to_string();
    }

    let (hour_12, period) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    if minute == "00" {
        format!("{} {}", hour_12, period)
    } else {
        format!("{}:{} {}", hour_12, minute, period)
    }
}

/// Time line for chips and the details modal.
pub fn time_range_label(booking: &Booking) -> String {
    if booking.all_day {
        return "All Day".to_string();
    }
    match (booking.call_time.as_deref(), booking.wrap_time.as_deref()) {
        (Some(call), Some(wrap)) => format!("{} - {}", to_12_hour(call), to_12_hour(wrap)),
        (Some(call), None) => to_12_hour(call),
        _ => "Time TBD".to_string(),
    }
}

/// The browser's (or server's) local calendar day.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// "Monday, January 12, 2026"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::booking_on;

    #[test]
    fn converts_to_12_hour() {
        assert_eq!(to_12_hour("00:00"), "12 AM");
        assert_eq!(to_12_hour("09:00"), "9 AM");
        assert_eq!(to_12_hour("12:15"), "12:15 PM");
        assert_eq!(to_12_hour("23:59"), "11:59 PM");
        assert_eq!(to_12_hour("later"), "later");
        assert_eq!(to_12_hour("25:00"), "25:00");
    }

    #[test]
    fn range_label_handles_all_day_and_missing_times() {
        let mut b = booking_on(1, "2026-01-12");
        assert_eq!(time_range_label(&b), "9 AM - 5 PM");
        b.wrap_time = None;
        assert_eq!(time_range_label(&b), "9 AM");
        b.call_time = None;
        assert_eq!(time_range_label(&b), "Time TBD");
        b.all_day = true;
        assert_eq!(time_range_label(&b), "All Day");
    }

    #[test]
    fn long_date_spells_out_weekday() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        assert_eq!(long_date(date), "Monday, January 12, 2026");
    }
}
