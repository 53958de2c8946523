use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::models::calendar::CalendarDay;

/// Dates from `today` through `today + horizon_days` inclusive, ascending.
///
/// A negative horizon yields just `today`.
pub fn calendar_window(today: NaiveDate, horizon_days: i64) -> Vec<NaiveDate> {
    let horizon = u64::try_from(horizon_days).unwrap_or(0);
    (0..=horizon)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}

/// The calendar window with display labels: `Today, dd-mm` for the first
/// entry and `<Weekday>, dd-mm` for the rest
pub fn calendar_days(today: NaiveDate, horizon_days: i64) -> Vec<CalendarDay> {
    calendar_window(today, horizon_days)
        .into_iter()
        .map(|date| {
            let prefix = if date == today {
                "Today"
            } else {
                weekday_name(date.weekday())
            };
            CalendarDay {
                date,
                label: format!("{}, {}", prefix, date.format("%d-%m")),
            }
        })
        .collect()
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
