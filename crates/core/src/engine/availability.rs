use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::merge::merge_by_key;
use crate::models::{
    blocked_range::BlockedRange,
    calendar::{CalendarEvent, DayTimeline},
    lesson::Lesson,
};

/// Builds the per-day chronological timeline for `window`.
///
/// `lessons` must be sorted by `(date, time)` and `blocks` by
/// `(date, start_time)`, which is the order the repositories return them in.
/// A lesson and a block starting at the same moment are emitted block first.
/// Every window date is present in the result, with an empty timeline when
/// nothing happens that day; events dated outside the window are dropped.
pub fn merge_availability(
    lessons: impl IntoIterator<Item = Lesson>,
    blocks: impl IntoIterator<Item = BlockedRange>,
    window: &[NaiveDate],
) -> BTreeMap<NaiveDate, Vec<CalendarEvent>> {
    let mut days: BTreeMap<NaiveDate, Vec<CalendarEvent>> =
        window.iter().map(|date| (*date, Vec::new())).collect();

    let events = merge_by_key(
        blocks.into_iter().map(CalendarEvent::Block),
        lessons.into_iter().map(CalendarEvent::Lesson),
        CalendarEvent::sort_key,
    );

    for event in events {
        if let Some(day) = days.get_mut(&event.date()) {
            day.push(event);
        }
    }

    days
}

/// Flattens a merged map into the ordered list the API returns
pub fn into_timelines(days: BTreeMap<NaiveDate, Vec<CalendarEvent>>) -> Vec<DayTimeline> {
    days.into_iter()
        .map(|(date, events)| DayTimeline { date, events })
        .collect()
}
