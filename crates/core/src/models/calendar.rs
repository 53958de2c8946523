use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{blocked_range::BlockedRange, lesson::Lesson};

/// A date offered for booking, with the label shown in date selectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub label: String,
}

/// One entry of a day's timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarEvent {
    Lesson(Lesson),
    Block(BlockedRange),
}

impl CalendarEvent {
    pub fn date(&self) -> NaiveDate {
        match self {
            CalendarEvent::Lesson(lesson) => lesson.date,
            CalendarEvent::Block(block) => block.date,
        }
    }

    /// Start of the event: the lesson time or the block start
    pub fn time(&self) -> NaiveTime {
        match self {
            CalendarEvent::Lesson(lesson) => lesson.time,
            CalendarEvent::Block(block) => block.start_time,
        }
    }

    pub fn sort_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date(), self.time())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTimeline {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub days: Vec<DayTimeline>,
}
