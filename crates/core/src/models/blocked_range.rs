use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Administrator-defined range `[start_time, end_time)` on a date in which
/// nothing can be booked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedRange {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl BlockedRange {
    /// Chronological ordering key; a block sorts by its start
    pub fn sort_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.start_time)
    }

    /// Whether `time` lies inside the half-open range
    pub fn covers(&self, time: NaiveTime) -> bool {
        self.start_time <= time && time < self.end_time
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlockRequest {
    pub date: NaiveDate,
    pub start_hour: u32,
    pub end_hour: u32,
}
