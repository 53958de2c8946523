use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    config::{EngineConfig, hour_to_time},
    models::{blocked_range::BlockedRange, lesson::Lesson},
    rejection::Rejection,
};

/// Validates a new administrator block `[start_hour, end_hour)` on `date`.
///
/// Checks, in order: hours are hours of the day, start precedes end, no
/// overlap with another block that day, the date is not in the past, the
/// date is within the horizon, and no lesson that day starts inside the
/// range. Returns the range bounds as times of day.
pub fn validate_block(
    date: NaiveDate,
    start_hour: u32,
    end_hour: u32,
    now: NaiveDateTime,
    existing_blocks: &[BlockedRange],
    existing_lessons: &[Lesson],
    config: &EngineConfig,
) -> Result<(NaiveTime, NaiveTime), Rejection> {
    let (Some(start), Some(end)) = (hour_to_time(start_hour), hour_to_time(end_hour)) else {
        return Err(Rejection::InvalidFormat);
    };

    if start >= end {
        return Err(Rejection::BlockOrderInvalid { start, end });
    }

    for block in existing_blocks.iter().filter(|block| block.date == date) {
        if overlaps(block, start, end) {
            return Err(Rejection::BlockOverlap);
        }
    }

    let today = now.date();
    if date < today {
        return Err(Rejection::BlockInPast);
    }

    let last_day = today.checked_add_signed(config.horizon());
    if last_day.is_some_and(|last_day| date > last_day) {
        return Err(Rejection::BlockTooFarAhead);
    }

    for lesson in existing_lessons.iter().filter(|lesson| lesson.date == date) {
        if start <= lesson.time && lesson.time < end {
            return Err(Rejection::BlockOverlapsLesson {
                lesson: lesson.time,
            });
        }
    }

    Ok((start, end))
}

/// All three overlap conditions are evaluated: the new start inside the
/// existing range, the new end strictly inside it, and plain interval
/// intersection.
fn overlaps(existing: &BlockedRange, start: NaiveTime, end: NaiveTime) -> bool {
    let start_inside = existing.start_time <= start && start < existing.end_time;
    let end_inside = existing.start_time < end && end < existing.end_time;
    let intersects = start < existing.end_time && end > existing.start_time;
    start_inside || end_inside || intersects
}
