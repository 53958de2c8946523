//! Slot validation for new lessons.
//!
//! Rules run in a fixed order and the first failure wins:
//!
//! 1. the hour parses (`H`, `HH` or `HH:MM`, minutes are discarded)
//! 2. the slot has not started yet
//! 3. the date is within the booking horizon
//! 4. the slot starts at least the minimum lead time from now
//! 5. the hour is within business hours
//! 6. no lesson already occupies the hour
//! 7. no blocked range covers the hour
//!
//! Steps 2-5 only need the clock, steps 6-7 need the day's lessons and
//! blocks. They are exposed separately so a caller can reject cheap cases
//! before reading storage.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::{
    config::{EngineConfig, hour_to_time},
    models::{blocked_range::BlockedRange, lesson::Lesson},
    rejection::{HoursBound, Rejection},
};

/// Parses a submitted hour into `0..=23`.
///
/// Accepts `"9"`, `"09"` and `"09:30"`; the minute part must be a valid
/// minute but is dropped, since lessons always start on the hour.
pub fn parse_hour(raw: &str) -> Result<u32, Rejection> {
    let mut parts = raw.trim().splitn(2, ':');
    let hour_part = parts.next().unwrap_or_default();

    if !is_short_number(hour_part) {
        return Err(Rejection::InvalidFormat);
    }

    if let Some(minute_part) = parts.next() {
        let minute_ok = minute_part.len() == 2
            && is_short_number(minute_part)
            && minute_part.parse::<u32>().is_ok_and(|minute| minute < 60);
        if !minute_ok {
            return Err(Rejection::InvalidFormat);
        }
    }

    match hour_part.parse::<u32>() {
        Ok(hour) if hour <= 23 => Ok(hour),
        _ => Err(Rejection::InvalidFormat),
    }
}

fn is_short_number(part: &str) -> bool {
    (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
}

/// Clock-dependent rules (past, horizon, lead time, business hours).
///
/// Returns the slot start on success.
pub fn check_booking_window(
    date: NaiveDate,
    hour: u32,
    now: NaiveDateTime,
    config: &EngineConfig,
) -> Result<NaiveDateTime, Rejection> {
    let time = hour_to_time(hour).ok_or(Rejection::InvalidFormat)?;
    let start = date.and_time(time);

    if start < now {
        return Err(Rejection::DateInPast { date });
    }

    let last_day = now.date().checked_add_signed(config.horizon());
    if last_day.is_some_and(|last_day| date > last_day) {
        return Err(Rejection::DateTooFarAhead {
            horizon_days: config.horizon_days,
        });
    }

    if start < now + config.min_lead_time() {
        return Err(Rejection::LeadTimeViolation {
            lead_hours: config.min_lead_hours,
        });
    }

    if hour < config.morning_start {
        return Err(Rejection::OutsideBusinessHours {
            hour,
            bound: HoursBound::TooEarly,
        });
    }
    if hour > config.evening_end {
        return Err(Rejection::OutsideBusinessHours {
            hour,
            bound: HoursBound::TooLate,
        });
    }

    Ok(start)
}

/// Storage-dependent rules: double booking, then blocked ranges.
///
/// Lessons and blocks dated other than `date` are ignored.
pub fn check_slot_conflicts(
    date: NaiveDate,
    hour: u32,
    lessons: &[Lesson],
    blocks: &[BlockedRange],
    config: &EngineConfig,
) -> Result<(), Rejection> {
    let time = hour_to_time(hour).ok_or(Rejection::InvalidFormat)?;

    // Every lesson occupies [t, t + 1h).
    for lesson in lessons.iter().filter(|lesson| lesson.date == date) {
        if lesson.time <= time && time.signed_duration_since(lesson.time) < Duration::hours(1) {
            return Err(Rejection::SlotTaken {
                existing: lesson.time,
            });
        }
    }

    // A block ending at closing time also closes the last bookable hour.
    let closing = config.closing_time();
    for block in blocks.iter().filter(|block| block.date == date) {
        if block.covers(time) || (time == block.end_time && block.end_time == closing) {
            return Err(Rejection::SlotBlocked);
        }
    }

    Ok(())
}

/// Validates a booking a student makes for themselves.
///
/// On success returns the normalized hour to persist.
pub fn validate_booking(
    date: NaiveDate,
    raw_hour: &str,
    now: NaiveDateTime,
    lessons: &[Lesson],
    blocks: &[BlockedRange],
    config: &EngineConfig,
) -> Result<u32, Rejection> {
    let hour = parse_hour(raw_hour)?;
    check_booking_window(date, hour, now, config)?;
    check_slot_conflicts(date, hour, lessons, blocks, config)?;
    Ok(hour)
}

/// Validates a booking the administrator makes for a student.
///
/// Same rules as [`validate_booking`], plus a student must be selected;
/// that is checked right after the hour parses.
pub fn validate_admin_booking(
    date: NaiveDate,
    raw_hour: &str,
    student: Option<Uuid>,
    now: NaiveDateTime,
    lessons: &[Lesson],
    blocks: &[BlockedRange],
    config: &EngineConfig,
) -> Result<u32, Rejection> {
    let hour = parse_hour(raw_hour)?;
    if student.is_none() {
        return Err(Rejection::MissingStudent);
    }
    check_booking_window(date, hour, now, config)?;
    check_slot_conflicts(date, hour, lessons, blocks, config)?;
    Ok(hour)
}
