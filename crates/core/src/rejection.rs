//! Structured rejection reasons produced by the engine validators.
//!
//! A rejection is a terminal, user-visible outcome of a single request. The
//! presentation layer picks the message from [`Display`](std::fmt::Display)
//! and the machine-readable reason from [`Rejection::code`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which side of the business day an hour fell outside of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursBound {
    TooEarly,
    TooLate,
}

impl fmt::Display for HoursBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoursBound::TooEarly => f.write_str("too early"),
            HoursBound::TooLate => f.write_str("too late"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Rejection {
    #[error("Time must be in 'hours' or 'hours:minutes' format")]
    InvalidFormat,

    #[error("The date {date} has already arrived")]
    DateInPast { date: NaiveDate },

    #[error("Please don't book a lesson earlier than {horizon_days} days in advance")]
    DateTooFarAhead { horizon_days: i64 },

    #[error("Please, sign up for a lesson {lead_hours} hours before it starts")]
    LeadTimeViolation { lead_hours: i64 },

    #[error("The time {:02}:00 is {bound}", .hour)]
    OutsideBusinessHours { hour: u32, bound: HoursBound },

    #[error("Some lesson is already scheduled for {} that day", .existing.format("%H:%M"))]
    SlotTaken { existing: NaiveTime },

    #[error("This time is blocked")]
    SlotBlocked,

    #[error("Please, select a student")]
    MissingStudent,

    #[error("{}", order_message(.start, .end))]
    BlockOrderInvalid { start: NaiveTime, end: NaiveTime },

    #[error("The new block overlaps the existing one")]
    BlockOverlap,

    #[error("Date can't be earlier than today")]
    BlockInPast,

    #[error("You are creating the block too early")]
    BlockTooFarAhead,

    #[error("Your block overlaps an existing lesson at {}", .lesson.format("%H:%M"))]
    BlockOverlapsLesson { lesson: NaiveTime },
}

fn order_message(start: &NaiveTime, end: &NaiveTime) -> &'static str {
    if start == end {
        "'Start time' and 'End time' can't be equal"
    } else {
        "'Start time' must be earlier than 'End time'"
    }
}

impl Rejection {
    /// Stable snake_case reason code, identical to the serialized `code` tag
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::InvalidFormat => "invalid_format",
            Rejection::DateInPast { .. } => "date_in_past",
            Rejection::DateTooFarAhead { .. } => "date_too_far_ahead",
            Rejection::LeadTimeViolation { .. } => "lead_time_violation",
            Rejection::OutsideBusinessHours { .. } => "outside_business_hours",
            Rejection::SlotTaken { .. } => "slot_taken",
            Rejection::SlotBlocked => "slot_blocked",
            Rejection::MissingStudent => "missing_student",
            Rejection::BlockOrderInvalid { .. } => "block_order_invalid",
            Rejection::BlockOverlap => "block_overlap",
            Rejection::BlockInPast => "block_in_past",
            Rejection::BlockTooFarAhead => "block_too_far_ahead",
            Rejection::BlockOverlapsLesson { .. } => "block_overlaps_lesson",
        }
    }
}
