//! Business-hour, pricing and horizon constants consumed by the engine.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Constants every validator and pricing call receives explicitly.
///
/// Hours are whole hours of the day (0-23). The defaults are the values the
/// school runs with: business hours 08:00-23:00, early bookings before 10:00
/// and late bookings after 22:00 are marked up, bookings open a week ahead
/// and close three hours before the lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// First bookable hour of the day
    pub morning_start: u32,
    /// Hours before this one are marked up
    pub morning_markup_end: u32,
    /// Hours strictly after this one are marked up
    pub evening_markup_start: u32,
    /// Last bookable hour of the day
    pub evening_end: u32,
    pub common_price: i32,
    pub high_price: i32,
    /// Minimum gap between booking submission and lesson start, in hours
    pub min_lead_hours: i64,
    /// How many days after today may still be booked or blocked
    pub horizon_days: i64,
    /// Lesson count at which same-day bookings become marked up
    pub lesson_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            morning_start: 8,
            morning_markup_end: 10,
            evening_markup_start: 22,
            evening_end: 23,
            common_price: 1000,
            high_price: 1300,
            min_lead_hours: 3,
            horizon_days: 7,
            lesson_threshold: 5,
        }
    }
}

impl EngineConfig {
    pub fn min_lead_time(&self) -> Duration {
        Duration::hours(self.min_lead_hours)
    }

    pub fn horizon(&self) -> Duration {
        Duration::days(self.horizon_days)
    }

    /// Time of day at which bookings close; a block ending here also blocks it
    pub fn closing_time(&self) -> NaiveTime {
        hour_to_time(self.evening_end).unwrap_or(NaiveTime::MIN)
    }

    /// Checks that the constants describe a consistent business day.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.evening_end > 23 {
            return Err(ConfigError::NotAnHour {
                hour: self.evening_end,
            });
        }
        if self.morning_start > self.evening_end {
            return Err(ConfigError::MorningAfterEvening {
                morning_start: self.morning_start,
                evening_end: self.evening_end,
            });
        }
        if self.morning_markup_end < self.morning_start {
            return Err(ConfigError::MorningMarkupBeforeStart {
                morning_markup_end: self.morning_markup_end,
                morning_start: self.morning_start,
            });
        }
        if self.evening_markup_start > self.evening_end {
            return Err(ConfigError::EveningMarkupAfterEnd {
                evening_markup_start: self.evening_markup_start,
                evening_end: self.evening_end,
            });
        }
        if self.common_price <= 0 || self.high_price <= 0 {
            return Err(ConfigError::NonPositivePrice);
        }
        if self.min_lead_hours < 0 || self.horizon_days < 0 {
            return Err(ConfigError::NegativeDuration);
        }
        if self.horizon_days > MAX_HORIZON_DAYS {
            return Err(ConfigError::HorizonTooLong {
                horizon_days: self.horizon_days,
            });
        }
        // No slot in the window could ever satisfy a longer lead time
        let window_hours = 24 * (self.horizon_days + 1);
        if self.min_lead_hours > window_hours {
            return Err(ConfigError::LeadTimeTooLong {
                min_lead_hours: self.min_lead_hours,
                window_hours,
            });
        }
        if self.lesson_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(())
    }
}

/// Longest booking horizon accepted, in days
pub const MAX_HORIZON_DAYS: i64 = 366;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("evening end hour {hour} is not an hour of the day")]
    NotAnHour { hour: u32 },

    #[error("morning start {morning_start} is after evening end {evening_end}")]
    MorningAfterEvening { morning_start: u32, evening_end: u32 },

    #[error("morning markup end {morning_markup_end} is before morning start {morning_start}")]
    MorningMarkupBeforeStart {
        morning_markup_end: u32,
        morning_start: u32,
    },

    #[error("evening markup start {evening_markup_start} is after evening end {evening_end}")]
    EveningMarkupAfterEnd {
        evening_markup_start: u32,
        evening_end: u32,
    },

    #[error("prices must be positive")]
    NonPositivePrice,

    #[error("lead time and horizon can't be negative")]
    NegativeDuration,

    #[error("booking horizon of {horizon_days} days exceeds {MAX_HORIZON_DAYS} days")]
    HorizonTooLong { horizon_days: i64 },

    #[error("lead time of {min_lead_hours} hours is longer than the {window_hours}-hour booking window")]
    LeadTimeTooLong {
        min_lead_hours: i64,
        window_hours: i64,
    },

    #[error("lesson threshold must be at least 1")]
    ZeroThreshold,
}

/// Whole hour as a time of day, `None` above 23
pub fn hour_to_time(hour: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour, 0, 0)
}
