//! Lesson pricing.
//!
//! A lesson costs the common price unless a markup rule applies, in which
//! case it costs the high price. Students may carry their own usual/high
//! prices that replace the global ones.

use serde::{Deserialize, Serialize};

use crate::{config::EngineConfig, models::student::StudentPricing};

/// Reason a lesson was priced high
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Markup {
    /// `morning_start <= hour < morning_markup_end`
    EarlyMorning,
    /// `evening_markup_start < hour <= evening_end`
    LateEvening,
    /// The day already holds `lesson_threshold - 1` lessons or more
    BusyDay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub price: i32,
    pub markups: Vec<Markup>,
}

impl PriceQuote {
    pub fn is_marked_up(&self) -> bool {
        !self.markups.is_empty()
    }
}

/// Override if one is set, the global default otherwise.
///
/// Non-positive overrides count as unset.
pub fn resolve_cost(override_cost: Option<i32>, default_cost: i32) -> i32 {
    override_cost
        .filter(|cost| *cost > 0)
        .unwrap_or(default_cost)
}

/// Markup rules that fire for a lesson at `hour` on a day that already
/// holds `daily_lesson_count` lessons
pub fn markups(hour: u32, daily_lesson_count: usize, config: &EngineConfig) -> Vec<Markup> {
    let mut markups = Vec::new();

    if config.morning_start <= hour && hour < config.morning_markup_end {
        markups.push(Markup::EarlyMorning);
    }
    if config.evening_markup_start < hour && hour <= config.evening_end {
        markups.push(Markup::LateEvening);
    }
    // The count excludes the lesson being priced, so the threshold-th
    // lesson of the day is the first one marked up.
    if daily_lesson_count >= config.lesson_threshold.saturating_sub(1) {
        markups.push(Markup::BusyDay);
    }

    markups
}

pub fn quote_price(
    hour: u32,
    daily_lesson_count: usize,
    pricing: &StudentPricing,
    config: &EngineConfig,
) -> PriceQuote {
    let markups = markups(hour, daily_lesson_count, config);
    let price = if markups.is_empty() {
        resolve_cost(pricing.usual_cost, config.common_price)
    } else {
        resolve_cost(pricing.high_cost, config.high_price)
    };

    PriceQuote { price, markups }
}

pub fn compute_price(
    hour: u32,
    daily_lesson_count: usize,
    pricing: &StudentPricing,
    config: &EngineConfig,
) -> i32 {
    quote_price(hour, daily_lesson_count, pricing, config).price
}

/// Public price list derived from the engine constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tariff {
    pub common_price: i32,
    pub high_price: i32,
    /// Lessons starting before this hour cost the high price
    pub morning_markup_end: u32,
    /// Lessons starting after this hour cost the high price
    pub evening_markup_start: u32,
    /// After this many lessons in a day, further lessons cost the high price
    pub busy_day_after: usize,
}

impl Tariff {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            common_price: config.common_price,
            high_price: config.high_price,
            morning_markup_end: config.morning_markup_end,
            evening_markup_start: config.evening_markup_start,
            busy_day_after: config.lesson_threshold.saturating_sub(1),
        }
    }

    /// The tariff as a particular student sees it
    pub fn for_student(&self, pricing: &StudentPricing) -> Self {
        Self {
            common_price: resolve_cost(pricing.usual_cost, self.common_price),
            high_price: resolve_cost(pricing.high_cost, self.high_price),
            ..self.clone()
        }
    }
}
