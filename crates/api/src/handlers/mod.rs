pub mod blocks;
pub mod calendar;
pub mod lessons;
pub mod pricing;
pub mod students;

use chrono::{Local, NaiveDate, NaiveDateTime};
use lessonbook_core::{config::EngineConfig, engine::calendar_window, rejection::Rejection};
use tracing::warn;

use crate::middleware::error_handling::AppError;

/// Wall-clock time the booking rules are evaluated against
pub(crate) fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// First and last date of the calendar window starting at `today`
pub(crate) fn window_bounds(today: NaiveDate, engine: &EngineConfig) -> (NaiveDate, NaiveDate) {
    let window = calendar_window(today, engine.horizon_days);
    let first = window.first().copied().unwrap_or(today);
    let last = window.last().copied().unwrap_or(today);
    (first, last)
}

pub(crate) fn reject(rejection: Rejection) -> AppError {
    warn!("Request rejected ({}): {}", rejection.code(), rejection);
    AppError::from(rejection)
}
