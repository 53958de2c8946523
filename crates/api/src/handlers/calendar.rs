use axum::{Json, extract::State};
use std::sync::Arc;

use lessonbook_core::{
    engine::{availability::into_timelines, calendar_days, calendar_window, merge_availability},
    errors::BookingError,
    models::{
        blocked_range::BlockedRange,
        calendar::{AvailabilityResponse, CalendarDay},
        lesson::Lesson,
    },
};
use lessonbook_db::repositories::{blocked_range, lesson};

use super::{local_now, window_bounds};
use crate::{ApiState, middleware::error_handling::AppError};

/// Bookable dates with their selector labels
pub async fn get_calendar(State(state): State<Arc<ApiState>>) -> Json<Vec<CalendarDay>> {
    let today = local_now().date();
    Json(calendar_days(today, state.engine.horizon_days))
}

/// Lessons and blocks of every window date, merged into one timeline per day
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let today = local_now().date();
    let window = calendar_window(today, state.engine.horizon_days);
    let (from, to) = window_bounds(today, &state.engine);

    // Both queries return rows ordered by date and start time
    let lessons = lesson::get_lessons_in_range(&state.db_pool, from, to)
        .await
        .map_err(BookingError::Database)?;
    let blocks = blocked_range::get_blocked_ranges_in_range(&state.db_pool, from, to)
        .await
        .map_err(BookingError::Database)?;

    let days = merge_availability(
        lessons.into_iter().map(Lesson::from),
        blocks.into_iter().map(BlockedRange::from),
        &window,
    );

    Ok(Json(AvailabilityResponse {
        days: into_timelines(days),
    }))
}
