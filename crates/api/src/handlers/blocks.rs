use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use lessonbook_core::{
    engine::validate_block,
    errors::BookingError,
    models::{
        blocked_range::{BlockedRange, CreateBlockRequest},
        lesson::Lesson,
    },
};
use lessonbook_db::{
    lock_date,
    repositories::{blocked_range, lesson},
};

use super::{local_now, reject, window_bounds};
use crate::{ApiState, middleware::error_handling::AppError};

pub async fn list_blocks(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<BlockedRange>>, AppError> {
    let (from, to) = window_bounds(local_now().date(), &state.engine);

    let blocks = blocked_range::get_blocked_ranges_in_range(&state.db_pool, from, to)
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(blocks.into_iter().map(BlockedRange::from).collect()))
}

/// Creates a blocked range after checking it against the day's blocks and
/// lessons, under the same date lock bookings take
#[axum::debug_handler]
pub async fn create_block(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBlockRequest>,
) -> Result<(StatusCode, Json<BlockedRange>), AppError> {
    let now = local_now();
    let date = payload.date;

    let mut tx = state.db_pool.begin().await.map_err(eyre::Report::from)?;
    lock_date(&mut tx, date).await?;

    let blocks: Vec<BlockedRange> = blocked_range::get_blocked_ranges_by_date(&mut *tx, date)
        .await?
        .into_iter()
        .map(BlockedRange::from)
        .collect();
    let lessons: Vec<Lesson> = lesson::get_lessons_by_date(&mut *tx, date)
        .await?
        .into_iter()
        .map(Lesson::from)
        .collect();

    let (start, end) = validate_block(
        date,
        payload.start_hour,
        payload.end_hour,
        now,
        &blocks,
        &lessons,
        &state.engine,
    )
    .map_err(reject)?;

    let created = blocked_range::create_blocked_range(&mut *tx, date, start, end).await?;
    tx.commit().await.map_err(eyre::Report::from)?;

    info!(
        "Blocked {} from {} to {}",
        date,
        start.format("%H:%M"),
        end.format("%H:%M")
    );

    Ok((StatusCode::CREATED, Json(BlockedRange::from(created))))
}

pub async fn delete_block(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = blocked_range::delete_blocked_range(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?;

    if !deleted {
        return Err(BookingError::NotFound(format!("Blocked range with ID {} not found", id)).into());
    }
    info!("Blocked range {} deleted", id);

    Ok(StatusCode::NO_CONTENT)
}
