use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use lessonbook_core::{
    config::hour_to_time,
    engine::{
        booking::{check_booking_window, parse_hour},
        quote_price, validate_admin_booking, validate_booking,
    },
    errors::BookingError,
    models::{
        blocked_range::BlockedRange,
        lesson::{
            AdminCreateLessonRequest, CreateLessonRequest, CreateLessonResponse,
            DeleteLessonResponse, Lesson, LessonResponse,
        },
        student::Student,
    },
    rejection::Rejection,
};
use lessonbook_db::{
    is_unique_violation, lock_date,
    repositories::{blocked_range, lesson, student},
};

use super::{local_now, reject, window_bounds};
use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct ListLessonsParams {
    pub student_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct LessonOwnerParams {
    pub student_id: Uuid,
}

/// Upcoming lessons: one student's from today on, or everyone's in the window
pub async fn list_lessons(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<ListLessonsParams>,
) -> Result<Json<Vec<LessonResponse>>, AppError> {
    let today = local_now().date();

    let lessons = match params.student_id {
        Some(student_id) => {
            lesson::get_upcoming_lessons_by_student(&state.db_pool, student_id, today).await
        }
        None => {
            let (from, to) = window_bounds(today, &state.engine);
            lesson::get_lessons_in_range(&state.db_pool, from, to).await
        }
    }
    .map_err(BookingError::Database)?;

    Ok(Json(
        lessons
            .into_iter()
            .map(|db_lesson| LessonResponse::from(Lesson::from(db_lesson)))
            .collect(),
    ))
}

/// A student books a lesson for themselves
#[axum::debug_handler]
pub async fn create_lesson(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateLessonRequest>,
) -> Result<(StatusCode, Json<CreateLessonResponse>), AppError> {
    let now = local_now();

    // Rules that only need the clock are checked before touching storage
    let hour = parse_hour(&payload.time).map_err(reject)?;
    check_booking_window(payload.date, hour, now, &state.engine).map_err(reject)?;

    let student = find_student(&state, payload.student_id).await?;

    let response = book_lesson(&state, &student, payload.date, |lessons, blocks| {
        validate_booking(payload.date, &payload.time, now, lessons, blocks, &state.engine)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// The administrator books a lesson on behalf of a student
#[axum::debug_handler]
pub async fn admin_create_lesson(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<AdminCreateLessonRequest>,
) -> Result<(StatusCode, Json<CreateLessonResponse>), AppError> {
    let now = local_now();

    let hour = parse_hour(&payload.time).map_err(reject)?;
    let student_id = payload.student_id.ok_or(Rejection::MissingStudent).map_err(reject)?;
    check_booking_window(payload.date, hour, now, &state.engine).map_err(reject)?;

    let student = find_student(&state, student_id).await?;

    let response = book_lesson(&state, &student, payload.date, |lessons, blocks| {
        validate_admin_booking(
            payload.date,
            &payload.time,
            Some(student_id),
            now,
            lessons,
            blocks,
            &state.engine,
        )
    })
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// A student cancels one of their own lessons
pub async fn delete_own_lesson(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<LessonOwnerParams>,
) -> Result<Json<DeleteLessonResponse>, AppError> {
    let existing = lesson::get_lesson_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Lesson with ID {} not found", id)))?;

    if existing.student_id != params.student_id {
        warn!(
            "Student {} tried to delete lesson {} of student {}",
            params.student_id, id, existing.student_id
        );
        return Err(BookingError::Authorization("You can only delete your own lessons".into()).into());
    }

    let deleted = lesson::delete_lesson(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?;
    info!("Lesson {} deleted by its student", id);

    Ok(Json(DeleteLessonResponse { id, deleted }))
}

/// The administrator cancels any lesson
pub async fn admin_delete_lesson(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteLessonResponse>, AppError> {
    let deleted = lesson::delete_lesson(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?;

    if !deleted {
        return Err(BookingError::NotFound(format!("Lesson with ID {} not found", id)).into());
    }
    info!("Lesson {} deleted by the administrator", id);

    Ok(Json(DeleteLessonResponse { id, deleted }))
}

async fn find_student(state: &ApiState, id: Uuid) -> Result<Student, AppError> {
    let student = student::get_student_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Student with ID {} not found", id)))?;

    Ok(Student::from(student))
}

/// Validates and stores a lesson inside one transaction.
///
/// The date lock is taken before the day's lessons and blocks are read, so
/// `validate` sees every write committed for that date.
async fn book_lesson<F>(
    state: &ApiState,
    student: &Student,
    date: NaiveDate,
    validate: F,
) -> Result<CreateLessonResponse, AppError>
where
    F: FnOnce(&[Lesson], &[BlockedRange]) -> Result<u32, Rejection>,
{
    let mut tx = state.db_pool.begin().await.map_err(eyre::Report::from)?;
    lock_date(&mut tx, date).await?;

    let lessons: Vec<Lesson> = lesson::get_lessons_by_date(&mut *tx, date)
        .await?
        .into_iter()
        .map(Lesson::from)
        .collect();
    let blocks: Vec<BlockedRange> = blocked_range::get_blocked_ranges_by_date(&mut *tx, date)
        .await?
        .into_iter()
        .map(BlockedRange::from)
        .collect();

    let hour = validate(&lessons, &blocks).map_err(reject)?;
    let time = hour_to_time(hour).ok_or(Rejection::InvalidFormat).map_err(reject)?;

    // The count excludes the lesson being booked
    let quote = quote_price(hour, lessons.len(), &student.pricing, &state.engine);

    let created = match lesson::create_lesson(&mut *tx, student.id, date, time, quote.price).await {
        Ok(created) => created,
        Err(err) if is_unique_violation(&err) => {
            warn!("Lesson slot {} {} was taken concurrently", date, time);
            return Err(BookingError::Conflict(format!(
                "A lesson is already scheduled for {} at {}",
                date,
                time.format("%H:%M")
            ))
            .into());
        }
        Err(err) => return Err(BookingError::Database(err).into()),
    };

    tx.commit().await.map_err(eyre::Report::from)?;

    info!(
        "Lesson {} booked for student {} on {} at {} for {}",
        created.id,
        student.id,
        date,
        time.format("%H:%M"),
        quote.price
    );

    Ok(CreateLessonResponse {
        lesson: LessonResponse::from(Lesson::from(created)),
        markups: quote.markups,
    })
}
