use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use lessonbook_core::{
    errors::{BookingError, BookingResult},
    models::student::{CreateStudentRequest, Student, StudentPricing, UpdatePricingRequest},
};
use lessonbook_db::repositories::student;

use crate::{ApiState, middleware::error_handling::AppError};

/// Rejects overrides that can't be a price. Absent overrides are fine.
pub fn check_pricing(pricing: &StudentPricing) -> BookingResult<()> {
    for (field, cost) in [("usual_cost", pricing.usual_cost), ("high_cost", pricing.high_cost)] {
        if cost.is_some_and(|cost| cost <= 0) {
            return Err(BookingError::Validation(format!("{} must be positive", field)));
        }
    }
    Ok(())
}

pub async fn create_student(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(BookingError::Validation("Student name can't be empty".into()).into());
    }

    let pricing = StudentPricing {
        usual_cost: payload.usual_cost,
        high_cost: payload.high_cost,
    };
    check_pricing(&pricing)?;

    let alias = payload
        .alias
        .as_deref()
        .map(str::trim)
        .filter(|alias| !alias.is_empty());

    let created = student::create_student(&state.db_pool, name, alias, pricing)
        .await
        .map_err(BookingError::Database)?;
    info!("Student {} created", created.id);

    Ok((StatusCode::CREATED, Json(Student::from(created))))
}

pub async fn list_students(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = student::list_students(&state.db_pool)
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(students.into_iter().map(Student::from).collect()))
}

pub async fn get_student(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let student = student::get_student_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Student with ID {} not found", id)))?;

    Ok(Json(Student::from(student)))
}

/// Replaces both price overrides; `null` restores the global price
pub async fn update_pricing(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePricingRequest>,
) -> Result<Json<Student>, AppError> {
    let pricing = StudentPricing::from(payload);
    check_pricing(&pricing)?;

    let updated = student::update_student_pricing(&state.db_pool, id, pricing)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Student with ID {} not found", id)))?;
    info!("Pricing of student {} updated", id);

    Ok(Json(Student::from(updated)))
}
