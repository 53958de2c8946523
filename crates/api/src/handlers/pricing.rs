use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use lessonbook_core::{
    engine::{
        booking::parse_hour,
        pricing::{PriceQuote, Tariff},
        quote_price,
    },
    errors::BookingError,
    models::student::StudentPricing,
};
use lessonbook_db::repositories::{lesson, student};

use super::reject;
use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct QuoteParams {
    pub date: NaiveDate,
    pub time: String,
    pub student_id: Option<Uuid>,
}

pub async fn get_tariff(State(state): State<Arc<ApiState>>) -> Json<Tariff> {
    Json(Tariff::from_config(&state.engine))
}

/// What a lesson at `time` on `date` would cost right now, and why.
///
/// Only the hour format is checked; whether the slot is bookable is left to
/// the booking endpoints.
pub async fn get_quote(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<PriceQuote>, AppError> {
    let hour = parse_hour(&params.time).map_err(reject)?;

    let pricing = match params.student_id {
        Some(id) => student::get_student_by_id(&state.db_pool, id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| BookingError::NotFound(format!("Student with ID {} not found", id)))?
            .pricing(),
        None => StudentPricing::default(),
    };

    let booked = lesson::get_lessons_by_date(&state.db_pool, params.date)
        .await
        .map_err(BookingError::Database)?
        .len();

    Ok(Json(quote_price(hour, booked, &pricing, &state.engine)))
}
