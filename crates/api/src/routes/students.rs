use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/admin/students", post(handlers::students::create_student))
        .route("/api/admin/students", get(handlers::students::list_students))
        .route("/api/admin/students/:id", get(handlers::students::get_student))
        .route(
            "/api/admin/students/:id/pricing",
            put(handlers::students::update_pricing),
        )
}
