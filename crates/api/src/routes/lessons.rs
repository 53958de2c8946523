use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/lessons", get(handlers::lessons::list_lessons))
        .route("/api/lessons", post(handlers::lessons::create_lesson))
        .route("/api/lessons/:id", delete(handlers::lessons::delete_own_lesson))
        .route("/api/admin/lessons", post(handlers::lessons::admin_create_lesson))
        .route(
            "/api/admin/lessons/:id",
            delete(handlers::lessons::admin_delete_lesson),
        )
}
