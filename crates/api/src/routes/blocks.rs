use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/blocks", get(handlers::blocks::list_blocks))
        .route("/api/admin/blocks", post(handlers::blocks::create_block))
        .route("/api/admin/blocks/:id", delete(handlers::blocks::delete_block))
}
