use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/pricing", get(handlers::pricing::get_tariff))
        .route("/api/pricing/quote", get(handlers::pricing::get_quote))
}
