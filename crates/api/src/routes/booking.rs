use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/providers/:custom_url/services/:service_id/fields",
            get(handlers::booking::get_fields),
        )
        .route(
            "/api/providers/:custom_url/services/:service_id/bookings",
            post(handlers::booking::create_booking),
        )
}
