use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/providers/:custom_url/services/:service_id/slots",
            get(handlers::availability::get_slots),
        )
        .route(
            "/api/providers/:custom_url/services/:service_id/calendar",
            get(handlers::availability::get_calendar),
        )
}
