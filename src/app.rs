use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/auto-update/toggle", post(handlers::toggle_form))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/auto-update/toggle", post(handlers::toggle))
        .route("/api/refresh", post(handlers::refresh))
        .route("/api/products/count", get(handlers::get_product_count))
        .with_state(state)
}
