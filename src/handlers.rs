use crate::dashboard::{AutoUpdate, TimeDashboard};
use crate::errors::AppError;
use crate::models::{AutoUpdateResponse, DashboardResponse, DashboardSnapshot, ProductCountResponse};
use crate::product_service::ProductService;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Json,
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.dashboard.snapshot();
    Html(render_index(
        &snapshot,
        state.dashboard.auto_update(),
        state.product_count.total(),
    ))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let snapshot = state.dashboard.snapshot();
    Json(to_response(&snapshot, state.dashboard.auto_update()))
}

pub async fn toggle(State(state): State<AppState>) -> Json<AutoUpdateResponse> {
    Json(apply_toggle(&state.dashboard))
}

pub async fn toggle_form(State(state): State<AppState>) -> Redirect {
    apply_toggle(&state.dashboard);
    Redirect::to("/")
}

pub async fn refresh(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let snapshot = state.dashboard.refresh_data().await?;
    Ok(Json(to_response(&snapshot, state.dashboard.auto_update())))
}

pub async fn get_product_count(State(state): State<AppState>) -> Json<ProductCountResponse> {
    Json(ProductCountResponse {
        total_products: state.product_count.total(),
        loaded: state.product_count.is_loaded(),
    })
}

fn apply_toggle(dashboard: &TimeDashboard<ProductService>) -> AutoUpdateResponse {
    let auto_update = dashboard.toggle_automatic_update();
    info!(?auto_update, "automatic update switched");
    AutoUpdateResponse {
        auto_update,
        timer_running: dashboard.is_timer_running(),
    }
}

fn to_response(snapshot: &DashboardSnapshot, auto_update: AutoUpdate) -> DashboardResponse {
    DashboardResponse {
        current_time: snapshot.current_time.clone(),
        total_products: snapshot.total_products(),
        category_counts: snapshot.category_counts.clone(),
        apple_products: snapshot.apple_products.clone(),
        refreshed_at: snapshot.refreshed_at.clone(),
        revision: snapshot.revision,
        auto_update,
    }
}
