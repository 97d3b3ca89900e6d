//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    expense::{clear_expenses_endpoint, get_expenses_endpoint},
    manual::create_manual_expense,
    not_found::get_404_not_found,
    summary::get_summary_endpoint,
    upload::import_expenses,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page))
        .route(endpoints::UPLOAD, post(import_expenses))
        .route(endpoints::MANUAL, post(create_manual_expense))
        .route(endpoints::EXPENSES_API, get(get_expenses_endpoint))
        .route(endpoints::SUMMARY_API, get(get_summary_endpoint))
        .route(endpoints::CLEAR_API, post(clear_expenses_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
