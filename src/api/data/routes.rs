// Tabular data route definitions

use axum::{routing::post, Router};

use crate::config::state::AppState;
use super::handler;

pub fn data_routes() -> Router<AppState> {
    Router::new()
        .route("/api/data/summary", post(handler::summary_handler))
        .route("/api/data/filter", post(handler::filter_handler))
        .route("/api/data/export", post(handler::export_handler))
        .route("/api/data/chart", post(handler::chart_handler))
}
