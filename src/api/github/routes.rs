// GitHub statistics route definitions

use axum::{routing::get, Router};

use crate::config::state::AppState;
use super::handler;

pub fn github_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/github/stats",
            get(handler::get_stats_handler).post(handler::post_stats_handler),
        )
}
