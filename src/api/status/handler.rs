// Health and configuration summary

use serde_json::json;
use axum::{http::StatusCode, extract::State};
use tracing::{instrument, info};

use crate::config::state::AppState;
use crate::utils::response_handler::HandlerResponse;

/// Returns API status and health information
#[instrument(skip(state))]
pub async fn status_handler(State(state): State<AppState>) -> HandlerResponse {
    info!("Status endpoint called");

    HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "version": env!("CARGO_PKG_VERSION"),
            "status": "healthy",
            "environment": state.environment.environment.as_ref(),
            "github_org": state.environment.github_org.as_ref(),
            "server_token_configured": state.environment.github_api_token.is_some(),
        }))
        .message("API is running successfully")
}
