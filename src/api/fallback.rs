// Catch-all for unknown routes

use axum::{http::{StatusCode, Uri}};
use serde_json::json;
use tracing::info;

use crate::utils::response_handler::HandlerResponse;

pub async fn fallback_handler(uri: Uri) -> HandlerResponse {
    info!("No route for {}", uri);

    HandlerResponse::new(StatusCode::NOT_FOUND)
        .data(json!({ "path": uri.path() }))
        .message("Resource not found")
}
