// GitHub organization statistics handlers

use serde::Deserialize;
use serde_json::json;
use axum::{http::StatusCode, extract::{Query, State}, Json};
use tracing::{instrument, info, error};

use crate::config::state::AppState;
use crate::error::AppError;
use crate::utils::response_handler::HandlerResponse;

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub org: Option<String>,
}

#[derive(Default, Deserialize)]
pub struct StatsRequest {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
}

// Keeps the token out of span fields
impl std::fmt::Debug for StatsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsRequest")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("org", &self.org)
            .finish()
    }
}

/// Statistics using the server-side token
#[instrument(name = "org_stats", skip(state))]
pub async fn get_stats_handler(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> HandlerResponse {
    fetch_stats(&state, None, query.org.as_deref()).await
}

/// Statistics using a token supplied by the page (falls back to the server token)
#[instrument(name = "org_stats", skip(state, request), fields(org = ?request.org))]
pub async fn post_stats_handler(
    State(state): State<AppState>,
    Json(request): Json<StatsRequest>,
) -> HandlerResponse {
    fetch_stats(&state, request.token.as_deref(), request.org.as_deref()).await
}

async fn fetch_stats(state: &AppState, token: Option<&str>, org: Option<&str>) -> HandlerResponse {
    let org: &str = org
        .map(str::trim)
        .filter(|o: &&str| !o.is_empty())
        .unwrap_or(state.environment.github_org.as_ref());

    let Some(token) = state.resolve_token(token) else {
        info!("No GitHub token supplied, skipping fetch");
        return AppError::MissingToken.into();
    };

    match state.github.fetch_org_stats(org, &token).await {
        Ok(stats) => {
            info!("Fetched statistics for {} repositories of {}", stats.totals.repositories, org);
            HandlerResponse::new(StatusCode::OK)
                .data(json!(stats))
                .message(format!("GitHub Statistics for Organization: {}", org))
        }
        Err(e) => {
            error!("Failed to fetch statistics for '{}': {}", org, e);
            e.into()
        }
    }
}
