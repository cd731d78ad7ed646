// Domain errors and their mapping onto HTTP responses

use axum::{http::StatusCode, response::{IntoResponse, Response}};
use serde_json::json;
use thiserror::Error;

use crate::utils::response_handler::HandlerResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("GitHub API token required")]
    MissingToken,

    #[error("GitHub rejected the API token")]
    InvalidToken,

    #[error("Organization not found: {0}")]
    OrgNotFound(String),

    #[error("GitHub rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    #[error("GitHub API error: {status} - {message}")]
    GitHubApi { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported file format. Please upload a CSV file.")]
    UnsupportedFormat(String),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column is not numeric: {0}")]
    NotNumeric(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingToken | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::OrgNotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::GitHubApi { .. } | AppError::Network(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidInput(_)
            | AppError::UnsupportedFormat(_)
            | AppError::Csv(_)
            | AppError::ColumnNotFound(_)
            | AppError::NotNumeric(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable snake_case identifier returned to clients
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingToken => "missing_token",
            AppError::InvalidToken => "invalid_token",
            AppError::OrgNotFound(_) => "org_not_found",
            AppError::RateLimited(_) => "rate_limited",
            AppError::GitHubApi { .. } => "github_api_error",
            AppError::Network(_) => "network_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::UnsupportedFormat(_) => "unsupported_format",
            AppError::Csv(_) => "csv_error",
            AppError::ColumnNotFound(_) => "column_not_found",
            AppError::NotNumeric(_) => "not_numeric",
        }
    }

    /// Whether the same request may succeed later without changes
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::RateLimited(_) | AppError::Network(_))
    }
}

impl From<AppError> for HandlerResponse {
    fn from(err: AppError) -> Self {
        HandlerResponse::new(err.status_code())
            .data(json!({
                "error": err.code(),
                "details": err.to_string(),
                "retryable": err.is_retryable(),
            }))
            .message(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        HandlerResponse::from(self).into_response()
    }
}
