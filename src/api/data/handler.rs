// Tabular data handlers: summary, filter, export and chart series

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::json;
use axum::{
    body::Bytes,
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{instrument, info, warn};

use crate::data::{self, charts, ChartSpec, DataFrame, Filter};
use crate::error::Result;
use crate::utils::response_handler::HandlerResponse;

const PREVIEW_ROWS: usize = 10;
const EXPORT_FILE_NAME: &str = "filtered_data.csv";

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_file_name() -> String {
    "data.csv".to_string()
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub csv: String,
    #[serde(default)]
    pub filters: HashMap<String, Filter>,
}

#[derive(Debug, Deserialize)]
pub struct ChartRequest {
    pub csv: String,
    pub chart: ChartSpec,
}

fn parse_csv(csv: &str) -> Result<DataFrame> {
    data::read_csv(csv.as_bytes())
}

/// Loads an uploaded file and returns per-column statistics with a preview
#[instrument(skip(body), fields(bytes = body.len()))]
pub async fn summary_handler(
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> HandlerResponse {
    match summarize(&query.file_name, &body) {
        Ok(response) => response,
        Err(e) => {
            warn!("Summary failed for '{}': {}", query.file_name, e);
            e.into()
        }
    }
}

fn summarize(file_name: &str, body: &[u8]) -> Result<HandlerResponse> {
    let df: DataFrame = data::load_data(file_name, body)?;
    info!("Loaded '{}' with {} rows and {} columns", file_name, df.height(), df.width());

    let preview: DataFrame = df.select_rows(
        &(0..df.height()).map(|i| i < PREVIEW_ROWS).collect::<Vec<bool>>(),
    );

    let Some(summary) = data::summary_statistics(&df) else {
        return Ok(HandlerResponse::new(StatusCode::OK)
            .data(json!({
                "rows": 0,
                "columns": df.column_names(),
                "summary": null,
                "preview": [],
            }))
            .message("The uploaded file has no data rows"));
    };

    Ok(HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "rows": df.height(),
            "columns": df.column_names(),
            "summary": summary,
            "preview": preview.records(),
        }))
        .message(format!("Loaded {} rows from {}", df.height(), file_name)))
}

/// Applies filters and returns the remaining rows plus their CSV form
#[instrument(skip(request), fields(filters = request.filters.len()))]
pub async fn filter_handler(Json(request): Json<FilterRequest>) -> HandlerResponse {
    match filter(&request) {
        Ok(response) => response,
        Err(e) => {
            warn!("Filter failed: {}", e);
            e.into()
        }
    }
}

fn filter(request: &FilterRequest) -> Result<HandlerResponse> {
    let df: DataFrame = parse_csv(&request.csv)?;
    let filtered: DataFrame = data::filter_dataframe(&df, &request.filters);
    let csv: String = String::from_utf8_lossy(&data::to_csv(&filtered)?).into_owned();

    info!("Filtered {} rows down to {}", df.height(), filtered.height());

    Ok(HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "rows": filtered.height(),
            "total_rows": df.height(),
            "records": filtered.records(),
            "csv": csv,
        }))
        .message(format!("{} of {} rows match", filtered.height(), df.height())))
}

/// Filtered table as a CSV download
#[instrument(skip(request), fields(filters = request.filters.len()))]
pub async fn export_handler(Json(request): Json<FilterRequest>) -> Response {
    match export(&request) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            warn!("Export failed: {}", e);
            e.into_response()
        }
    }
}

fn export(request: &FilterRequest) -> Result<Vec<u8>> {
    let df: DataFrame = parse_csv(&request.csv)?;
    let filtered: DataFrame = data::filter_dataframe(&df, &request.filters);
    info!("Exporting {} rows", filtered.height());
    data::to_csv(&filtered)
}

/// Computes the series for one chart
#[instrument(skip(request), fields(chart = ?request.chart))]
pub async fn chart_handler(Json(request): Json<ChartRequest>) -> HandlerResponse {
    let result: Result<charts::ChartData> =
        parse_csv(&request.csv).and_then(|df: DataFrame| charts::render(&df, &request.chart));

    match result {
        Ok(chart) => HandlerResponse::new(StatusCode::OK)
            .data(json!(chart))
            .message("Chart data computed"),
        Err(e) => {
            warn!("Chart failed: {}", e);
            HandlerResponse::from(e)
        }
    }
}
