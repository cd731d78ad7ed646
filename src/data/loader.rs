// Loading uploaded files into a DataFrame

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::data::frame::{Cell, Column, DataFrame};
use crate::error::{AppError, Result};

/// Loads an uploaded file, dispatching on its extension
pub fn load_data(file_name: &str, bytes: &[u8]) -> Result<DataFrame> {
    let extension: String = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => read_csv(bytes),
        _ => Err(AppError::UnsupportedFormat(extension)),
    }
}

/// Parses CSV bytes with a header row
pub fn read_csv(bytes: &[u8]) -> Result<DataFrame> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers: StringRecord = reader.headers()?.clone();
    let mut values: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];

    for record in reader.records() {
        let record: StringRecord = record?;
        for (idx, field) in record.iter().enumerate() {
            values[idx].push(Cell::parse(field));
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(values)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();

    let df = DataFrame::new(columns)?;
    debug!("Loaded CSV with {} rows and {} columns", df.height(), df.width());
    Ok(df)
}
