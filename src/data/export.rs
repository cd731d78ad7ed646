// Serializing a DataFrame back to CSV for download

use csv::Writer;

use crate::data::frame::DataFrame;
use crate::error::{AppError, Result};

/// Header plus rows, no index column, UTF-8
pub fn to_csv(df: &DataFrame) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());

    if df.width() > 0 {
        writer.write_record(df.column_names())?;
    }

    for row in 0..df.height() {
        writer.write_record(df.columns.iter().map(|c| c.values[row].to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::InvalidInput(format!("failed to flush CSV output: {}", e)))
}
