// Per-column summary statistics

use serde::Serialize;

use crate::data::frame::{Column, ColumnType, DataFrame};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub dtype: ColumnType,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    pub max: Option<f64>,
    pub missing: usize,
    pub missing_pct: f64,
}

/// Summarizes every column; `None` when the frame has no rows or no columns
pub fn summary_statistics(df: &DataFrame) -> Option<Vec<ColumnSummary>> {
    if df.is_empty() {
        return None;
    }

    let rows = df.height();
    Some(df.columns.iter().map(|c| summarize(c, rows)).collect())
}

fn summarize(column: &Column, rows: usize) -> ColumnSummary {
    let dtype = column.dtype();
    let missing = column.missing();

    let mut summary = ColumnSummary {
        column: column.name.clone(),
        dtype,
        count: rows - missing,
        mean: None,
        std: None,
        min: None,
        p25: None,
        p50: None,
        p75: None,
        max: None,
        missing,
        missing_pct: missing as f64 / rows as f64 * 100.0,
    };

    if !dtype.is_numeric() {
        return summary;
    }

    let mut values = column.numbers();
    values.sort_by(f64::total_cmp);

    summary.mean = mean(&values);
    summary.std = sample_std(&values);
    summary.min = values.first().copied();
    summary.p25 = quantile(&values, 0.25);
    summary.p50 = quantile(&values, 0.5);
    summary.p75 = quantile(&values, 0.75);
    summary.max = values.last().copied();
    summary
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with one degree of freedom removed
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Linear-interpolated quantile over already sorted values
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}
