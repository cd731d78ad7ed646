// Row filtering over a DataFrame

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::data::frame::{Cell, DataFrame};

/// A condition on one column. JSON shape is either `{"min": .., "max": ..}` or `["a", "b"]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    Range { min: f64, max: f64 },
    OneOf(Vec<String>),
}

impl Filter {
    fn matches(&self, cell: &Cell) -> bool {
        match self {
            Filter::Range { min, max } => cell
                .as_number()
                .map(|n| n >= *min && n <= *max)
                .unwrap_or(false),
            Filter::OneOf(allowed) => {
                let shown = cell.to_string();
                allowed.iter().any(|a| *a == shown)
            }
        }
    }
}

/// Applies every filter (AND). Filters on unknown columns are ignored.
pub fn filter_dataframe(df: &DataFrame, filters: &HashMap<String, Filter>) -> DataFrame {
    if df.is_empty() || filters.is_empty() {
        return df.clone();
    }

    let mut mask: Vec<bool> = vec![true; df.height()];

    for (name, filter) in filters {
        let Some(column) = df.column(name) else {
            debug!("Ignoring filter on unknown column '{}'", name);
            continue;
        };

        for (keep, cell) in mask.iter_mut().zip(&column.values) {
            *keep = *keep && filter.matches(cell);
        }
    }

    df.select_rows(&mask)
}
