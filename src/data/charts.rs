// Data series behind the page's charts. The browser draws them.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::frame::{Cell, DataFrame};
use crate::data::summary::mean;
use crate::error::{AppError, Result};

const DEFAULT_BINS: usize = 20;
const MAX_BINS: usize = 1000;
const LEGEND_OUTSIDE_AFTER: usize = 10;
const ROTATE_LABELS_AFTER: usize = 5;

/// Chart request as posted by the page, tagged by `kind`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Histogram {
        column: String,
        #[serde(default)]
        bins: Option<usize>,
    },
    Scatter {
        x: String,
        y: String,
        #[serde(default)]
        color: Option<String>,
    },
    Bar {
        x: String,
        y: String,
        #[serde(default)]
        top_n: Option<usize>,
    },
    Line {
        x: String,
        y: String,
        #[serde(default)]
        group: Option<String>,
    },
    Correlation {
        #[serde(default)]
        columns: Option<Vec<String>>,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    Histogram(Histogram),
    Scatter(Scatter),
    Bar(Bar),
    Line(Line),
    Correlation(Correlation),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bins: Vec<HistogramBin>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Line point; x keeps its cell so dates and labels survive
#[derive(Debug, Clone, Serialize)]
pub struct LinePoint {
    pub x: Cell,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Series<T> {
    pub label: Option<String>,
    pub points: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scatter {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series<Point>>,
    pub legend_outside: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEntry {
    pub category: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Bar {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<BarEntry>,
    pub rotate_labels: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series<LinePoint>>,
    pub rotate_labels: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Correlation {
    pub title: String,
    pub columns: Vec<String>,
    pub matrix: Vec<Vec<Option<f64>>>,
}

pub fn render(df: &DataFrame, spec: &ChartSpec) -> Result<ChartData> {
    Ok(match spec {
        ChartSpec::Histogram { column, bins } => {
            ChartData::Histogram(histogram(df, column, bins.unwrap_or(DEFAULT_BINS))?)
        }
        ChartSpec::Scatter { x, y, color } => ChartData::Scatter(scatter(df, x, y, color.as_deref())?),
        ChartSpec::Bar { x, y, top_n } => ChartData::Bar(bar(df, x, y, *top_n)?),
        ChartSpec::Line { x, y, group } => ChartData::Line(line(df, x, y, group.as_deref())?),
        ChartSpec::Correlation { columns } => ChartData::Correlation(correlation(df, columns.as_deref())?),
    })
}

/// Equal-width bins over [min, max]; the last bin is closed on the right
pub fn histogram(df: &DataFrame, column: &str, bins: usize) -> Result<Histogram> {
    if bins == 0 {
        return Err(AppError::InvalidInput("bins must be at least 1".into()));
    }
    if bins > MAX_BINS {
        return Err(AppError::InvalidInput(format!("bins must be at most {}", MAX_BINS)));
    }
    let values = df.require_numeric(column)?.numbers();

    let mut out = Histogram {
        title: format!("Histogram of {}", column),
        x_label: column.to_string(),
        y_label: "Frequency".to_string(),
        bins: Vec::new(),
    };

    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Ok(out);
    };

    if min == max {
        out.bins.push(HistogramBin { start: min, end: max, count: values.len() });
        return Ok(out);
    }

    let width = (max - min) / bins as f64;
    out.bins = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out.bins[idx].count += 1;
    }

    Ok(out)
}

/// Numeric point pairs, split by the color column when it exists
pub fn scatter(df: &DataFrame, x: &str, y: &str, color: Option<&str>) -> Result<Scatter> {
    let xs = &df.require_numeric(x)?.values;
    let ys = &df.require_numeric(y)?.values;
    let colors = color.and_then(|c| df.column(c)).map(|c| &c.values);

    let mut series: Vec<Series<Point>> = Vec::new();
    let mut index: HashMap<Option<String>, usize> = HashMap::new();

    for row in 0..df.height() {
        let (Some(px), Some(py)) = (xs[row].as_number(), ys[row].as_number()) else {
            continue;
        };
        let label = colors.map(|c| c[row].to_string());
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            series.push(Series { label, points: Vec::new() });
            series.len() - 1
        });
        series[slot].points.push(Point { x: px, y: py });
    }

    Ok(Scatter {
        title: format!("Scatter Plot: {} vs {}", y, x),
        x_label: x.to_string(),
        y_label: y.to_string(),
        legend_outside: colors.is_some() && series.len() > LEGEND_OUTSIDE_AFTER,
        series,
    })
}

/// Sums `y` per `x` category in key order, optionally keeping only the largest `top_n`
pub fn bar(df: &DataFrame, x: &str, y: &str, top_n: Option<usize>) -> Result<Bar> {
    let xs = &df.require(x)?.values;
    let ys = &df.require_numeric(y)?.values;

    let mut groups: Vec<(&Cell, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (cx, cy) in xs.iter().zip(ys) {
        if cx.is_missing() {
            continue;
        }
        let slot = *index.entry(cx.to_string()).or_insert_with(|| {
            groups.push((cx, 0.0));
            groups.len() - 1
        });
        groups[slot].1 += cy.as_number().unwrap_or(0.0);
    }
    groups.sort_by(|a, b| cmp_cells(a.0, b.0));

    let mut bars: Vec<BarEntry> = groups
        .into_iter()
        .map(|(cell, value)| BarEntry { category: cell.to_string(), value })
        .collect();

    if let Some(n) = top_n.filter(|n| *n > 0) {
        // stable sort keeps key order among ties
        bars.sort_by(|a, b| b.value.total_cmp(&a.value));
        bars.truncate(n);
    }

    Ok(Bar {
        title: format!("Bar Chart: {} by {}", y, x),
        x_label: x.to_string(),
        y_label: y.to_string(),
        rotate_labels: bars.len() > ROTATE_LABELS_AFTER,
        bars,
    })
}

/// One series per group (or a single one), each sorted by x.
/// Numeric x sorts by value, anything else (dates, labels) by its text.
pub fn line(df: &DataFrame, x: &str, y: &str, group: Option<&str>) -> Result<Line> {
    let xs = &df.require(x)?.values;
    let ys = &df.require_numeric(y)?.values;
    let groups = group.and_then(|g| df.column(g)).map(|g| &g.values);

    let mut series: Vec<Series<LinePoint>> = Vec::new();
    let mut index: HashMap<Option<String>, usize> = HashMap::new();

    for (row, cx) in xs.iter().enumerate() {
        let Some(py) = ys[row].as_number() else {
            continue;
        };
        if cx.is_missing() {
            continue;
        }
        let label = groups.map(|g| g[row].to_string());
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            series.push(Series { label, points: Vec::new() });
            series.len() - 1
        });
        series[slot].points.push(LinePoint { x: cx.clone(), y: py });
    }

    for s in &mut series {
        s.points.sort_by(|a, b| cmp_cells(&a.x, &b.x));
    }

    let mut unique_x: Vec<&Cell> = xs.iter().filter(|c| !c.is_missing()).collect();
    unique_x.sort_by(|a, b| cmp_cells(a, b));
    unique_x.dedup();

    Ok(Line {
        title: format!("Line Chart: {} vs {}", y, x),
        x_label: x.to_string(),
        y_label: y.to_string(),
        series,
        rotate_labels: unique_x.len() > ROTATE_LABELS_AFTER,
    })
}

// Numbers first by value, then text by its string
fn cmp_cells(a: &Cell, b: &Cell) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(l), Some(r)) => l.total_cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_string().cmp(&b.to_string()),
    }
}

/// Pearson correlation over numeric columns, pairwise-complete
pub fn correlation(df: &DataFrame, columns: Option<&[String]>) -> Result<Correlation> {
    let selected: Vec<&str> = match columns {
        Some(names) if !names.is_empty() => {
            for name in names {
                df.require(name)?;
            }
            names.iter().map(String::as_str).collect()
        }
        _ => df.column_names(),
    };

    let numeric: Vec<(&str, &Vec<Cell>)> = selected
        .into_iter()
        .filter_map(|name| df.column(name))
        .filter(|c| c.dtype().is_numeric())
        .map(|c| (c.name.as_str(), &c.values))
        .collect();

    let matrix: Vec<Vec<Option<f64>>> = numeric
        .iter()
        .map(|(_, a)| numeric.iter().map(|(_, b)| pearson(a, b)).collect())
        .collect();

    Ok(Correlation {
        title: "Correlation Matrix".to_string(),
        columns: numeric.iter().map(|(name, _)| name.to_string()).collect(),
        matrix,
    })
}

fn pearson(a: &[Cell], b: &[Cell]) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some((x.as_number()?, y.as_number()?)))
        .unzip();

    if xs.len() < 2 {
        return None;
    }

    let mx = mean(&xs)?;
    let my = mean(&ys)?;
    let (mut cov, mut vx, mut vy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(&ys) {
        cov += (x - mx) * (y - my);
        vx += (x - mx).powi(2);
        vy += (y - my).powi(2);
    }

    if vx == 0.0 || vy == 0.0 {
        return None;
    }
    Some(cov / (vx.sqrt() * vy.sqrt()))
}
