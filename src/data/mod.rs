/*
    * Tabular data utilities: loading uploads, summaries,
    * filtering, CSV export and chart series.
*/

pub mod charts;
pub mod export;
pub mod filter;
pub mod frame;
pub mod loader;
pub mod summary;

pub use charts::{ChartData, ChartSpec};
pub use export::to_csv;
pub use filter::{filter_dataframe, Filter};
pub use frame::{Cell, Column, ColumnType, DataFrame};
pub use loader::{load_data, read_csv};
pub use summary::{summary_statistics, ColumnSummary};
