//! Core types for the tracelens dashboard.
//!
//! This crate provides the fundamental data structures shared by the
//! coordinator and the data layer:
//! - `TimeWindow` / `AggregateInterval` - window arithmetic over epoch-ms timestamps
//! - `DataSeries` - stacked chart series payloads
//! - `SummaryPage` - ranked per-transaction aggregates for the table view
//! - `SortAttribute` / `SortDirection` - table ordering

pub mod series;
pub mod sort;
pub mod summary;
pub mod window;

pub use series::{DataSeries, SeriesPoint};
pub use sort::{SortAttribute, SortDirection};
pub use summary::{OverallSummary, SummaryPage, TransactionSummary};
pub use window::{day_start, AggregateInterval, TimeWindow, DAY_MS, MINUTE_MS};
