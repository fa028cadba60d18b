//! Collaborator interfaces for the presentation side of the dashboard.
//!
//! The coordinator drives these traits; the charting engine, the table
//! renderer, and the dialog host implement them. Loading indicators are
//! counted, not boolean: overlapping fetches nest, and every started
//! indicator is finished even when the response is discarded as stale.

use tracelens_core::{DataSeries, SummaryPage};

/// Receives chart updates from the coordinator.
pub trait ChartSink: Send + Sync {
    /// A series fetch went in flight.
    fn loading_started(&self);

    /// A series fetch completed (applied, failed, or discarded).
    fn loading_finished(&self);

    /// Replace the visible time bounds with the refreshed query's bounds.
    fn set_time_bounds(&self, from: i64, to: i64);

    /// Replace the zoomable/pannable range for the current filter date.
    fn set_zoom_range(&self, from: i64, to: i64);

    /// Replace the chart's data wholesale.
    fn set_series(&self, series: Vec<DataSeries>);

    /// Show `message` in place of the chart.
    fn show_error(&self, message: &str);

    /// Clear a previously shown error.
    fn clear_error(&self);
}

/// Receives ranked-table updates from the coordinator.
pub trait TableSink: Send + Sync {
    /// Any table fetch went in flight; dims the rows already shown.
    fn overlay_started(&self);
    fn overlay_finished(&self);

    /// A directly triggered fetch, with no caller holding a completion,
    /// additionally shows the standalone spinner.
    fn spinner_started(&self);
    fn spinner_finished(&self);

    /// Replace the table contents.
    fn set_summaries(&self, page: SummaryPage);

    /// Surface a table-level error message.
    fn show_error(&self, message: &str);
}

/// Opens modal views on request; fetches nothing itself.
pub trait DialogHost: Send + Sync {
    /// Open the transaction detail view for the given query parameters.
    fn open_detail(&self, params: Vec<(String, String)>);
}
