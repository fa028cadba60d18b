//! Table-side refresh: ranked summaries, pagination growth, sort toggling.
//!
//! The table has its own trigger path ("sort" and "show more" never touch
//! the chart) but is also invoked by the coordinator on most full
//! refreshes, after the series fetch's head start.

use std::sync::Arc;

use tracelens_core::{AggregateInterval, SortAttribute};
use tracelens_data::{FetchError, QueryClient};

use crate::location::{self, LocationStore};
use crate::sinks::TableSink;
use crate::view::SharedViewState;

/// Fetches and applies ranked per-transaction summaries.
pub struct TableRefresher {
    client: Arc<dyn QueryClient>,
    sink: Arc<dyn TableSink>,
    state: SharedViewState,
    location: Arc<dyn LocationStore>,
    interval: AggregateInterval,
    default_transaction_type: String,
}

impl TableRefresher {
    pub fn new(
        client: Arc<dyn QueryClient>,
        sink: Arc<dyn TableSink>,
        state: SharedViewState,
        location: Arc<dyn LocationStore>,
        interval: AggregateInterval,
        default_transaction_type: String,
    ) -> Self {
        Self {
            client,
            sink,
            state,
            location,
            interval,
            default_transaction_type,
        }
    }

    /// Fetch the ranked summaries for the current state and replace the
    /// table contents.
    ///
    /// `has_completion` marks fetches whose caller holds a completion
    /// (refresh button, show-more): those only dim the existing rows,
    /// while directly triggered fetches also show the standalone spinner.
    pub async fn refresh(&self, has_completion: bool) -> Result<(), FetchError> {
        let query = { self.state.lock().await.summary_query() };

        self.sink.overlay_started();
        if !has_completion {
            self.sink.spinner_started();
        }

        let result = self.client.fetch_summaries(&query).await;

        self.sink.overlay_finished();
        if !has_completion {
            self.sink.spinner_finished();
        }

        match result {
            Ok(page) => {
                log::debug!(
                    "table refreshed: {} rows, more_available={}",
                    page.transactions.len(),
                    page.more_available
                );
                self.sink.set_summaries(page);
                Ok(())
            }
            Err(e) => {
                self.report_error(&e);
                Err(e)
            }
        }
    }

    /// Toggle or switch the ordering, persist the location, and refresh
    /// the table only; the chart is unaffected by ordering.
    pub async fn sort(&self, attribute: SortAttribute) -> Result<(), FetchError> {
        {
            let mut state = self.state.lock().await;
            state.toggle_sort(attribute);
            location::persist(
                self.location.as_ref(),
                &state,
                self.interval,
                &self.default_transaction_type,
            );
        }
        self.refresh(false).await
    }

    /// Double the row limit and re-fetch with the same window and filter.
    /// The limit never shrinks within a session.
    pub async fn show_more(&self) -> Result<(), FetchError> {
        let limit = { self.state.lock().await.grow_table_limit() };
        log::debug!("table limit grown to {limit}");
        self.refresh(true).await
    }

    /// Shared table error path: surfaces the user message and leaves the
    /// error to the caller's completion.
    fn report_error(&self, err: &FetchError) {
        log::warn!("table refresh failed: {err}");
        self.sink.show_error(err.user_message());
    }
}
