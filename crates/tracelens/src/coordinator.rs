//! The orchestration brain: correlated chart and table refresh.
//!
//! Every user trigger funnels into [`RefreshCoordinator::refresh`]: it
//! captures a chart generation, issues the series fetch, gives it a small
//! head start over the heavier summaries fetch, and joins the two
//! completions into one externally observable outcome. Responses that
//! lost the generation race are discarded without touching visible state.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;

use tracelens_config::RefreshConfig;
use tracelens_core::AggregateInterval;
use tracelens_data::{FetchError, QueryClient, SeriesQuery};

use crate::debounce::ZoomDebouncer;
use crate::generation::{Generation, GenerationGuard};
use crate::location::{self, LocationStore};
use crate::sinks::{ChartSink, DialogHost, TableSink};
use crate::table::TableRefresher;
use crate::view::{SharedViewState, ViewState};

/// What a refresh call was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTrigger {
    /// The caller holds a completion (the refresh button) and wants the
    /// joint outcome of both fetches.
    pub manual: bool,
    /// Leave the table alone; only the chart series need re-fetching.
    pub skip_table: bool,
}

impl RefreshTrigger {
    /// Refresh button: joint completion over chart and table.
    pub fn manual() -> Self {
        Self {
            manual: true,
            skip_table: false,
        }
    }

    /// Zoom settle, selection, filter change: both fetches, no caller
    /// completion.
    pub fn implicit() -> Self {
        Self {
            manual: false,
            skip_table: false,
        }
    }

    /// Selected-name change: the table already shows the right ranking.
    pub fn chart_only() -> Self {
        Self {
            manual: false,
            skip_table: true,
        }
    }
}

/// Outcome of a refresh that did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response was applied to visible state.
    Applied,
    /// A newer refresh superseded this one; nothing was applied.
    Superseded,
}

/// Which half of a joint refresh failed.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("chart refresh failed: {0}")]
    Chart(#[source] FetchError),
    #[error("table refresh failed: {0}")]
    Table(#[source] FetchError),
}

impl RefreshError {
    /// The underlying fetch failure.
    pub fn fetch_error(&self) -> &FetchError {
        match self {
            RefreshError::Chart(e) | RefreshError::Table(e) => e,
        }
    }
}

/// Coordinator timing knobs.
#[derive(Debug, Clone, Copy)]
pub struct RefreshSettings {
    /// Head start given to the series fetch before the table fetch. The
    /// aggregate query is much slower and the backend handler is
    /// throttled to a single worker.
    pub table_head_start: Duration,
    /// Quiet period after the last zoom event before a refresh fires.
    pub zoom_settle: Duration,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            table_head_start: Duration::from_millis(5),
            zoom_settle: Duration::from_millis(100),
        }
    }
}

impl From<&RefreshConfig> for RefreshSettings {
    fn from(config: &RefreshConfig) -> Self {
        Self {
            table_head_start: Duration::from_millis(config.table_head_start_ms),
            zoom_settle: Duration::from_millis(config.zoom_settle_ms),
        }
    }
}

/// Drives the chart and table fetches for one dashboard session.
pub struct RefreshCoordinator {
    client: Arc<dyn QueryClient>,
    chart: Arc<dyn ChartSink>,
    table: TableRefresher,
    dialogs: Arc<dyn DialogHost>,
    state: SharedViewState,
    location: Arc<dyn LocationStore>,
    chart_guard: GenerationGuard,
    debouncer: ZoomDebouncer,
    interval: AggregateInterval,
    default_transaction_type: String,
    head_start: Duration,
}

impl RefreshCoordinator {
    pub fn new(
        client: Arc<dyn QueryClient>,
        chart: Arc<dyn ChartSink>,
        table_sink: Arc<dyn TableSink>,
        dialogs: Arc<dyn DialogHost>,
        location: Arc<dyn LocationStore>,
        state: ViewState,
        interval: AggregateInterval,
        default_transaction_type: String,
        settings: RefreshSettings,
    ) -> Arc<Self> {
        let state: SharedViewState = Arc::new(Mutex::new(state));
        let table = TableRefresher::new(
            Arc::clone(&client),
            table_sink,
            Arc::clone(&state),
            Arc::clone(&location),
            interval,
            default_transaction_type.clone(),
        );
        Arc::new(Self {
            client,
            chart,
            table,
            dialogs,
            state,
            location,
            chart_guard: GenerationGuard::new(),
            debouncer: ZoomDebouncer::new(settings.zoom_settle),
            interval,
            default_transaction_type,
            head_start: settings.table_head_start,
        })
    }

    /// The table-side refresher, for table-only triggers.
    pub fn table(&self) -> &TableRefresher {
        &self.table
    }

    /// The zoom debouncer guarding the zoom-settle operation class.
    pub(crate) fn debouncer(&self) -> &ZoomDebouncer {
        &self.debouncer
    }

    /// A copy of the current view state.
    pub async fn snapshot(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    pub(crate) fn state(&self) -> &SharedViewState {
        &self.state
    }

    pub(crate) fn dialogs(&self) -> &dyn DialogHost {
        self.dialogs.as_ref()
    }

    /// Write the current state into the location store. Callers must hold
    /// the state lock.
    pub(crate) fn persist_location(&self, state: &ViewState) {
        location::persist(
            self.location.as_ref(),
            state,
            self.interval,
            &self.default_transaction_type,
        );
    }

    /// Run one coordinated refresh.
    ///
    /// The series fetch is issued immediately under a fresh chart
    /// generation; unless the trigger skips it, the table fetch follows
    /// after the head-start delay. The returned result settles once every
    /// subordinate fetch has: both-success resolves (with
    /// [`RefreshOutcome::Superseded`] when a newer refresh won the race),
    /// and a failure of either half rejects with that half's error.
    pub async fn refresh(&self, trigger: RefreshTrigger) -> Result<RefreshOutcome, RefreshError> {
        let generation = self.chart_guard.begin();
        let (query, zoom_range) = {
            let state = self.state.lock().await;
            (state.series_query(), state.pannable_range())
        };
        log::debug!(
            "chart refresh #{} for [{}, {}]",
            generation.id(),
            query.from,
            query.to
        );

        let chart_fetch = self.fetch_chart(generation, query, zoom_range);

        if trigger.skip_table {
            return chart_fetch.await.map_err(RefreshError::Chart);
        }

        let table_fetch = async {
            tokio::time::sleep(self.head_start).await;
            self.table.refresh(trigger.manual).await
        };

        let (chart_result, table_result) = tokio::join!(chart_fetch, table_fetch);
        match (chart_result, table_result) {
            (Err(e), _) => Err(RefreshError::Chart(e)),
            (_, Err(e)) => Err(RefreshError::Table(e)),
            (Ok(outcome), Ok(())) => Ok(outcome),
        }
    }

    /// Issue the series fetch and apply it unless it went stale.
    async fn fetch_chart(
        &self,
        generation: Generation,
        query: SeriesQuery,
        zoom_range: (i64, i64),
    ) -> Result<RefreshOutcome, FetchError> {
        self.chart.loading_started();
        let result = self.client.fetch_series(&query).await;
        self.chart.loading_finished();

        if !generation.is_current() {
            // A newer refresh owns the chart now; drop this response
            // regardless of whether it succeeded.
            log::debug!("chart refresh #{} superseded, discarding", generation.id());
            return Ok(RefreshOutcome::Superseded);
        }

        match result {
            Ok(series) => {
                self.chart.clear_error();
                self.chart.set_time_bounds(query.from, query.to);
                self.chart.set_zoom_range(zoom_range.0, zoom_range.1);
                self.chart.set_series(series);
                Ok(RefreshOutcome::Applied)
            }
            Err(e) => {
                log::warn!("chart refresh #{} failed: {e}", generation.id());
                self.chart.show_error(e.user_message());
                Err(e)
            }
        }
    }
}
