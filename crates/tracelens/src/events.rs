//! Semantic user events and their dispatch onto the coordinator.
//!
//! The UI shell translates raw input into these events; dispatch mutates
//! the view state through its named transitions, persists the location,
//! and picks the refresh path the trigger calls for. Failures are already
//! surfaced through the sinks, so [`RefreshCoordinator::handle_event`]
//! only logs them; callers that need the joint completion (the refresh
//! button spinner) use the individual methods directly.

use std::sync::Arc;

use tokio::task::JoinHandle;

use tracelens_core::SortAttribute;
use tracelens_data::FetchError;

use crate::coordinator::{RefreshCoordinator, RefreshError, RefreshOutcome, RefreshTrigger};

/// User-level triggers from the UI shell.
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    /// The refresh button was clicked.
    RefreshClicked,
    /// A wheel or drag zoom moved the window; may repeat rapidly.
    ZoomChanged { from: i64, to: i64 },
    /// A rectangular selection chose a discrete window.
    RangeSelected { from: i64, to: i64 },
    /// A table row was clicked, focusing one transaction name.
    RowClicked { transaction_name: String },
    /// A column header was clicked.
    SortClicked { attribute: SortAttribute },
    /// The "show more" button under the table was clicked.
    ShowMoreClicked,
    /// The transaction type filter changed.
    TransactionTypeChanged { transaction_type: String },
    /// The date picker chose a new day (epoch ms anywhere in that day).
    FilterDateChanged { date: i64 },
    /// The detail dialog was requested for the current view.
    DetailRequested,
}

impl RefreshCoordinator {
    /// Dispatch one user event. Fetch failures are logged; they have
    /// already been surfaced through the chart and table sinks.
    pub async fn handle_event(self: Arc<Self>, event: UserEvent) {
        match event {
            UserEvent::RefreshClicked => {
                log_refresh(self.refresh_button_click().await);
            }
            UserEvent::ZoomChanged { from, to } => {
                // the debounced task reports through the sinks on its own
                let _ = self.zoom_changed(from, to).await;
            }
            UserEvent::RangeSelected { from, to } => {
                log_refresh(self.range_selected(from, to).await);
            }
            UserEvent::RowClicked { transaction_name } => {
                log_refresh(self.transaction_selected(&transaction_name).await);
            }
            UserEvent::SortClicked { attribute } => {
                log_table(self.table().sort(attribute).await);
            }
            UserEvent::ShowMoreClicked => {
                log_table(self.table().show_more().await);
            }
            UserEvent::TransactionTypeChanged { transaction_type } => {
                log_refresh(self.transaction_type_changed(transaction_type).await);
            }
            UserEvent::FilterDateChanged { date } => {
                log_refresh(self.filter_date_changed(date).await);
            }
            UserEvent::DetailRequested => {
                self.detail_requested().await;
            }
        }
    }

    /// Manual refresh button: re-anchor the window when the filter date
    /// moved, persist the location, and run a joint refresh.
    pub async fn refresh_button_click(&self) -> Result<RefreshOutcome, RefreshError> {
        {
            let mut state = self.state().lock().await;
            if state.rebase_window_to_filter_date() {
                log::debug!("window re-anchored to filter date {}", state.filter_date());
            }
            self.persist_location(&state);
        }
        self.refresh(RefreshTrigger::manual()).await
    }

    /// Continuous zoom: adopt the window immediately so the axes track
    /// the gesture, persist, and debounce the refresh behind the quiet
    /// period. Returns the scheduled task's handle; it resolves `false`
    /// when a newer zoom abandoned the refresh.
    pub async fn zoom_changed(self: Arc<Self>, from: i64, to: i64) -> JoinHandle<bool> {
        {
            let mut state = self.state().lock().await;
            state.set_window(from, to);
            self.persist_location(&state);
        }
        let coordinator = Arc::clone(&self);
        self.debouncer().schedule(move || async move {
            log_refresh(coordinator.refresh(RefreshTrigger::implicit()).await);
        })
    }

    /// Discrete selection: adopt the window and refresh immediately,
    /// bypassing the debounce.
    pub async fn range_selected(&self, from: i64, to: i64) -> Result<RefreshOutcome, RefreshError> {
        {
            let mut state = self.state().lock().await;
            state.set_window(from, to);
            self.persist_location(&state);
        }
        self.debouncer().interrupt();
        self.refresh(RefreshTrigger::implicit()).await
    }

    /// Row click: only the chart needs the newly focused name; the table
    /// already shows the correct ranking.
    pub async fn transaction_selected(
        &self,
        transaction_name: &str,
    ) -> Result<RefreshOutcome, RefreshError> {
        {
            let mut state = self.state().lock().await;
            state.select_transaction(transaction_name);
            self.persist_location(&state);
        }
        self.refresh(RefreshTrigger::chart_only()).await
    }

    /// Transaction type change: names are scoped to a type, so the focus
    /// clears, then the full manual-refresh routine runs.
    pub async fn transaction_type_changed(
        &self,
        transaction_type: String,
    ) -> Result<RefreshOutcome, RefreshError> {
        {
            let mut state = self.state().lock().await;
            state.set_transaction_type(transaction_type);
        }
        self.refresh_button_click().await
    }

    /// Filter date change: adopt the day, then run the full
    /// manual-refresh routine, which re-anchors the window.
    pub async fn filter_date_changed(&self, date: i64) -> Result<RefreshOutcome, RefreshError> {
        {
            let mut state = self.state().lock().await;
            state.set_filter_date(date);
        }
        self.refresh_button_click().await
    }

    /// Open the detail dialog for the current view; no fetch is issued.
    pub async fn detail_requested(&self) {
        let params = {
            let state = self.state().lock().await;
            state
                .series_query()
                .params()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect()
        };
        self.dialogs().open_detail(params);
    }
}

fn log_refresh(result: Result<RefreshOutcome, RefreshError>) {
    match result {
        Ok(RefreshOutcome::Applied) => {}
        Ok(RefreshOutcome::Superseded) => log::debug!("refresh superseded"),
        Err(e) => log::warn!("{e}"),
    }
}

fn log_table(result: Result<(), FetchError>) {
    if let Err(e) = result {
        log::warn!("table refresh failed: {e}");
    }
}
