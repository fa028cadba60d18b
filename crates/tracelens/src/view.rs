//! Mutable view state for one dashboard session.

use std::sync::Arc;

use tokio::sync::Mutex;

use tracelens_core::{day_start, AggregateInterval, SortAttribute, SortDirection, TimeWindow};
use tracelens_data::{SeriesQuery, SummaryQuery};

/// The table starts at the top 25; a screenful without being overwhelming.
pub const INITIAL_TABLE_LIMIT: u32 = 25;

/// View state shared between the coordinator and its spawned tasks.
///
/// The mutex is only ever held across synchronous sections, never across
/// an await point.
pub type SharedViewState = Arc<Mutex<ViewState>>;

/// Filter, window, sort, and pagination state for one dashboard session.
///
/// Created once from the location encoding (or derived defaults) and
/// mutated exclusively through the named transitions below. Transitions
/// that change the shape of the table query restart its pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    window: TimeWindow,
    filter_date: i64,
    transaction_type: String,
    selected_transaction_name: Option<String>,
    sort_attribute: SortAttribute,
    sort_direction: SortDirection,
    table_limit: u32,
    using_default_window: bool,
}

impl ViewState {
    /// Derive the default ~2 hour window from the current time.
    ///
    /// Used when the incoming location carries no explicit bounds. The
    /// window is recomputed identically on reload, so it is never written
    /// back into the location.
    pub fn with_default_window(
        now: i64,
        interval: AggregateInterval,
        transaction_type: String,
    ) -> Self {
        let (window, day) = TimeWindow::default_for(now, interval);
        Self {
            window,
            filter_date: day,
            transaction_type,
            selected_transaction_name: None,
            sort_attribute: SortAttribute::default(),
            sort_direction: SortDirection::default(),
            table_limit: INITIAL_TABLE_LIMIT,
            using_default_window: true,
        }
    }

    /// Adopt explicit bounds from a shared location.
    ///
    /// `from` shifts forward by one aggregation bucket: aggregate points
    /// carry the timestamp of the interval *end*, so the displayed range
    /// must start one bucket after the raw query bound to line up with
    /// point labels.
    pub fn with_explicit_window(
        raw_from: i64,
        to: i64,
        interval: AggregateInterval,
        transaction_type: String,
    ) -> Self {
        let from = raw_from + interval.millis();
        Self {
            window: TimeWindow::new(from, to),
            filter_date: day_start(from),
            transaction_type,
            selected_transaction_name: None,
            sort_attribute: SortAttribute::default(),
            sort_direction: SortDirection::default(),
            table_limit: INITIAL_TABLE_LIMIT,
            using_default_window: false,
        }
    }

    // --- read access ---

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Midnight of the day the view is anchored to.
    pub fn filter_date(&self) -> i64 {
        self.filter_date
    }

    pub fn transaction_type(&self) -> &str {
        &self.transaction_type
    }

    /// The focused transaction name; `None` aggregates across all names.
    pub fn selected_transaction_name(&self) -> Option<&str> {
        self.selected_transaction_name.as_deref()
    }

    pub fn sort_attribute(&self) -> SortAttribute {
        self.sort_attribute
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn table_limit(&self) -> u32 {
        self.table_limit
    }

    /// True when the window was derived from "now" rather than supplied
    /// explicitly; such a window is omitted from the location encoding.
    pub fn using_default_window(&self) -> bool {
        self.using_default_window
    }

    /// The zoomable/pannable range: the filter date's full calendar day.
    pub fn pannable_range(&self) -> (i64, i64) {
        TimeWindow::pannable_range(self.filter_date)
    }

    // --- named transitions ---

    /// Adopt a new window from a zoom, pan, or selection. The window is
    /// now explicit and the table pagination restarts.
    pub fn set_window(&mut self, from: i64, to: i64) {
        self.window = TimeWindow::new(from, to);
        self.using_default_window = false;
        self.table_limit = INITIAL_TABLE_LIMIT;
    }

    /// Pick a new day in the date filter. The window itself moves on the
    /// next manual refresh via [`rebase_window_to_filter_date`].
    ///
    /// [`rebase_window_to_filter_date`]: Self::rebase_window_to_filter_date
    pub fn set_filter_date(&mut self, date: i64) {
        self.filter_date = day_start(date);
    }

    /// Re-anchor the window when the filter date no longer matches the
    /// window's day, preserving time-of-day offsets. Returns true when the
    /// window moved.
    pub fn rebase_window_to_filter_date(&mut self) -> bool {
        if day_start(self.window.from) == self.filter_date {
            return false;
        }
        self.window = self.window.rebase_to_day(self.filter_date);
        self.using_default_window = false;
        self.table_limit = INITIAL_TABLE_LIMIT;
        true
    }

    /// Switch the transaction type filter. Clears the focused transaction
    /// name, since names are scoped to a type.
    pub fn set_transaction_type(&mut self, transaction_type: String) {
        self.transaction_type = transaction_type;
        self.selected_transaction_name = None;
        self.table_limit = INITIAL_TABLE_LIMIT;
    }

    /// Focus a single transaction name, or clear the focus with an empty
    /// name. The table query is unaffected, so pagination is kept.
    pub fn select_transaction(&mut self, name: &str) {
        self.selected_transaction_name = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
    }

    /// Adopt an ordering wholesale, e.g. from the location encoding.
    pub fn set_sort(&mut self, attribute: SortAttribute, direction: SortDirection) {
        self.sort_attribute = attribute;
        self.sort_direction = direction;
    }

    /// Toggle the sort: same attribute flips the direction, a new
    /// attribute starts descending.
    pub fn toggle_sort(&mut self, attribute: SortAttribute) {
        if self.sort_attribute == attribute {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_attribute = attribute;
            self.sort_direction = SortDirection::Desc;
        }
    }

    /// Double the table row limit. The limit never shrinks within a
    /// session; it only resets when the query shape changes.
    pub fn grow_table_limit(&mut self) -> u32 {
        self.table_limit *= 2;
        self.table_limit
    }

    // --- query builders ---

    /// The chart query for the current state.
    pub fn series_query(&self) -> SeriesQuery {
        SeriesQuery {
            from: self.window.from,
            to: self.window.to,
            transaction_type: self.transaction_type.clone(),
            transaction_name: self.selected_transaction_name.clone(),
        }
    }

    /// The table query for the current state.
    pub fn summary_query(&self) -> SummaryQuery {
        SummaryQuery {
            from: self.window.from,
            to: self.window.to,
            transaction_type: self.transaction_type.clone(),
            sort_attribute: self.sort_attribute,
            sort_direction: self.sort_direction,
            limit: self.table_limit,
        }
    }

    /// Query parameters for the trace drill-down page.
    ///
    /// `from` is widened by one aggregation bucket because each point
    /// aggregates the interval preceding its timestamp; the traces behind
    /// the first visible point started up to one bucket earlier.
    pub fn trace_query_params(&self, interval: AggregateInterval) -> Vec<(String, String)> {
        let mut params = vec![
            (
                "from".to_string(),
                (self.window.from - interval.millis()).to_string(),
            ),
            ("to".to_string(), self.window.to.to_string()),
            ("transactionType".to_string(), self.transaction_type.clone()),
        ];
        if let Some(name) = &self.selected_transaction_name {
            params.push(("transactionName".to_string(), name.clone()));
            params.push(("transactionNameComparator".to_string(), "equals".to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracelens_core::{DAY_MS, MINUTE_MS};

    const DAY: i64 = 19_800 * DAY_MS;
    const HOUR_MS: i64 = 60 * MINUTE_MS;

    fn interval() -> AggregateInterval {
        AggregateInterval::from_secs(300)
    }

    fn explicit_state() -> ViewState {
        ViewState::with_explicit_window(DAY + 9 * HOUR_MS, DAY + 11 * HOUR_MS, interval(), "Web".to_string())
    }

    #[test]
    fn test_default_window_is_marked_default() {
        let state =
            ViewState::with_default_window(DAY + 11 * HOUR_MS, interval(), "Web".to_string());
        assert!(state.using_default_window());
        assert_eq!(state.filter_date(), DAY);
        assert_eq!(state.table_limit(), INITIAL_TABLE_LIMIT);
    }

    #[test]
    fn test_explicit_window_shifts_from_by_one_bucket() {
        let state =
            ViewState::with_explicit_window(1000, 2000, interval(), "Web".to_string());
        assert_eq!(state.window().from, 301_000);
        assert_eq!(state.window().to, 2000);
        assert!(!state.using_default_window());
    }

    #[test]
    fn test_set_window_resets_pagination() {
        let mut state = explicit_state();
        state.grow_table_limit();
        state.grow_table_limit();
        assert_eq!(state.table_limit(), 100);

        state.set_window(DAY + HOUR_MS, DAY + 2 * HOUR_MS);
        assert_eq!(state.table_limit(), INITIAL_TABLE_LIMIT);
        assert!(!state.using_default_window());
    }

    #[test]
    fn test_table_limit_only_doubles() {
        let mut state = explicit_state();
        assert_eq!(state.grow_table_limit(), 50);
        assert_eq!(state.grow_table_limit(), 100);
        assert_eq!(state.grow_table_limit(), 200);
    }

    #[test]
    fn test_rebase_window_on_changed_filter_date() {
        let mut state = explicit_state();
        let new_day = DAY + 5 * DAY_MS;
        state.set_filter_date(new_day + 3 * HOUR_MS);
        assert_eq!(state.filter_date(), new_day);

        assert!(state.rebase_window_to_filter_date());
        assert_eq!(state.window().from, new_day + 9 * HOUR_MS + interval().millis());
        assert_eq!(state.window().to, new_day + 11 * HOUR_MS);
    }

    #[test]
    fn test_rebase_is_noop_on_same_day() {
        let mut state = explicit_state();
        assert!(!state.rebase_window_to_filter_date());
    }

    #[test]
    fn test_transaction_type_change_clears_selection() {
        let mut state = explicit_state();
        state.select_transaction("/checkout");
        state.grow_table_limit();

        state.set_transaction_type("Background".to_string());
        assert_eq!(state.selected_transaction_name(), None);
        assert_eq!(state.table_limit(), INITIAL_TABLE_LIMIT);
    }

    #[test]
    fn test_select_transaction_keeps_pagination() {
        let mut state = explicit_state();
        state.grow_table_limit();
        state.select_transaction("/checkout");
        assert_eq!(state.selected_transaction_name(), Some("/checkout"));
        assert_eq!(state.table_limit(), 50);

        state.select_transaction("");
        assert_eq!(state.selected_transaction_name(), None);
    }

    #[test]
    fn test_sort_toggle() {
        let mut state = explicit_state();
        assert_eq!(state.sort_direction(), SortDirection::Desc);

        state.toggle_sort(SortAttribute::Total);
        assert_eq!(state.sort_direction(), SortDirection::Asc);

        // double-invocation restores the original direction
        state.toggle_sort(SortAttribute::Total);
        assert_eq!(state.sort_direction(), SortDirection::Desc);

        // a new attribute always starts descending
        state.toggle_sort(SortAttribute::Total);
        state.toggle_sort(SortAttribute::Average);
        assert_eq!(state.sort_attribute(), SortAttribute::Average);
        assert_eq!(state.sort_direction(), SortDirection::Desc);
    }

    #[test]
    fn test_series_query_reflects_selection() {
        let mut state = explicit_state();
        let query = state.series_query();
        assert_eq!(query.transaction_name, None);

        state.select_transaction("/checkout");
        let query = state.series_query();
        assert_eq!(query.transaction_name.as_deref(), Some("/checkout"));
        assert_eq!(query.from, state.window().from);
    }

    #[test]
    fn test_trace_query_widens_from_by_one_bucket() {
        let mut state = explicit_state();
        state.select_transaction("/checkout");
        let params = state.trace_query_params(interval());
        let from = params.iter().find(|(k, _)| k == "from").map(|(_, v)| v.clone());
        assert_eq!(
            from.as_deref(),
            Some((state.window().from - 300_000).to_string().as_str())
        );
        assert!(params
            .iter()
            .any(|(k, v)| k == "transactionNameComparator" && v == "equals"));
    }
}
