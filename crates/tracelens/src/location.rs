//! Bidirectional mapping between view state and the shareable location.
//!
//! The location is a flat string key/value map (a query string, a router
//! state). Only parameters that differ from their defaults are written, so
//! a pristine view produces an empty encoding and the inverse parse falls
//! back to the same computed defaults.

use std::sync::Mutex;

use tracelens_core::{AggregateInterval, SortAttribute, SortDirection};

use crate::view::ViewState;

const KEY_FROM: &str = "from";
const KEY_TO: &str = "to";
const KEY_TRANSACTION_TYPE: &str = "transaction-type";
const KEY_TRANSACTION_NAME: &str = "transaction-name";
const KEY_SORT_ATTRIBUTE: &str = "sort-attribute";
const KEY_SORT_DIRECTION: &str = "sort-direction";

/// The external location store: an address bar, a router, or a recorder.
pub trait LocationStore: Send + Sync {
    /// Replace the current parameters wholesale.
    fn replace(&self, params: Vec<(String, String)>);

    /// Read the current parameters.
    fn current(&self) -> Vec<(String, String)>;
}

/// Encode the non-default subset of `state` into location parameters.
///
/// Rules:
/// - the window is omitted entirely while it is the derived default;
///   otherwise `from` and `to` are always written together, with `from`
///   widened back by one aggregation bucket (the inverse of the parse
///   shift)
/// - `transaction-type` is omitted when equal to the configured default
/// - `transaction-name` is omitted when nothing is focused
/// - sort keys are omitted for the default `(total, desc)`; when written,
///   `sort-direction` is still omitted while the direction is `desc`
pub fn encode(
    state: &ViewState,
    interval: AggregateInterval,
    default_transaction_type: &str,
) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if !state.using_default_window() {
        let window = state.window();
        params.push((
            KEY_FROM.to_string(),
            (window.from - interval.millis()).to_string(),
        ));
        params.push((KEY_TO.to_string(), window.to.to_string()));
    }
    if state.transaction_type() != default_transaction_type {
        params.push((
            KEY_TRANSACTION_TYPE.to_string(),
            state.transaction_type().to_string(),
        ));
    }
    if let Some(name) = state.selected_transaction_name() {
        params.push((KEY_TRANSACTION_NAME.to_string(), name.to_string()));
    }
    if state.sort_attribute() != SortAttribute::Total
        || state.sort_direction() != SortDirection::Desc
    {
        params.push((
            KEY_SORT_ATTRIBUTE.to_string(),
            state.sort_attribute().as_str().to_string(),
        ));
        if state.sort_direction() != SortDirection::Desc {
            params.push((
                KEY_SORT_DIRECTION.to_string(),
                state.sort_direction().as_str().to_string(),
            ));
        }
    }
    params
}

/// Rebuild view state from location parameters.
///
/// Absent keys fall back to computed defaults: the window derives from
/// `now`, the transaction type from configuration, the sort from
/// `(total, desc)`. Window bounds only take effect when both are present
/// and parse.
pub fn decode(
    params: &[(String, String)],
    interval: AggregateInterval,
    default_transaction_type: &str,
    now: i64,
) -> ViewState {
    let get = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    let transaction_type = get(KEY_TRANSACTION_TYPE)
        .unwrap_or(default_transaction_type)
        .to_string();

    let from = get(KEY_FROM).and_then(|v| v.parse::<i64>().ok());
    let to = get(KEY_TO).and_then(|v| v.parse::<i64>().ok());
    let mut state = match (from, to) {
        (Some(from), Some(to)) => {
            ViewState::with_explicit_window(from, to, interval, transaction_type)
        }
        _ => ViewState::with_default_window(now, interval, transaction_type),
    };

    if let Some(name) = get(KEY_TRANSACTION_NAME) {
        state.select_transaction(name);
    }

    let attribute = get(KEY_SORT_ATTRIBUTE)
        .and_then(SortAttribute::from_param)
        .unwrap_or_default();
    let direction = get(KEY_SORT_DIRECTION)
        .and_then(SortDirection::from_param)
        .unwrap_or_default();
    state.set_sort(attribute, direction);

    state
}

/// Encode `state` and push it into the store.
pub fn persist(
    store: &dyn LocationStore,
    state: &ViewState,
    interval: AggregateInterval,
    default_transaction_type: &str,
) {
    store.replace(encode(state, interval, default_transaction_type));
}

/// In-memory location store for embedding, demos, and tests.
#[derive(Debug, Default)]
pub struct MemoryLocation {
    params: Mutex<Vec<(String, String)>>,
}

impl MemoryLocation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocationStore for MemoryLocation {
    fn replace(&self, params: Vec<(String, String)>) {
        *self.params.lock().unwrap() = params;
    }

    fn current(&self) -> Vec<(String, String)> {
        self.params.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracelens_core::DAY_MS;

    const DAY: i64 = 19_800 * DAY_MS;
    const NOW: i64 = DAY + 11 * 60 * 60 * 1000;

    fn interval() -> AggregateInterval {
        AggregateInterval::from_secs(300)
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn round_trip(params: Vec<(String, String)>) -> Vec<(String, String)> {
        let state = decode(&params, interval(), "Web", NOW);
        encode(&state, interval(), "Web")
    }

    #[test]
    fn test_empty_location_round_trips_empty() {
        assert_eq!(round_trip(Vec::new()), Vec::new());
    }

    #[test]
    fn test_explicit_window_round_trips() {
        let params = pairs(&[("from", "1000"), ("to", "2000")]);
        let state = decode(&params, interval(), "Web", NOW);
        // raw bound shifted forward one bucket for display
        assert_eq!(state.window().from, 301_000);
        // the encode shifts it back
        assert_eq!(round_trip(params.clone()), params);
    }

    #[test]
    fn test_minimal_subsets_round_trip() {
        for params in [
            pairs(&[("transaction-type", "Background")]),
            pairs(&[("transaction-name", "/checkout")]),
            pairs(&[("sort-attribute", "average")]),
            pairs(&[("sort-attribute", "total"), ("sort-direction", "asc")]),
            pairs(&[
                ("from", "1000"),
                ("to", "2000"),
                ("transaction-type", "Background"),
                ("transaction-name", "/checkout"),
                ("sort-attribute", "count"),
                ("sort-direction", "asc"),
            ]),
        ] {
            assert_eq!(round_trip(params.clone()), params);
        }
    }

    #[test]
    fn test_default_values_are_omitted() {
        let params = pairs(&[
            ("transaction-type", "Web"),
            ("sort-attribute", "total"),
            ("sort-direction", "desc"),
        ]);
        assert_eq!(round_trip(params), Vec::new());
    }

    #[test]
    fn test_direction_omitted_when_desc_even_with_nondefault_attribute() {
        let params = pairs(&[("sort-attribute", "average"), ("sort-direction", "desc")]);
        assert_eq!(round_trip(params), pairs(&[("sort-attribute", "average")]));
    }

    #[test]
    fn test_lone_window_bound_is_ignored() {
        let params = pairs(&[("from", "1000")]);
        let state = decode(&params, interval(), "Web", NOW);
        assert!(state.using_default_window());
        assert_eq!(encode(&state, interval(), "Web"), Vec::new());
    }

    #[test]
    fn test_unparseable_bounds_fall_back_to_default() {
        let params = pairs(&[("from", "yesterday"), ("to", "2000")]);
        let state = decode(&params, interval(), "Web", NOW);
        assert!(state.using_default_window());
    }

    #[test]
    fn test_memory_location_replaces_wholesale() {
        let store = MemoryLocation::new();
        store.replace(pairs(&[("from", "1"), ("to", "2")]));
        store.replace(pairs(&[("transaction-name", "/a")]));
        assert_eq!(store.current(), pairs(&[("transaction-name", "/a")]));
    }
}
