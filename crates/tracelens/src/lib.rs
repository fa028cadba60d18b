//! Race-safe refresh coordination for a dual-view transaction dashboard.
//!
//! The dashboard shows a stacked time-series chart next to a ranked
//! per-transaction table, both over a sliding, user-adjustable time
//! window. This crate owns the hard part of that page: driving the two
//! correlated backend fetches per user trigger, guaranteeing that only
//! the most-recently-issued request's response is ever applied, coalescing
//! rapid zoom gestures, and keeping the view state synchronized with a
//! shareable location encoding.
//!
//! Rendering, tooltips, and dialogs are collaborators behind the traits
//! in [`sinks`]; the HTTP transport sits behind
//! [`QueryClient`](tracelens_data::QueryClient).

pub mod coordinator;
pub mod debounce;
pub mod events;
pub mod generation;
pub mod location;
pub mod sinks;
pub mod table;
pub mod view;

pub use coordinator::{
    RefreshCoordinator, RefreshError, RefreshOutcome, RefreshSettings, RefreshTrigger,
};
pub use debounce::ZoomDebouncer;
pub use events::UserEvent;
pub use generation::{Generation, GenerationGuard};
pub use location::{LocationStore, MemoryLocation};
pub use sinks::{ChartSink, DialogHost, TableSink};
pub use table::TableRefresher;
pub use view::{SharedViewState, ViewState, INITIAL_TABLE_LIMIT};
