//! Backend query client for tracelens.
//!
//! This crate owns the fetch boundary: the [`QueryClient`] trait the
//! coordinator drives, the reqwest-backed [`HttpQueryClient`], the query
//! descriptions, and the fetch error taxonomy. Requests are never aborted
//! at the transport level; the coordinator suppresses stale completions
//! instead.

pub mod client;
pub mod error;
pub mod query;

pub use client::{HttpQueryClient, QueryClient};
pub use error::FetchError;
pub use query::{SeriesQuery, SummaryQuery};
