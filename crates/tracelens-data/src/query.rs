//! Backend query descriptions.

use tracelens_core::{SortAttribute, SortDirection};

/// Query for the stacked series endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    pub from: i64,
    pub to: i64,
    pub transaction_type: String,
    /// Focus a single transaction name; `None` aggregates across all names.
    pub transaction_name: Option<String>,
}

impl SeriesQuery {
    /// Key/value pairs for the query string. The name key is omitted when
    /// no single transaction is selected.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("from", self.from.to_string()),
            ("to", self.to.to_string()),
            ("transactionType", self.transaction_type.clone()),
        ];
        if let Some(name) = &self.transaction_name {
            params.push(("transactionName", name.clone()));
        }
        params
    }
}

/// Query for the ranked summaries endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryQuery {
    pub from: i64,
    pub to: i64,
    pub transaction_type: String,
    pub sort_attribute: SortAttribute,
    pub sort_direction: SortDirection,
    pub limit: u32,
}

impl SummaryQuery {
    /// Key/value pairs for the query string.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("from", self.from.to_string()),
            ("to", self.to.to_string()),
            ("transactionType", self.transaction_type.clone()),
            ("sortAttribute", self.sort_attribute.as_str().to_string()),
            ("sortDirection", self.sort_direction.as_str().to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}
