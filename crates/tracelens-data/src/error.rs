//! Fetch error taxonomy.

use thiserror::Error;

/// Errors surfaced by [`QueryClient`](crate::QueryClient) fetches.
///
/// Staleness is not represented here: a response that lost the generation
/// race is discarded by the caller before it ever inspects the payload.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request produced no HTTP response at all.
    #[error("unable to connect to backend: {reason}")]
    Connectivity { reason: String },

    /// The backend responded with a failure status.
    #[error("backend returned status {status}")]
    Status { status: u16 },

    /// The response body did not match the expected payload shape.
    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// The message shown to the user in place of the affected view.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Connectivity { .. } => "Unable to connect to server",
            FetchError::Status { .. } | FetchError::Decode(_) => "An error occurred",
        }
    }

    /// True for transport-level failures with no response.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, FetchError::Connectivity { .. })
    }
}
