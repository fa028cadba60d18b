//! The fetch boundary: the [`QueryClient`] trait and its HTTP implementation.

use futures::future::BoxFuture;
use futures::FutureExt;

use tracelens_core::{DataSeries, SummaryPage};

use crate::error::FetchError;
use crate::query::{SeriesQuery, SummaryQuery};

/// Abstract fetch capability for the two backend endpoints.
///
/// Both fetches are cancellable-by-ignoring: implementations never abort
/// an in-flight request, and callers are expected to discard completions
/// that lost the generation race. There is no per-request timeout and no
/// retry; a failure is terminal for that request.
pub trait QueryClient: Send + Sync {
    /// Fetch the stacked chart series for a window.
    fn fetch_series(
        &self,
        query: &SeriesQuery,
    ) -> BoxFuture<'_, Result<Vec<DataSeries>, FetchError>>;

    /// Fetch one page of ranked per-transaction summaries.
    fn fetch_summaries(
        &self,
        query: &SummaryQuery,
    ) -> BoxFuture<'_, Result<SummaryPage, FetchError>>;
}

/// reqwest-backed client for the dashboard backend.
#[derive(Debug, Clone)]
pub struct HttpQueryClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpQueryClient {
    /// Create a client for the given backend base URL.
    ///
    /// No request timeout is configured: a stuck request is superseded by
    /// the next trigger's generation bump rather than aborted.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// The configured backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/backend/transaction/{}", self.base_url, endpoint);
        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| FetchError::Connectivity {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("GET {} returned {}", url, status);
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Connectivity {
                reason: e.to_string(),
            })?;
        let value = serde_json::from_str(&body)?;
        Ok(value)
    }
}

impl QueryClient for HttpQueryClient {
    fn fetch_series(
        &self,
        query: &SeriesQuery,
    ) -> BoxFuture<'_, Result<Vec<DataSeries>, FetchError>> {
        let params = query.params();
        log::debug!(
            "fetching series for [{}, {}] type={}",
            query.from,
            query.to,
            query.transaction_type
        );
        async move { self.get_json("stacked", &params).await }.boxed()
    }

    fn fetch_summaries(
        &self,
        query: &SummaryQuery,
    ) -> BoxFuture<'_, Result<SummaryPage, FetchError>> {
        let params = query.params();
        log::debug!(
            "fetching summaries for [{}, {}] limit={}",
            query.from,
            query.to,
            query.limit
        );
        async move { self.get_json("summaries", &params).await }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpQueryClient::new("http://localhost:4000/");
        assert_eq!(client.base_url(), "http://localhost:4000");
    }
}
