//! Backend API transport.
//!
//! `CaseSource` is the seam between the data layer and the network: the
//! series builder and the world orchestrator only ever see the trait, so
//! tests can substitute an in-memory source. Methods return boxed futures
//! for dyn-compatibility.

use std::future::Future;
use std::pin::Pin;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use model::{DataPoint, DateSpan, Place, PlaceTree};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A source of case data.
///
/// Returns `Ok(None)` where the backend has no data for the key (HTTP 404);
/// `Err` only for transport and server failures.
pub trait CaseSource: Send + Sync {
    /// Counters for a single day, optionally scoped to one country.
    fn point(
        &self,
        date: NaiveDate,
        place: &Place,
    ) -> BoxFuture<'_, Result<Option<DataPoint>, ApiError>>;

    /// Aggregate counters over an inclusive date range.
    fn range_totals(
        &self,
        span: DateSpan,
        place: &Place,
    ) -> BoxFuture<'_, Result<Option<DataPoint>, ApiError>>;

    /// The hierarchical place listing.
    fn places(&self) -> BoxFuture<'_, Result<PlaceTree, ApiError>>;
}

#[derive(Debug, Deserialize)]
struct SimpleMessage {
    message: String,
}

/// HTTP client for the case-data backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Health check against `/hello`.
    pub async fn ping(&self) -> Result<String, ApiError> {
        let url = format!("{}/hello", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ApiError::transport)?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                status: resp.status().as_u16(),
            });
        }
        let body: SimpleMessage = resp.json().await.map_err(ApiError::transport)?;
        Ok(body.message)
    }

    async fn fetch_data(
        &self,
        query: Vec<(&'static str, String)>,
    ) -> Result<Option<DataPoint>, ApiError> {
        let url = format!("{}/filter/data", self.base_url);
        debug!(?query, "fetching case data");

        let resp = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(ApiError::transport)?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                status: resp.status().as_u16(),
            });
        }

        let point: DataPoint = resp.json().await.map_err(ApiError::transport)?;
        Ok(Some(point))
    }
}

impl CaseSource for ApiClient {
    fn point(
        &self,
        date: NaiveDate,
        place: &Place,
    ) -> BoxFuture<'_, Result<Option<DataPoint>, ApiError>> {
        let mut query = vec![("date", date.to_string())];
        if let Some(country) = place.country() {
            query.push(("country", country.to_string()));
        }
        Box::pin(self.fetch_data(query))
    }

    fn range_totals(
        &self,
        span: DateSpan,
        place: &Place,
    ) -> BoxFuture<'_, Result<Option<DataPoint>, ApiError>> {
        let mut query = vec![
            ("start_date", span.start.to_string()),
            ("end_date", span.end.to_string()),
        ];
        if let Some(country) = place.country() {
            query.push(("country", country.to_string()));
        }
        Box::pin(self.fetch_data(query))
    }

    fn places(&self) -> BoxFuture<'_, Result<PlaceTree, ApiError>> {
        Box::pin(async move {
            let url = format!("{}/filter/places", self.base_url);
            let resp = self
                .http
                .get(&url)
                .send()
                .await
                .map_err(ApiError::transport)?;
            if !resp.status().is_success() {
                return Err(ApiError::Status {
                    status: resp.status().as_u16(),
                });
            }
            resp.json::<PlaceTree>().await.map_err(ApiError::transport)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ApiClient;
    use crate::config::ApiConfig;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new(&ApiConfig::new("http://localhost:8000/"));
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
