//! List data source: one query in, one page out.

mod envelope;

pub use envelope::Normalized;
pub use envelope::ShapeWarning;
pub use envelope::normalize;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::FinteraClient;
use crate::collection::Collection;
use crate::error::FetchError;
use crate::query::PageResult;
use crate::query::QueryState;

/// Fetches pages of one REST collection.
///
/// A data source is stateless: it turns a [`QueryState`] into a single
/// authenticated `GET`, normalizes the response envelope and hands the page
/// back. It never retries and never mutates the caller's state; the owning
/// [`ListController`](crate::controller::ListController) decides what to do
/// with the result.
///
/// # Example
///
/// ```ignore
/// use fintera_lib::query::QueryState;
/// use fintera_lib::source::ListDataSource;
///
/// let source: ListDataSource = ListDataSource::new(client, "contracts")?
///     .with_entity_key("contracts");
///
/// let page = source.fetch(&QueryState::new(20).with_filter("status", "paid")).await?;
/// println!("page {} of {}", page.current_page(), page.total_pages());
/// ```
pub struct ListDataSource<T = Value> {
    client: FinteraClient,
    endpoint: String,
    entity_key: Option<String>,
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for ListDataSource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            entity_key: self.entity_key.clone(),
            _item: PhantomData,
        }
    }
}

impl<T> ListDataSource<T> {
    /// Creates a data source for the collection at `endpoint`.
    ///
    /// Fails with [`FetchError::InvalidUrl`] when the endpoint is empty or
    /// does not form a valid URL with the client's base URL.
    pub fn new(client: FinteraClient, endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let endpoint = endpoint.into();
        client.endpoint_url(&endpoint)?;
        Ok(Self {
            client,
            endpoint,
            entity_key: None,
            _item: PhantomData,
        })
    }

    /// Creates a data source for one of Fintera's collections, with its
    /// endpoint and entity key preset.
    pub fn for_collection(client: FinteraClient, collection: Collection) -> Result<Self, FetchError> {
        Ok(Self::new(client, collection.endpoint())?.with_entity_key(collection.entity_key()))
    }

    /// Sets the key under which the backend returns the item array.
    pub fn with_entity_key(mut self, key: impl Into<String>) -> Self {
        self.entity_key = Some(key.into());
        self
    }

    /// Returns the endpoint path.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the entity key, if set.
    pub fn entity_key(&self) -> Option<&str> {
        self.entity_key.as_deref()
    }

    /// Builds the request URL for `query`.
    pub fn request_url(&self, query: &QueryState) -> Result<Url, FetchError> {
        let mut url = self.client.endpoint_url(&self.endpoint)?;
        url.set_query(Some(&query.to_query_string()));
        Ok(url)
    }
}

impl<T: DeserializeOwned> ListDataSource<T> {
    /// Fetches the page described by `query`.
    pub async fn fetch(&self, query: &QueryState) -> Result<PageResult<T>, FetchError> {
        let url = self.request_url(query)?;
        log::debug!("GET {}", url);

        let body = self.client.get_json(&url).await.inspect_err(|e| {
            log::warn!("fetch of {} failed: {}", self.endpoint, e);
        })?;

        let Normalized { page, warnings } = normalize(body, self.entity_key(), query.page());
        for warning in &warnings {
            match warning {
                ShapeWarning::MissingPagination => {
                    log::debug!("{}: {}", self.endpoint, warning);
                }
                _ => log::warn!("{}: {}", self.endpoint, warning),
            }
        }

        page.try_map(|item| {
            serde_json::from_value(item).map_err(|e| FetchError::parse(format!("invalid item: {}", e)))
        })
    }

    /// Fetches the page described by `query`, resolving to
    /// [`FetchError::Cancelled`] as soon as `cancel` fires.
    ///
    /// Cancelling drops the in-flight request.
    pub async fn fetch_cancellable(
        &self,
        query: &QueryState,
        cancel: &CancellationToken,
    ) -> Result<PageResult<T>, FetchError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = self.fetch(query) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;
    use crate::query::SortState;

    fn client() -> FinteraClient {
        FinteraClient::builder()
            .url("https://fintera.example.com/api")
            .token_provider(StaticTokenProvider::new("token"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_request_url() {
        let source: ListDataSource = ListDataSource::new(client(), "payments").unwrap();
        let mut query = QueryState::new(20)
            .with_filter("status", "paid")
            .with_sort(SortState::parse("due_date-desc"));
        query.set_page(2);

        assert_eq!(
            source.request_url(&query).unwrap().as_str(),
            "https://fintera.example.com/api/payments?status=paid&sort=due_date-desc&page=2&per_page=20"
        );
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let result: Result<ListDataSource, _> = ListDataSource::new(client(), "");
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_for_collection() {
        let source: ListDataSource = ListDataSource::for_collection(client(), Collection::AuditLogs).unwrap();
        assert_eq!(source.endpoint(), "audit-logs");
        assert_eq!(source.entity_key(), Some("audit_logs"));
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let source: ListDataSource = ListDataSource::new(client(), "contracts").unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = source.fetch_cancellable(&QueryState::new(20), &cancel).await;
        assert!(matches!(result, Err(FetchError::Cancelled)));
    }
}
