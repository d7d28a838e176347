//! Main FinteraClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde_json::Value;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::FetchError;

/// Authenticated HTTP client for the Fintera REST backend.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely. The session credential is never looked up globally:
/// it comes from the [`TokenProvider`] handed to the builder.
///
/// # Example
///
/// ```ignore
/// use fintera_lib::{FinteraClient, auth::StaticTokenProvider};
///
/// let client = FinteraClient::builder()
///     .url("https://fintera.example.com/api")
///     .token_provider(StaticTokenProvider::new("my-token"))
///     .build()?;
/// ```
#[derive(Clone)]
pub struct FinteraClient {
    inner: Arc<FinteraClientInner>,
}

struct FinteraClientInner {
    base_url: String,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl FinteraClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> FinteraClientBuilder<Missing, Missing> {
        FinteraClientBuilder::new()
    }

    /// Returns the base URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Builds the absolute URL of a collection endpoint.
    ///
    /// Leading and trailing slashes on `path` are ignored; an empty path is
    /// rejected.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, FetchError> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Err(FetchError::InvalidUrl("empty endpoint path".to_string()));
        }
        let raw = format!("{}/{}", self.inner.base_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Issues an authenticated `GET` and parses the body as JSON.
    ///
    /// Non-2xx statuses, transport failures and unparseable bodies all come
    /// back as a [`FetchError`]. Nothing is retried.
    pub async fn get_json(&self, url: &Url) -> Result<Value, FetchError> {
        let token = self.inner.token_provider.get_token().await?;

        let mut request = self
            .inner
            .http_client
            .get(url.clone())
            .headers(default_headers())
            .bearer_auth(&token.access_token);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            };
            return Err(FetchError::http(status.as_u16(), message));
        }

        let parsed = serde_json::from_str::<Value>(&body);
        parsed.map_err(|e| FetchError::parse_with_body(e.to_string(), body))
    }

    fn transport_error(&self, error: reqwest::Error) -> FetchError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => FetchError::Timeout(timeout),
            _ => FetchError::Network(error),
        }
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`FinteraClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The backend base URL (collection paths are appended to it)
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct FinteraClientBuilder<U, P> {
    url: U,
    token_provider: P,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl FinteraClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for FinteraClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> FinteraClientBuilder<Missing, P> {
    /// Sets the backend base URL.
    pub fn url(self, url: impl Into<String>) -> FinteraClientBuilder<Set<String>, P> {
        FinteraClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> FinteraClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> FinteraClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        FinteraClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> FinteraClientBuilder<U, P> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl FinteraClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`FinteraClient`].
    ///
    /// This method is only available when both `url` and `token_provider` have been set.
    pub fn build(self) -> Result<FinteraClient, FetchError> {
        Url::parse(&self.url.0)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.url.0, e)))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(FinteraClient {
            inner: Arc::new(FinteraClientInner {
                base_url: self.url.0,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;

    fn client(url: &str) -> FinteraClient {
        FinteraClient::builder()
            .url(url)
            .token_provider(StaticTokenProvider::new("token"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_endpoint_url() {
        let client = client("https://fintera.example.com/api/");
        assert_eq!(
            client.endpoint_url("/contracts").unwrap().as_str(),
            "https://fintera.example.com/api/contracts"
        );
        assert_eq!(
            client.endpoint_url("audit-logs/").unwrap().as_str(),
            "https://fintera.example.com/api/audit-logs"
        );
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let client = client("https://fintera.example.com/api");
        assert!(matches!(client.endpoint_url(""), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(client.endpoint_url("//"), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = FinteraClient::builder()
            .url("not a url")
            .token_provider(StaticTokenProvider::new("token"))
            .build();
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}
