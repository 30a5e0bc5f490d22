use crate::api::query::{FilterMap, with_query};
use crate::error::ApiError;
use crate::storage::config::DEFAULT_TIMEOUT_SECS;
use crate::storage::token::TokenProvider;
use crate::utils::error_helpers::{
    convert_json_error, convert_request_error, convert_timeout_error, extract_error_message,
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("medidir/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over reqwest that attaches the bearer token and normalizes
/// every failure into [`ApiError`].
#[derive(Clone)]
pub struct DirectoryClient {
    client: Client,
    pub base_url: String,
    timeout_secs: u64,
    tokens: Arc<dyn TokenProvider>,
}

impl fmt::Debug for DirectoryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryClient")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl DirectoryClient {
    pub fn new(base_url: String, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, tokens, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(
        base_url: String,
        tokens: Arc<dyn TokenProvider>,
        timeout_secs: u64,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, "client_init", timeout_secs))?;

        Ok(DirectoryClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            tokens,
        })
    }

    pub fn token_provider(&self) -> Arc<dyn TokenProvider> {
        Arc::clone(&self.tokens)
    }

    /// Whether a token is currently available. Says nothing about its validity.
    pub fn has_token(&self) -> bool {
        self.current_token().is_some()
    }

    fn current_token(&self) -> Option<String> {
        match self.tokens.token() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Could not read session token: {}", e);
                None
            }
        }
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(token) = self.current_token() {
            request = request.bearer_auth(token);
        }

        request
    }

    /// GET `path` with `query` appended and decode the JSON body.
    pub async fn get_json<T>(&self, path: &str, query: &FilterMap) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let endpoint = with_query(path, query);
        log::debug!("GET {}", endpoint);

        let response = self
            .build_request(Method::GET, &endpoint)
            .send()
            .await
            .map_err(|e| convert_request_error(e, &endpoint, self.timeout_secs))?;

        self.handle_response(response, &endpoint).await
    }

    /// POST a JSON body to `path` and decode the JSON answer.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {}", path);

        let response = self
            .build_request(Method::POST, path)
            .json(body)
            .send()
            .await
            .map_err(|e| convert_request_error(e, path, self.timeout_secs))?;

        self.handle_response(response, path).await
    }

    pub async fn handle_response<T>(&self, response: Response, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| convert_json_error(e, status.as_u16(), endpoint));
        }

        let body = response.text().await.unwrap_or_default();
        let (message, payload) = extract_error_message(status.as_u16(), &body);
        log::debug!("{} failed with {}: {}", endpoint, status, message);

        match status.as_u16() {
            401 | 403 => Err(ApiError::Unauthorized {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                server_message: message,
                payload,
            }),
            408 | 504 => Err(convert_timeout_error(
                endpoint,
                status.as_u16(),
                self.timeout_secs,
                Some(message),
                payload,
            )),
            _ => Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message,
                payload,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::token::MemoryTokenStore;

    fn anonymous() -> Arc<dyn TokenProvider> {
        Arc::new(MemoryTokenStore::new())
    }

    #[test]
    fn test_client_creation() {
        let client = DirectoryClient::new("http://example.test/api".to_string(), anonymous());
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let client = DirectoryClient::new("http://example.test/api/".to_string(), anonymous())
            .expect("client creation failed");
        assert_eq!(client.base_url, "http://example.test/api");
    }

    #[test]
    fn test_build_request_without_token() {
        let client = DirectoryClient::new("http://example.test/api".to_string(), anonymous())
            .expect("client creation failed");
        assert!(!client.has_token());

        let built_request = client
            .build_request(Method::GET, "/doctors?page=0")
            .build()
            .expect("Failed to build request");

        assert_eq!(
            built_request.url().as_str(),
            "http://example.test/api/doctors?page=0"
        );
        assert_eq!(built_request.method(), Method::GET);
        assert!(built_request.headers().get("authorization").is_none());
    }

    #[test]
    fn test_build_request_reads_token_on_every_call() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let client = DirectoryClient::new("http://example.test/api".to_string(), tokens.clone())
            .expect("client creation failed");

        tokens.store("jwt-123").unwrap();
        let built_request = client
            .build_request(Method::GET, "/users/me")
            .build()
            .expect("Failed to build request");
        assert_eq!(
            built_request
                .headers()
                .get("authorization")
                .unwrap()
                .to_str()
                .unwrap(),
            "Bearer jwt-123"
        );

        tokens.clear().unwrap();
        let built_request = client
            .build_request(Method::GET, "/users/me")
            .build()
            .expect("Failed to build request");
        assert!(built_request.headers().get("authorization").is_none());
    }
}
