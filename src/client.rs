//! HTTP client adapter for the condominium REST API.
//!
//! Every backend call goes through the [`Transport`] trait so services can be exercised
//! against a mock or an in-memory fake. [`HttpTransport`] is the [`reqwest`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    config::BackendConfig,
    error::{AppError, AppResult},
};

/// Outbound calls to the backend. Paths are relative to the configured base URL and keep
/// the backend's trailing-slash convention (`visitantes/12/`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> AppResult<Value>;

    async fn post(&self, path: &str, body: Option<Value>) -> AppResult<Value>;

    async fn put(&self, path: &str, body: Value) -> AppResult<Value>;

    async fn delete(&self, path: &str) -> AppResult<()>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing [`reqwest::Client`]
    pub fn with_client(client: reqwest::Client, config: &BackendConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_token: config.api_token.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Turn a backend response into its JSON body. An empty body yields `Value::Null`;
    /// a non-2xx status becomes [`AppError::Api`] carrying whatever the backend explained.
    async fn parse_response(response: reqwest::Response) -> AppResult<Value> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!("Backend answered {} : {}", status, body);
            return Err(AppError::from_api_response(status.as_u16(), &body));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> AppResult<Value> {
        let url = self.url(path);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .authorize(self.client.get(&url).query(query))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> AppResult<Value> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = self.authorize(request).send().await?;
        Self::parse_response(response).await
    }

    async fn put(&self, path: &str, body: Value) -> AppResult<Value> {
        let url = self.url(path);
        tracing::debug!("PUT {}", url);

        let response = self
            .authorize(self.client.put(&url).json(&body))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let url = self.url(path);
        tracing::debug!("DELETE {}", url);

        let response = self.authorize(self.client.delete(&url)).send().await?;
        Self::parse_response(response).await?;
        Ok(())
    }
}

/// Join a base URL and a relative resource path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
