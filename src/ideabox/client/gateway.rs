//! Client Data Gateway: typed calls onto the ideabox HTTP API.

use crate::error::{IdeaError, Result};
use crate::model::{Idea, IdeaDraft};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

/// The typed operations the reconciler depends on.
#[async_trait]
pub trait IdeaGateway: Send + Sync {
    async fn get_all_ideas(&self) -> Result<Vec<Idea>>;
    async fn create_idea(&self, draft: &IdeaDraft) -> Result<Idea>;
    async fn update_idea(&self, id: &str, draft: &IdeaDraft) -> Result<Idea>;
    async fn delete_idea(&self, id: &str) -> Result<()>;
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 204 No Content; the body is never read.
    Empty,
    Json(serde_json::Value),
    Text(String),
}

impl Payload {
    /// Decode into `T`. An empty payload decodes like `{}`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        let value = match self {
            Payload::Empty => serde_json::Value::Object(serde_json::Map::new()),
            Payload::Json(value) => value,
            Payload::Text(text) => serde_json::from_str(&text)?,
        };
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    /// Merged over the default `Content-Type: application/json`.
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: HeaderMap::new(),
        }
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_json<T: serde::Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/api{}", self.base_url, endpoint)
    }

    /// Issue one request against `<base>/api<endpoint>`.
    ///
    /// Non-success statuses become [`IdeaError::Transport`]; the body is read
    /// first (best effort) so it can be logged.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Payload> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(options.headers);

        let mut request = self
            .http
            .request(options.method.clone(), self.url(endpoint))
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(|err| {
            error!(endpoint, error = %err, "API request failed");
            IdeaError::Request(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(endpoint, status = status.as_u16(), body = %body, "API error");
            return Err(IdeaError::Transport {
                status: status.as_u16(),
            });
        }
        debug!(endpoint, method = %options.method, status = status.as_u16(), "API response");

        if status == StatusCode::NO_CONTENT {
            return Ok(Payload::Empty);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        if is_json {
            Ok(Payload::Json(response.json().await?))
        } else {
            Ok(Payload::Text(response.text().await?))
        }
    }

    pub async fn health_check(&self) -> Result<HealthStatus> {
        self.request("/health", RequestOptions::default())
            .await?
            .decode()
    }
}

#[async_trait]
impl IdeaGateway for ApiClient {
    async fn get_all_ideas(&self) -> Result<Vec<Idea>> {
        self.request("/ideas", RequestOptions::default())
            .await?
            .decode()
    }

    async fn create_idea(&self, draft: &IdeaDraft) -> Result<Idea> {
        let options = RequestOptions::new(Method::POST).with_json(draft)?;
        self.request("/ideas", options).await?.decode()
    }

    async fn update_idea(&self, id: &str, draft: &IdeaDraft) -> Result<Idea> {
        let options = RequestOptions::new(Method::PUT).with_json(draft)?;
        self.request(&format!("/ideas/{}", id), options)
            .await?
            .decode()
    }

    async fn delete_idea(&self, id: &str) -> Result<()> {
        self.request(&format!("/ideas/{}", id), RequestOptions::new(Method::DELETE))
            .await?;
        Ok(())
    }
}
