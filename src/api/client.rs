//! HTTP client for the fund's REST API.
//!
//! `FundApi` is the seam the rest of the app talks to; `HttpFundApi` is the
//! reqwest-backed implementation. Every call takes the caller's `Session`
//! so credentials are passed in explicitly rather than read from globals.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::types::{Dataset, ListResponse, Resource};
use crate::core::session::Session;

/// Errors from talking to the fund API.
#[derive(Debug)]
pub enum ApiError {
    /// Client misconfigured (bad base URL). Not retryable.
    Config(String),
    /// Timeout, DNS, connection refused. Retryable.
    Network(String),
    /// Server answered with a non-success status.
    Api { status: u16, message: String },
    /// Body did not match the expected shape.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[async_trait]
pub trait FundApi: Send + Sync {
    /// List every record of a resource.
    async fn fetch(&self, resource: Resource, session: &Session) -> Result<Dataset, ApiError>;

    async fn delete(&self, resource: Resource, id: i64, session: &Session) -> Result<(), ApiError>;

    /// Change a family's or member's status (`active` / `inactive`).
    async fn set_status(
        &self,
        resource: Resource,
        id: i64,
        status: &str,
        session: &Session,
    ) -> Result<(), ApiError>;

    /// Open the dues register for a month (`YYYY-MM`).
    async fn open_register(&self, month: &str, session: &Session) -> Result<(), ApiError>;
}

pub struct HttpFundApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFundApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!("base URL must be http(s): {base_url}")));
        }
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorize(&self, req: reqwest::RequestBuilder, session: &Session) -> reqwest::RequestBuilder {
        match session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("Fund API response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Fund API error: {} - {}", status, message);
            return Err(ApiError::Api { status, message });
        }
        Ok(response)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        resource: Resource,
        session: &Session,
    ) -> Result<Vec<T>, ApiError> {
        let req = self.authorize(self.client.get(self.url(resource.path())), session);
        let body = self
            .send(req)
            .await?
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let list: ListResponse<T> =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(list.into_vec())
    }
}

#[async_trait]
impl FundApi for HttpFundApi {
    async fn fetch(&self, resource: Resource, session: &Session) -> Result<Dataset, ApiError> {
        info!("Fetching {} from {}", resource, self.base_url);
        let dataset = match resource {
            Resource::Families => Dataset::Families(self.list(resource, session).await?),
            Resource::Members => Dataset::Members(self.list(resource, session).await?),
            Resource::Registers => Dataset::Registers(self.list(resource, session).await?),
            Resource::Supports => Dataset::Supports(self.list(resource, session).await?),
        };
        info!("Fetched {} {}", dataset.len(), resource);
        Ok(dataset)
    }

    async fn delete(&self, resource: Resource, id: i64, session: &Session) -> Result<(), ApiError> {
        info!("Deleting {} {}", resource, id);
        let req = self.client.delete(self.url(&format!("{}/{id}", resource.path())));
        self.send(self.authorize(req, session)).await?;
        Ok(())
    }

    async fn set_status(
        &self,
        resource: Resource,
        id: i64,
        status: &str,
        session: &Session,
    ) -> Result<(), ApiError> {
        info!("Setting {} {} status to {}", resource, id, status);
        let req = self
            .client
            .patch(self.url(&format!("{}/{id}", resource.path())))
            .json(&json!({ "status": status }));
        self.send(self.authorize(req, session)).await?;
        Ok(())
    }

    async fn open_register(&self, month: &str, session: &Session) -> Result<(), ApiError> {
        info!("Opening register for {}", month);
        let req = self
            .client
            .post(self.url(Resource::Registers.path()))
            .json(&json!({ "month": month }));
        self.send(self.authorize(req, session)).await?;
        Ok(())
    }
}
