//! reqwest-backed Hospital Directory client

use super::client::{ClientFactory, CreatedHospital, DirectoryClient, NewHospital};
use super::error::RemoteError;
use crate::config::UpstreamConfig;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Hospital Directory API client over HTTP
pub struct HttpDirectoryClient {
    client: Client,
    base_url: String,
}

impl HttpDirectoryClient {
    /// Create a client with its own connection pool
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs_f64(config.timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn error_from(response: Response) -> RemoteError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        RemoteError::from_response_body(status, &body)
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn create_hospital(
        &self,
        hospital: &NewHospital,
    ) -> std::result::Result<CreatedHospital, RemoteError> {
        let response = self
            .client
            .post(self.endpoint("/hospitals/"))
            .json(hospital)
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(Self::error_from(response).await);
        }

        // An unreadable 2xx body fails the row even though the hospital may
        // exist upstream; a resume of that row can then create a duplicate.
        let body = response.json::<serde_json::Value>().await.map_err(|e| {
            RemoteError::new(
                status.as_u16(),
                Some(format!("Invalid JSON in response: {}", e)),
            )
        })?;

        let created = CreatedHospital::from_body(body);
        debug!(hospital_id = ?created.id, "Created hospital");
        Ok(created)
    }

    async fn activate_batch(
        &self,
        batch_id: Uuid,
    ) -> std::result::Result<Option<serde_json::Value>, RemoteError> {
        let response = self
            .client
            .patch(self.endpoint(&format!("/hospitals/batch/{}/activate", batch_id)))
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(Self::error_from(response).await);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        if !is_json || bytes.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            RemoteError::new(
                status.as_u16(),
                Some(format!("Invalid JSON in response: {}", e)),
            )
        })
    }
}

/// Builds a fresh [`HttpDirectoryClient`] per processing call
#[derive(Debug, Clone)]
pub struct HttpClientFactory {
    config: UpstreamConfig,
}

impl HttpClientFactory {
    pub fn new(config: UpstreamConfig) -> Self {
        Self { config }
    }
}

impl ClientFactory for HttpClientFactory {
    fn acquire(&self) -> Result<Box<dyn DirectoryClient>> {
        Ok(Box::new(HttpDirectoryClient::new(&self.config)?))
    }
}
