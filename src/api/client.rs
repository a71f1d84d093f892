//! AI-Hub API HTTP client.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

use crate::api::config::ClientConfig;
use crate::api::endpoints::Endpoints;
use crate::api::types::ApiPayload;
use crate::config::validate_dataset_key;
use crate::download::{pipeline, DownloadRequest, DownloadResult};
use crate::error::{Error, Result};

/// Authenticated client for the AI-Hub API.
///
/// One instance owns one connection pool. Use separate instances for
/// independent concurrent sessions.
#[derive(Debug)]
pub struct AihubClient {
    client: Client,
    config: ClientConfig,
    endpoints: Endpoints,
}

impl AihubClient {
    /// Create a client. Fails before any network activity when the API key is missing.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingConfig(
                "api_key (set AIHUB_API_KEY or pass --api-key)".to_string(),
            ));
        }

        let endpoints = Endpoints::new(&config.base_url)?;
        let client = config.build_http_client()?;

        Ok(Self {
            client,
            config,
            endpoints,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Make an authenticated request bounded by the configured timeout.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Response> {
        tracing::debug!("{} {}", method, url);

        let builder = self
            .client
            .request(method, url)
            .query(query)
            .timeout(self.config.timeout);

        self.send(builder).await
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        match status {
            StatusCode::OK => Ok(response),
            StatusCode::UNAUTHORIZED => Err(Error::Authentication("API key invalid".to_string())),
            StatusCode::FORBIDDEN => Err(Error::Authentication(
                "no access to this resource".to_string(),
            )),
            other => Err(Error::HttpStatus {
                status: other.as_u16(),
            }),
        }
    }

    /// Classify a transport-level failure.
    pub(crate) fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                seconds: self.config.timeout.as_secs(),
            }
        } else if err.is_connect() {
            tracing::debug!("Connection error: {}", err);
            Error::ConnectionFailed
        } else {
            Error::Api(format!("request error: {}", err))
        }
    }

    /// GET a query endpoint and parse its body.
    async fn query(&self, url: &str) -> Result<ApiPayload> {
        let response = self.request(Method::GET, url, &[]).await?;
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        Ok(ApiPayload::from_body(body))
    }

    /// Check whether the configured key is accepted. Never fails.
    pub async fn validate_api_key(&self) -> bool {
        match self.request(Method::GET, self.endpoints.validate(), &[]).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("API key validation failed: {}", e);
                false
            }
        }
    }

    /// List all datasets.
    pub async fn list_datasets(&self) -> Result<ApiPayload> {
        self.query(self.endpoints.datasets()).await
    }

    /// Get the file tree of one dataset.
    pub async fn get_dataset_info(&self, dataset_key: &str) -> Result<ApiPayload> {
        validate_dataset_key(dataset_key)?;
        self.query(&self.endpoints.filetree(dataset_key)).await
    }

    /// Get the API usage manual.
    pub async fn get_api_manual(&self) -> Result<ApiPayload> {
        self.query(self.endpoints.manual()).await
    }

    /// Open the archive stream for a dataset.
    ///
    /// No whole-request deadline is applied, only the idle read timeout.
    pub async fn open_download(&self, dataset_key: &str, file_keys: &str) -> Result<Response> {
        let url = self.endpoints.download(dataset_key);
        tracing::debug!("GET {} (fileSn={})", url, file_keys);

        let builder = self.client.get(&url).query(&[("fileSn", file_keys)]);
        self.send(builder).await
    }

    /// Download a dataset, then unpack and reassemble it as requested.
    pub async fn download_dataset(&self, request: &DownloadRequest) -> Result<DownloadResult> {
        pipeline::run(self, request).await
    }
}
