//! reqwest implementation of the analysis API.

use crate::api::{AnalysisApi, ApiError, Endpoint, Upload};
use crate::config::ApiConfig;
use crate::models::{AnalysisResult, DnaResponse, UploadResponse};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// JSON body of the creative-URL request.
#[derive(Debug, Serialize)]
struct CreativeUrlRequest<'a> {
    video_url: &'a str,
}

/// HTTP client for the analysis service.
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    /// Create a client for the service at `config.base_url`.
    ///
    /// Requests never time out unless `config.timeout_seconds` is set.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(ApiError::Client)?;

        info!("Analysis service: {}", config.base_url);

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn file_form(upload: &Upload) -> Form {
        let part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
        Form::new().part("file", part)
    }

    /// Send a prepared request and decode its JSON body.
    ///
    /// Error status codes are not treated as failures: the service reports
    /// problems in the body's `status` field.
    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!("Sending request to {}", self.url(endpoint));

        let response = request
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        debug!("{} responded [{}] with {} bytes", endpoint, status, body.len());

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { endpoint, source })
    }
}

#[async_trait]
impl AnalysisApi for HttpApi {
    async fn upload_market_data(&self, upload: &Upload) -> Result<UploadResponse, ApiError> {
        let endpoint = Endpoint::UploadMarketData;
        let request = self
            .client
            .post(self.url(endpoint))
            .multipart(Self::file_form(upload));
        self.send(endpoint, request).await
    }

    async fn analyze_market(&self) -> Result<DnaResponse, ApiError> {
        let endpoint = Endpoint::AnalyzeMarket;
        let request = self.client.post(self.url(endpoint));
        self.send(endpoint, request).await
    }

    async fn analyze_creative_file(&self, upload: &Upload) -> Result<AnalysisResult, ApiError> {
        let endpoint = Endpoint::AnalyzeCreativeFile;
        let request = self
            .client
            .post(self.url(endpoint))
            .multipart(Self::file_form(upload));
        self.send(endpoint, request).await
    }

    async fn analyze_creative_url(&self, video_url: &str) -> Result<AnalysisResult, ApiError> {
        let endpoint = Endpoint::AnalyzeCreativeUrl;
        let request = self
            .client
            .post(self.url(endpoint))
            .json(&CreativeUrlRequest { video_url });
        self.send(endpoint, request).await
    }

    async fn winning_dna(&self) -> Result<DnaResponse, ApiError> {
        let endpoint = Endpoint::WinningDna;
        let request = self.client.get(self.url(endpoint));
        self.send(endpoint, request).await
    }
}
