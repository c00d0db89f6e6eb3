//! Client side of the analysis service.
//!
//! The console talks to the service through the [`AnalysisApi`] trait so the
//! workflow can run against the real HTTP client or a scripted fake.

pub mod http;

use crate::models::{AnalysisResult, DnaResponse, UploadResponse};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub use http::HttpApi;

/// Service endpoints the console calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    UploadMarketData,
    AnalyzeMarket,
    AnalyzeCreativeFile,
    AnalyzeCreativeUrl,
    WinningDna,
}

impl Endpoint {
    /// Path relative to the service base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::UploadMarketData => "/upload-market-data",
            Endpoint::AnalyzeMarket => "/analyze-market",
            Endpoint::AnalyzeCreativeFile => "/analyze-creative-file",
            Endpoint::AnalyzeCreativeUrl => "/analyze-creative-url",
            Endpoint::WinningDna => "/winning-dna",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Transport-level failures. Application failures (`status: "error"`) are
/// not errors here; they come back as ordinary responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid response from {endpoint}: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file to be sent as the `file` field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a local file into an upload, keeping only its file name.
    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        debug!("Read {} ({} bytes)", file_name, bytes.len());
        Ok(Self::new(file_name, bytes))
    }
}

/// Operations offered by the analysis service.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Upload the competitor CSV.
    async fn upload_market_data(&self, upload: &Upload) -> Result<UploadResponse, ApiError>;

    /// Synthesise the winning DNA from the uploaded market data.
    async fn analyze_market(&self) -> Result<DnaResponse, ApiError>;

    /// Benchmark a creative file against the winning DNA.
    async fn analyze_creative_file(&self, upload: &Upload) -> Result<AnalysisResult, ApiError>;

    /// Benchmark a creative hosted at `video_url`.
    async fn analyze_creative_url(&self, video_url: &str) -> Result<AnalysisResult, ApiError>;

    /// Look up a benchmark persisted by an earlier session.
    async fn winning_dna(&self) -> Result<DnaResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::UploadMarketData.path(), "/upload-market-data");
        assert_eq!(Endpoint::AnalyzeMarket.path(), "/analyze-market");
        assert_eq!(Endpoint::AnalyzeCreativeFile.path(), "/analyze-creative-file");
        assert_eq!(Endpoint::AnalyzeCreativeUrl.path(), "/analyze-creative-url");
        assert_eq!(Endpoint::WinningDna.to_string(), "/winning-dna");
    }

    #[tokio::test]
    async fn test_upload_from_path() {
        let mut file = tempfile::Builder::new()
            .prefix("market")
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(b"title,installs\nPin Pull,1000\n").unwrap();

        let upload = Upload::from_path(file.path()).await.unwrap();
        assert!(upload.file_name.starts_with("market"));
        assert!(upload.file_name.ends_with(".csv"));
        assert_eq!(upload.bytes, b"title,installs\nPin Pull,1000\n");
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Upload::from_path(&dir.path().join("missing.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Io { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }
}
