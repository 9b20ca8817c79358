use std::path::Path;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use tokio::time::Instant;

use crate::document::ExtractedDocument;
use crate::error::{ExtractError, Result};

const PARSE_API_BASE: &str = "https://api.cloud.llamaindex.ai/api/parsing";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(300);

/// Client for the external document-parsing service
///
/// The service runs asynchronous parsing jobs: a file is uploaded, the job
/// is polled until it reaches a terminal state, and the rendered markdown is
/// fetched separately.
pub struct ParseClient {
    http_client: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl ParseClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
            ExtractError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, auth);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: PARSE_API_BASE.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        })
    }

    /// Override the API base URL (useful for testing)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the polling cadence and window
    pub fn with_poll_window(mut self, interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.poll_timeout = timeout;
        self
    }

    /// Parse a file on disk and return the rendered document
    pub async fn parse_file(&self, path: &Path, filename: &str) -> Result<ExtractedDocument> {
        let bytes = tokio::fs::read(path).await?;

        tracing::info!(filename, size = bytes.len(), "Uploading file to parsing service");
        let job = self.upload(bytes, filename).await?;

        tracing::debug!(job_id = %job.id, "Parsing job created, polling for completion");
        self.wait_for_job(&job.id).await?;

        let markdown = self.fetch_markdown(&job.id).await?;
        tracing::info!(job_id = %job.id, chars = markdown.len(), "Parsing job finished");

        Ok(ExtractedDocument::from_markdown(markdown))
    }

    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<ParseJob> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http_client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;

        Self::check_status(response).await?.json().await.map_err(Into::into)
    }

    async fn job_status(&self, job_id: &str) -> Result<ParseJob> {
        let response = self
            .http_client
            .get(format!("{}/job/{}", self.base_url, job_id))
            .send()
            .await?;

        Self::check_status(response).await?.json().await.map_err(Into::into)
    }

    /// Poll the job on a fixed interval until it reaches a terminal state
    async fn wait_for_job(&self, job_id: &str) -> Result<()> {
        let deadline = Instant::now() + self.poll_timeout;

        loop {
            let job = self.job_status(job_id).await?;

            match job.status.as_str() {
                "SUCCESS" => return Ok(()),
                "ERROR" | "CANCELED" => {
                    let detail = job
                        .error
                        .unwrap_or_else(|| format!("job reported status {}", job.status));
                    return Err(ExtractError::JobFailed(job_id.to_string(), detail));
                }
                other => {
                    tracing::debug!(job_id, status = other, "Parsing job still running");
                }
            }

            if Instant::now() >= deadline {
                return Err(ExtractError::Timeout(
                    job_id.to_string(),
                    self.poll_timeout.as_secs(),
                ));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn fetch_markdown(&self, job_id: &str) -> Result<String> {
        let response = self
            .http_client
            .get(format!("{}/job/{}/result/markdown", self.base_url, job_id))
            .send()
            .await?;

        let result: MarkdownResult = Self::check_status(response).await?.json().await?;
        Ok(result.markdown)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[derive(Debug, Deserialize)]
struct ParseJob {
    id: String,
    status: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MarkdownResult {
    markdown: String,
}
