//! HTTP client for the recording service.
//!
//! Mirrors the browser capture client's boundary: it lists recordings,
//! uploads one captured blob with a filename hint, and fetches a stored
//! recording's bytes by id. Capture and encoding stay in the browser.

use bytes::Bytes;
use thiserror::Error;

use crate::api::handlers::{HealthResponse, RecordingResponse, UploadResponse};
use crate::api::response::ErrorBody;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },
}

pub struct RecordingsClient {
    base_url: String,
    http: reqwest::Client,
}

impl RecordingsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// List all stored recordings, newest first.
    pub async fn list(&self) -> Result<Vec<RecordingResponse>, ClientError> {
        let resp = self
            .http
            .get(format!("{}/api/recordings", self.base_url))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Upload one captured blob. The filename is only a hint; the server
    /// generates the stored name.
    pub async fn upload(
        &self,
        filename_hint: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<UploadResponse, ClientError> {
        let part = reqwest::multipart::Part::stream(data)
            .file_name(filename_hint.to_string())
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new().part("video", part);

        let resp = self
            .http
            .post(format!("{}/api/recordings", self.base_url))
            .multipart(form)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Fetch a stored recording's bytes by id.
    pub async fn fetch(&self, id: u64) -> Result<Bytes, ClientError> {
        let resp = self
            .http
            .get(format!("{}/api/recordings/{id}", self.base_url))
            .send()
            .await?;
        Ok(check(resp).await?.bytes().await?)
    }
}

/// Pass successful responses through; turn failures into `ClientError::Api`
/// carrying the server's error message.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
