//! The remote API the controller talks to.
//!
//! [`Backend`] is the seam between the view-state controller and the network:
//! [`HttpBackend`] speaks the real HTTP contract through `reqwest`, tests
//! substitute a recording mock.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ClientError;
use crate::types::{AuthMode, AuthResponse, Credentials, DatasetDetail, DatasetSummary, UploadFile};

/// Requests the client can make. Futures are `!Send` so the same trait serves
/// the browser, where everything runs on one thread.
#[async_trait(?Send)]
pub trait Backend {
    async fn authenticate(
        &self,
        mode: AuthMode,
        credentials: &Credentials,
    ) -> Result<AuthResponse, ClientError>;

    async fn list_datasets(&self, token: &str) -> Result<Vec<DatasetSummary>, ClientError>;

    async fn upload_dataset(&self, token: &str, file: &UploadFile) -> Result<DatasetDetail, ClientError>;

    async fn dataset_summary(&self, token: &str, id: i64) -> Result<DatasetDetail, ClientError>;

    async fn generate_pdf(&self, token: &str, id: i64) -> Result<Vec<u8>, ClientError>;
}

/// `reqwest`-backed implementation of the backend contract.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    config: ApiConfig,
}

impl HttpBackend {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn get(&self, token: &str, path: &str) -> Result<Response, ClientError> {
        let url = self.config.endpoint(path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", auth_header(token))
            .send()
            .await?;
        check_status(response).await
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn authenticate(
        &self,
        mode: AuthMode,
        credentials: &Credentials,
    ) -> Result<AuthResponse, ClientError> {
        let url = self.config.endpoint(mode.endpoint());
        debug!("POST {} as {}", url, credentials.username);
        let response = self.client.post(&url).json(credentials).send().await?;
        let response = check_status(response).await?;
        // A 2xx reply without a readable body carries no token either.
        match response.json::<AuthResponse>().await {
            Ok(auth) => Ok(auth),
            Err(e) if e.is_decode() => {
                warn!("Unreadable auth response from {}: {}", url, e);
                Err(ClientError::MissingToken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_datasets(&self, token: &str) -> Result<Vec<DatasetSummary>, ClientError> {
        let response = self.get(token, "/datasets/").await?;
        Ok(response.json::<Vec<DatasetSummary>>().await?)
    }

    async fn upload_dataset(&self, token: &str, file: &UploadFile) -> Result<DatasetDetail, ClientError> {
        let url = self.config.endpoint("/datasets/upload/");
        debug!("POST {} ({}, {} bytes)", url, file.name, file.bytes.len());
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str("text/csv")?;
        let form = Form::new().part("file", part);
        let response = self
            .client
            .post(&url)
            .header("Authorization", auth_header(token))
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json::<DatasetDetail>().await?)
    }

    async fn dataset_summary(&self, token: &str, id: i64) -> Result<DatasetDetail, ClientError> {
        let response = self.get(token, &format!("/datasets/{}/summary/", id)).await?;
        Ok(response.json::<DatasetDetail>().await?)
    }

    async fn generate_pdf(&self, token: &str, id: i64) -> Result<Vec<u8>, ClientError> {
        let response = self.get(token, &format!("/datasets/{}/generate_pdf/", id)).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

fn auth_header(token: &str) -> String {
    format!("Token {}", token)
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let response_url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    warn!("Request to {} failed with {}", response_url, status);
    Err(error_from_body(status.as_u16(), &body))
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Map a non-2xx response body onto the error taxonomy.
///
/// `{"error": ...}` comes from the app's own views, `{"detail": ...}` from the
/// framework's authentication layer. Anything else is a transport error.
pub fn error_from_body(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error: Some(msg), .. }) => ClientError::Server(msg),
        Ok(ErrorBody { detail: Some(msg), .. }) => ClientError::Server(msg),
        _ => ClientError::Transport(format!("HTTP {}", status)),
    }
}
