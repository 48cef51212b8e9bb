use url::Url;

use crate::error::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable read by both front ends to override the API location.
pub const API_URL_ENV: &str = "EQUIVIZ_API_URL";

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Validate and normalise a base URL. Trailing slashes are dropped so
    /// endpoint paths can be appended as-is.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)
            .map_err(|e| ClientError::Validation(format!("Invalid API URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Validation(format!(
                "API URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint path such as `/datasets/` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}
