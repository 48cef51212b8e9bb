use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Rejected before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// Message the backend put in the response body.
    #[error("{0}")]
    Server(String),

    #[error("No token received")]
    MissingToken,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Text shown to the user for this error.
    ///
    /// Validation and server-reported errors are surfaced verbatim, a missing
    /// token keeps its own message, everything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(msg) | ClientError::Server(msg) => msg.clone(),
            ClientError::MissingToken => self.to_string(),
            ClientError::Transport(_) | ClientError::Decode(_) | ClientError::Storage(_) => {
                fallback.to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
