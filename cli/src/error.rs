use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("{0}")]
    Validation(String),
}
