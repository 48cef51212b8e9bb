use equiviz_core::{ClientError, TokenStore};
use keyring::Entry;
use tracing::{info, warn};

use crate::error::CliError;

const SERVICE: &str = "equiviz-session";

/// Session token kept in the OS keychain, one entry per API base URL.
#[derive(Debug, Clone)]
pub struct KeyringTokens {
    account: String,
}

impl KeyringTokens {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            account: api_base_url.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry, CliError> {
        Entry::new(SERVICE, &self.account).map_err(|e| {
            warn!("Failed to create keyring entry for {}: {}", self.account, e);
            CliError::Keychain(e.to_string())
        })
    }
}

impl TokenStore for KeyringTokens {
    fn load(&self) -> Result<Option<String>, ClientError> {
        let entry = self.entry().map_err(storage_error)?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => {
                info!("No stored session for {}", self.account);
                Ok(None)
            }
            Err(e) => {
                warn!("Failed to read session for {}: {}", self.account, e);
                Err(ClientError::Storage(e.to_string()))
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        let entry = self.entry().map_err(storage_error)?;
        entry.set_password(token).map_err(|e| {
            warn!("Failed to store session for {}: {}", self.account, e);
            ClientError::Storage(e.to_string())
        })
    }

    fn clear(&self) -> Result<(), ClientError> {
        let entry = self.entry().map_err(storage_error)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!("Failed to delete session for {}: {}", self.account, e);
                Err(ClientError::Storage(e.to_string()))
            }
        }
    }
}

fn storage_error(err: CliError) -> ClientError {
    ClientError::Storage(err.to_string())
}
