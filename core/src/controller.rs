//! View-state controller.
//!
//! Every user action goes through here: one request to the [`Backend`], then
//! one update of the [`ViewState`]. Overlapping requests are neither queued
//! nor cancelled, so the last response to arrive wins.

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::error::ClientError;
use crate::session::TokenStore;
use crate::state::{CredentialForm, StateHandle, ViewState};
use crate::types::{AuthMode, AuthResponse, Credentials, Report, UploadFile};

pub const AUTH_FAILED: &str = "Authentication failed";
pub const LIST_FAILED: &str = "Failed to fetch datasets";
pub const UPLOAD_FAILED: &str = "Upload failed";
pub const DETAIL_FAILED: &str = "Failed to fetch dataset details";
pub const REPORT_FAILED: &str = "Failed to download PDF";
pub const NO_FILE: &str = "Please select a file";
pub const NOT_LOGGED_IN: &str = "Please log in first";

// Auth and upload surface server text; list, detail and report failures
// always show their generic message.

/// Platform save action for a downloaded report.
pub trait ReportSink {
    fn save(&self, report: &Report) -> Result<(), ClientError>;
}

pub struct Controller<B, T, S> {
    backend: Rc<B>,
    tokens: Rc<T>,
    state: S,
}

impl<B, T, S: Clone> Clone for Controller<B, T, S> {
    fn clone(&self) -> Self {
        Self {
            backend: Rc::clone(&self.backend),
            tokens: Rc::clone(&self.tokens),
            state: self.state.clone(),
        }
    }
}

impl<B, T, S> Controller<B, T, S>
where
    B: Backend,
    T: TokenStore,
    S: StateHandle,
{
    pub fn new(backend: B, tokens: T, state: S) -> Self {
        Self {
            backend: Rc::new(backend),
            tokens: Rc::new(tokens),
            state,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.read(|s| s.clone())
    }

    /// Re-hydrate the session from the stored token. Lists datasets when a
    /// token is found and reports whether the session is active.
    pub async fn restore_session(&self) -> bool {
        let token = match self.tokens.load() {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return false,
            Err(e) => {
                warn!("Failed to read stored session token: {}", e);
                return false;
            }
        };

        debug!("Restoring stored session");
        self.state.update(|s| {
            s.token = Some(token);
            s.authenticated = true;
        });
        // List failures are recorded in the view state.
        let _ = self.list_datasets().await;
        true
    }

    pub fn toggle_auth_mode(&self) {
        self.state.update(|s| s.auth_mode = s.auth_mode.toggled());
    }

    pub fn edit_form(&self, f: impl FnOnce(&mut CredentialForm)) {
        self.state.update(|s| f(&mut s.form));
    }

    /// Authenticate with whatever the form currently holds.
    pub async fn submit_auth(&self) -> Result<(), ClientError> {
        let (mode, credentials) = self
            .state
            .read(|s| (s.auth_mode, s.form.credentials(s.auth_mode)));
        self.authenticate(mode, credentials).await
    }

    pub async fn authenticate(&self, mode: AuthMode, credentials: Credentials) -> Result<(), ClientError> {
        self.state.update(|s| {
            s.error = None;
            s.loading = true;
        });

        let outcome = match self.backend.authenticate(mode, &credentials).await {
            Ok(AuthResponse {
                token: Some(token), ..
            }) if !token.is_empty() => Ok(token),
            Ok(_) => Err(ClientError::MissingToken),
            Err(e) => Err(e),
        };

        let token = match outcome {
            Ok(token) => token,
            Err(e) => {
                warn!("{} failed for {}: {}", mode.label(), credentials.username, e);
                self.state.update(|s| {
                    s.error = Some(e.user_message(AUTH_FAILED));
                    s.loading = false;
                });
                return Err(e);
            }
        };

        if let Err(e) = self.tokens.save(&token) {
            warn!("Session token not persisted: {}", e);
        }
        info!("{} succeeded for {}", mode.label(), credentials.username);
        self.state.update(|s| {
            s.token = Some(token);
            s.authenticated = true;
            s.form.clear();
            s.loading = false;
        });

        let _ = self.list_datasets().await;
        Ok(())
    }

    /// Refresh the recent-datasets list. A failure keeps the previous list.
    pub async fn list_datasets(&self) -> Result<(), ClientError> {
        let token = self.require_token()?;
        match self.backend.list_datasets(&token).await {
            Ok(datasets) => {
                debug!("Listed {} datasets", datasets.len());
                self.state.update(|s| {
                    s.datasets = datasets;
                    s.error = None;
                });
                Ok(())
            }
            Err(e) => {
                warn!("Listing datasets failed: {}", e);
                self.state.update(|s| s.error = Some(LIST_FAILED.to_string()));
                Err(e)
            }
        }
    }

    /// Upload `file` and make the result the selection. `None` is rejected
    /// without touching the network.
    pub async fn upload_dataset(&self, file: Option<UploadFile>) -> Result<(), ClientError> {
        let Some(file) = file else {
            let e = ClientError::Validation(NO_FILE.to_string());
            self.state.update(|s| s.error = Some(e.to_string()));
            return Err(e);
        };
        let token = self.require_token()?;

        self.state.update(|s| {
            s.error = None;
            s.loading = true;
        });

        match self.backend.upload_dataset(&token, &file).await {
            Ok(detail) => {
                info!("Uploaded {} as dataset {}", file.name, detail.id);
                self.state.update(|s| {
                    s.selected = Some(detail);
                    s.loading = false;
                });
                let _ = self.list_datasets().await;
                Ok(())
            }
            Err(e) => {
                warn!("Upload of {} failed: {}", file.name, e);
                self.state.update(|s| {
                    s.error = Some(e.user_message(UPLOAD_FAILED));
                    s.loading = false;
                });
                Err(e)
            }
        }
    }

    /// Replace the selection with the full detail of `dataset_id`.
    pub async fn select_dataset(&self, dataset_id: i64) -> Result<(), ClientError> {
        let token = self.require_token()?;
        match self.backend.dataset_summary(&token, dataset_id).await {
            Ok(detail) => {
                self.state.update(|s| {
                    s.selected = Some(detail);
                    s.error = None;
                });
                Ok(())
            }
            Err(e) => {
                warn!("Fetching dataset {} failed: {}", dataset_id, e);
                self.state.update(|s| s.error = Some(DETAIL_FAILED.to_string()));
                Err(e)
            }
        }
    }

    /// Fetch the PDF report for `dataset_id` and hand it to `sink`.
    pub async fn download_report(&self, dataset_id: i64, sink: &impl ReportSink) -> Result<(), ClientError> {
        let token = self.require_token()?;
        let result = match self.backend.generate_pdf(&token, dataset_id).await {
            Ok(bytes) => {
                let report = Report::new(dataset_id, bytes);
                sink.save(&report).map(|_| report)
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(report) => {
                info!("Saved {} ({} bytes)", report.filename, report.bytes.len());
                self.state.update(|s| s.error = None);
                Ok(())
            }
            Err(e) => {
                warn!("Report for dataset {} failed: {}", dataset_id, e);
                self.state.update(|s| s.error = Some(REPORT_FAILED.to_string()));
                Err(e)
            }
        }
    }

    /// Drop the session and everything derived from it.
    pub fn logout(&self) {
        if let Err(e) = self.tokens.clear() {
            warn!("Failed to clear stored session token: {}", e);
        }
        self.state.update(|s| s.reset());
        info!("Logged out");
    }

    fn require_token(&self) -> Result<String, ClientError> {
        match self.state.read(|s| s.token.clone()) {
            Some(token) => Ok(token),
            None => {
                let e = ClientError::Validation(NOT_LOGGED_IN.to_string());
                self.state.update(|s| s.error = Some(e.to_string()));
                Err(e)
            }
        }
    }
}
