//! Shared client core for the chemical equipment visualizer.
//!
//! Holds the backend contract, the view-state controller and the presentation
//! helpers used by both the browser app and the terminal client.

pub mod backend;
pub mod charts;
pub mod config;
pub mod controller;
mod error;
pub mod format;
pub mod session;
pub mod state;
pub mod types;

pub use backend::{Backend, HttpBackend};
pub use config::ApiConfig;
pub use controller::{Controller, ReportSink};
pub use error::ClientError;
pub use session::{MemoryTokenStore, TokenStore, TOKEN_KEY};
pub use state::{CredentialForm, SharedState, StateHandle, ViewState};
pub use types::{
    AuthMode, AuthResponse, Credentials, DatasetDetail, DatasetSummary, Equipment, Report,
    TypeDistribution, UploadFile, UserInfo,
};
