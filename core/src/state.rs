use std::cell::RefCell;
use std::rc::Rc;

use crate::types::{AuthMode, Credentials, DatasetDetail, DatasetSummary};

/// Contents of the login/register form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CredentialForm {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl CredentialForm {
    /// Build the request body for `mode`. Email is only sent when registering.
    pub fn credentials(&self, mode: AuthMode) -> Credentials {
        let credentials = Credentials::new(self.username.clone(), self.password.clone());
        match mode {
            AuthMode::Login => credentials,
            AuthMode::Register => credentials.with_email(self.email.clone()),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Everything the views render from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub token: Option<String>,
    pub authenticated: bool,
    pub auth_mode: AuthMode,
    pub form: CredentialForm,
    pub datasets: Vec<DatasetSummary>,
    /// At most one dataset is selected; `None` until an upload or a list click.
    pub selected: Option<DatasetDetail>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ViewState {
    pub fn is_selected(&self, dataset_id: i64) -> bool {
        self.selected.as_ref().is_some_and(|d| d.id == dataset_id)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Where the controller keeps its [`ViewState`].
///
/// The browser front end wraps a reactive signal so every update re-renders;
/// the terminal client and tests use a plain shared cell.
pub trait StateHandle {
    fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R;
    fn update(&self, f: impl FnOnce(&mut ViewState));
}

pub type SharedState = Rc<RefCell<ViewState>>;

impl StateHandle for SharedState {
    fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        f(&self.borrow())
    }

    fn update(&self, f: impl FnOnce(&mut ViewState)) {
        f(&mut self.borrow_mut())
    }
}
