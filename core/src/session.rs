use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ClientError;

/// Key the session token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// Client-local persistence for the session token.
pub trait TokenStore {
    fn load(&self) -> Result<Option<String>, ClientError>;
    fn save(&self, token: &str) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// Token store that lives only as long as the process. Clones share the
/// same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(token.into()))),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        *self.slot.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}
