use crate::error::StoreError;
use crate::store::{SessionStore, User};

/// In-process store for native hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    user: Option<User>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: User) -> Self {
        Self { user: Some(user) }
    }
}

impl SessionStore for MemoryStore {
    fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn set_user(&mut self, user: User) -> Result<(), StoreError> {
        self.user = Some(user);
        Ok(())
    }

    fn clear_user(&mut self) -> Result<(), StoreError> {
        self.user = None;
        Ok(())
    }
}
