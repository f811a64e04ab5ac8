use thiserror::Error;

use crate::api::types::GameId;

/// Errors raised while creating or driving a game session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Malformed or unsupported catalog entry. No session is created.
    #[error("invalid game definition: {0}")]
    InvalidDefinition(String),
    /// Operation outside its legal state. The session is left unchanged.
    #[error("illegal operation: {0}")]
    IllegalOperation(String),
}

impl SessionError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidDefinition(reason.into())
    }

    pub fn illegal(reason: impl Into<String>) -> Self {
        Self::IllegalOperation(reason.into())
    }

    pub fn is_illegal_operation(&self) -> bool {
        matches!(self, Self::IllegalOperation(_))
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("game `{0}` not found in catalog")]
    NotFound(GameId),
    #[error("duplicate game id `{0}` in catalog")]
    Duplicate(GameId),
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no user is signed in")]
    NoUser,
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Host storage refused the operation (quota, disabled storage, ...).
    #[error("storage backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("name, email and password must not be empty")]
    MissingCredentials,
    #[error(transparent)]
    Store(#[from] StoreError),
}
