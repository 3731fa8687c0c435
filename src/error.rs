use thiserror::Error;

/// Cash register state conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateConflict {
    #[error("a cash register session is already open")]
    AlreadyOpen,

    #[error("no cash register session is open")]
    NoneOpen,
}

/// Errors surfaced by the engine layer.
///
/// Persistence and remote failures never escape an engine operation; they
/// are logged and downgraded at the call site. The variants exist so the
/// downgrade sites have something precise to log.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("state conflict: {0}")]
    StateConflict(#[from] StateConflict),

    #[error("persistence failure: {0}")]
    Persistence(#[from] anyhow::Error),

    #[error("import failure: {0}")]
    ImportFailure(String),

    #[error("broadcast channel unavailable")]
    RemoteUnavailable,
}

impl StoreError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        StoreError::InvalidInput(msg.into())
    }
}
