use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Feature lookup in namespace {namespace} timed out after {timeout:?}")]
    Timeout { namespace: String, timeout: Duration },

    #[error("Kind already registered: {0}")]
    DuplicateKind(String),

    #[error("Kind not registered: {0}")]
    UnregisteredKind(String),

    #[error("Failed to list {kind}: {message}")]
    ListFailed { kind: String, message: String },

    #[error("Kubernetes error: {0}")]
    KubernetesError(#[from] kube::error::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the work that produced this error should be retried.
    /// Registration and serialization errors are permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            CoreError::Timeout { .. } | CoreError::ListFailed { .. } => true,
            CoreError::KubernetesError(_) | CoreError::Internal(_) => true,
            CoreError::DuplicateKind(_)
            | CoreError::UnregisteredKind(_)
            | CoreError::SerializationError(_) => false,
        }
    }
}
