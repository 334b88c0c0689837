use thiserror::Error;

/// Failures while assembling a creation request from the current selections.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("model `{0}` is not among the enabled models")]
    ModelNotFound(String),
    #[error("{field} is not valid JSON: {source}")]
    InvalidJson {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures reported by the creation service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("server rejected the request with status {status}")]
    Rejected { status: u16, detail: Option<String> },
    #[error("request failed: {0}")]
    Transport(String),
}

impl ServiceError {
    /// Server-supplied explanation, when the server sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ServiceError::Rejected { detail, .. } => detail.as_deref(),
            ServiceError::Transport(_) => None,
        }
    }
}
