use thiserror::Error;

/// Failure reported by a price provider at the data-source boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The provider does not know the symbol.
    #[error("Symbol not found: {0}")]
    NotFound(String),

    /// Retryable network or provider error (5xx, rate limit, empty result).
    #[error("Transient fetch error: {0}")]
    Transient(String),

    /// The provider answered with a shape we could not decode.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Whether the accessor should try again.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transient(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}

/// Terminal failure of a single pair evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    #[error("Cross rate unavailable: {0}")]
    CrossRateUnavailable(String),
}

/// Failure while persisting evaluation output.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EvalError>;
