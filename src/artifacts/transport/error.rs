#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The remote advertised no refs, so there is nothing to request.
    #[error("no refs found; make sure the repository exists and is accessible")]
    RefsNotFound,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with bytes that do not follow the smart protocol.
    #[error("protocol error: {0}")]
    Protocol(String),
}

pub type TransportResult<T> = Result<T, TransportError>;
