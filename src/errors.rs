use crate::failure::RequestFailure;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("session store error: {0}")]
    Session(String),
    #[error("batch invocation requires at least one descriptor")]
    EmptyBatch,
    #[error("request failed: {0}")]
    Request(RequestFailure),
    #[error("unexpected payload shape: {0}")]
    Decode(String),
    #[error("push channel gave up after {0} reconnect attempts")]
    PushExhausted(u32),
}

impl From<RequestFailure> for Error {
    fn from(failure: RequestFailure) -> Self {
        Error::Request(failure)
    }
}

impl Error {
    /// Returns the normalized failure when this error came from the backend.
    pub fn as_request_failure(&self) -> Option<&RequestFailure> {
        match self {
            Error::Request(failure) => Some(failure),
            _ => None,
        }
    }
}
