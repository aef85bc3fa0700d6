use reqwest::StatusCode;

/// Failures surfaced by the backend adapters.
///
/// The taxonomy is deliberately small: consumers either degrade (fetch
/// paths), roll back (toggle paths), or hand the problem to the session
/// layer (auth).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure, timeout, or an unexpected response
    #[error("network error: {0}")]
    Network(String),
    /// The backend rejected the bearer credential (HTTP 401); the session
    /// layer resolves this, not the engine
    #[error("authentication rejected by backend")]
    Auth,
    /// The backend rejected the request payload
    #[error("invalid request: {0}")]
    Validation(String),
    /// The addressed record does not exist
    #[error("not found: {0}")]
    NotFound(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl ApiError {
    /// Classify a non-success HTTP response.
    pub fn from_response(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Auth,
            StatusCode::NOT_FOUND => ApiError::NotFound(body),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation(body)
            }
            _ => ApiError::Network(format!("unexpected status {}: {}", status, body)),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth)
    }
}
