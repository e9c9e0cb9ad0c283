/// Failure of a single provider call.
///
/// The view collapses every variant into one generic user-facing
/// message; the variant itself is kept so logs and tests can still
/// tell what actually went wrong.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request produced no usable response at all.
    #[error("weather request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The provider answered with a non-2xx status (includes
    /// city-not-found, which OpenWeather reports as 404).
    #[error("weather provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("unexpected weather provider response: {0}")]
    Decode(String),
}

/// Discriminant of [`ApiError`], cheap to store and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Network,
    Status,
    Decode,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Network(_) => ApiErrorKind::Network,
            ApiError::Status { .. } => ApiErrorKind::Status,
            ApiError::Decode(_) => ApiErrorKind::Decode,
        }
    }
}
